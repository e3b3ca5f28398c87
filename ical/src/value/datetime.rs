// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE and DATE-TIME values as defined in RFC 5545 Sections 3.3.4 and 3.3.5.

use std::fmt;

use jiff::civil;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::error::ValueError;
use crate::keyword::{KW_DATE, KW_DATETIME, KW_TZID, KW_VALUE};
use crate::property::Params;
use crate::value::PropertyValue;

/// A DATE-TIME or DATE value, truncated to whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTime {
    /// UTC time, `YYYYMMDDTHHMMSSZ`.
    Utc(Timestamp),

    /// Local time without a time zone, `YYYYMMDDTHHMMSS`.
    Floating(civil::DateTime),

    /// Local time in a named time zone, emitted with a `TZID` parameter.
    Zoned(Zoned),

    /// A whole day, `YYYYMMDD` with `VALUE=DATE`.
    Date(civil::Date),
}

impl DateTime {
    /// The current time in UTC.
    #[must_use]
    pub fn now() -> Self {
        Self::utc(Timestamp::now())
    }

    /// A UTC time.
    #[must_use]
    pub fn utc(timestamp: Timestamp) -> Self {
        Self::Utc(truncate(timestamp))
    }

    /// A floating local time.
    #[must_use]
    pub fn floating(datetime: civil::DateTime) -> Self {
        let time = civil::time(datetime.hour(), datetime.minute(), datetime.second(), 0);
        Self::Floating(civil::DateTime::from_parts(datetime.date(), time))
    }

    /// A zoned time.
    ///
    /// Times in UTC, or in a zone without an IANA name, are stored as
    /// [`DateTime::Utc`].
    #[must_use]
    pub fn zoned(zoned: &Zoned) -> Self {
        let timestamp = truncate(zoned.timestamp());
        match zoned.time_zone().iana_name() {
            Some(name) if !is_utc_name(name) => {
                Self::Zoned(timestamp.to_zoned(zoned.time_zone().clone()))
            }
            _ => Self::Utc(timestamp),
        }
    }

    /// A whole day.
    #[must_use]
    pub const fn date(date: civil::Date) -> Self {
        Self::Date(date)
    }

    /// Returns `true` for [`DateTime::Utc`].
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self, Self::Utc(_))
    }

    /// Returns `true` for [`DateTime::Date`].
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// The instant this value denotes, if it is anchored to a time zone.
    #[must_use]
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Utc(ts) => Some(*ts),
            Self::Zoned(zoned) => Some(zoned.timestamp()),
            Self::Floating(_) | Self::Date(_) => None,
        }
    }

    /// The time zone identifier of a zoned value.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match self {
            Self::Zoned(zoned) => zoned.time_zone().iana_name(),
            _ => None,
        }
    }
}

fn truncate(timestamp: Timestamp) -> Timestamp {
    Timestamp::from_second(timestamp.as_second()).unwrap_or(timestamp)
}

fn is_utc_name(name: &str) -> bool {
    matches!(name, "UTC" | "Etc/UTC")
}

impl From<Timestamp> for DateTime {
    fn from(timestamp: Timestamp) -> Self {
        Self::utc(timestamp)
    }
}

impl From<&Zoned> for DateTime {
    fn from(zoned: &Zoned) -> Self {
        Self::zoned(zoned)
    }
}

impl From<civil::DateTime> for DateTime {
    fn from(datetime: civil::DateTime) -> Self {
        Self::floating(datetime)
    }
}

impl From<civil::Date> for DateTime {
    fn from(date: civil::Date) -> Self {
        Self::date(date)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc(ts) => write!(f, "{}", ts.strftime("%Y%m%dT%H%M%SZ")),
            Self::Floating(dt) => write!(f, "{}", dt.strftime("%Y%m%dT%H%M%S")),
            Self::Zoned(zoned) => match zoned.time_zone().iana_name() {
                Some(_) => write!(f, "{}", zoned.datetime().strftime("%Y%m%dT%H%M%S")),
                None => write!(f, "{}", zoned.timestamp().strftime("%Y%m%dT%H%M%SZ")),
            },
            Self::Date(date) => write!(f, "{}", date.strftime("%Y%m%d")),
        }
    }
}

impl PropertyValue for DateTime {
    fn encode_params(&self) -> Params {
        let mut params = Params::new();
        match self {
            Self::Zoned(_) => {
                if let Some(tzid) = self.tzid() {
                    params.insert(KW_TZID, tzid);
                }
            }
            Self::Date(_) => params.insert(KW_VALUE, KW_DATE),
            Self::Utc(_) | Self::Floating(_) => {}
        }
        params
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        let error = || ValueError::parse(KW_DATETIME, raw);

        if let Some(date) = parse_date(raw) {
            return Ok(Self::Date(date));
        }

        let (date, rest) = raw.split_once('T').ok_or_else(error)?;
        let date = parse_date(date).ok_or_else(error)?;
        let (time, utc) = match rest.strip_suffix('Z') {
            Some(time) => (time, true),
            None => (rest, false),
        };
        let time = parse_time(time).ok_or_else(error)?;
        let datetime = civil::DateTime::from_parts(date, time);

        if utc {
            let timestamp = datetime
                .to_zoned(TimeZone::UTC)
                .map_err(|_| error())?
                .timestamp();
            Ok(Self::Utc(timestamp))
        } else {
            Ok(Self::Floating(datetime))
        }
    }

    fn decode_params(&mut self, params: &Params) -> Result<(), ValueError> {
        if let Some(value_type) = params.get(KW_VALUE)
            && value_type.eq_ignore_ascii_case(KW_DATE)
            && !self.is_date()
        {
            return Err(ValueError::parse(KW_DATE, self.to_string()));
        }

        let (Some(tzid), Self::Floating(datetime)) = (params.get(KW_TZID), &*self) else {
            return Ok(());
        };
        let tz = TimeZone::get(tzid).map_err(|_| ValueError::UnknownTimeZone(tzid.to_string()))?;
        let zoned = datetime
            .to_zoned(tz)
            .map_err(|_| ValueError::parse(KW_DATETIME, datetime.to_string()))?;
        *self = Self::zoned(&zoned);
        Ok(())
    }
}

fn parse_date(s: &str) -> Option<civil::Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = lexical::parse::<i16, _>(s.get(0..4)?).ok()?;
    let month = lexical::parse::<i8, _>(s.get(4..6)?).ok()?;
    let day = lexical::parse::<i8, _>(s.get(6..8)?).ok()?;
    civil::Date::new(year, month, day).ok()
}

fn parse_time(s: &str) -> Option<civil::Time> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = lexical::parse::<i8, _>(s.get(0..2)?).ok()?;
    let minute = lexical::parse::<i8, _>(s.get(2..4)?).ok()?;
    // leap seconds are clamped
    let second = lexical::parse::<i8, _>(s.get(4..6)?).ok()?.min(59);
    civil::Time::new(hour, minute, second, 0).ok()
}

/// A comma separated list of DATE-TIME or DATE values, e.g. EXDATE or RDATE.
///
/// Parameters (`TZID`, `VALUE=DATE`) are shared, so they are taken from the
/// first element on encode and applied to every element on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeList(pub Vec<DateTime>);

impl DateTimeList {
    /// Creates a list from its items.
    pub fn new(items: impl IntoIterator<Item = DateTime>) -> Self {
        Self(items.into_iter().collect())
    }
}

impl fmt::Display for DateTimeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl PropertyValue for DateTimeList {
    fn encode_params(&self) -> Params {
        self.0
            .first()
            .map(PropertyValue::encode_params)
            .unwrap_or_default()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(DateTime::decode_value)
            .collect::<Result<_, _>>()
            .map(Self)
    }

    fn decode_params(&mut self, params: &Params) -> Result<(), ValueError> {
        self.0
            .iter_mut()
            .try_for_each(|item| item.decode_params(params))
    }
}
