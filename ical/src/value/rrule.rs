// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule (RECUR) value as defined in RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ValueError;
use crate::keyword::{
    KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH,
    KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO,
    KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL,
    KW_RRULE_WKST,
};
use crate::value::{DateTime, PropertyValue};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Until date for recurrence
    pub until: Option<DateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekdayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Position in the set of occurrences
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<Weekday>,
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

/// Day of week with optional occurrence, e.g. `-1FR` for the last Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence within the month or year
    pub occurrence: Option<i8>,
    /// Day of the week
    pub day: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of `day`.
    #[must_use]
    pub const fn every(day: Weekday) -> Self {
        Self {
            occurrence: None,
            day,
        }
    }

    /// The `occurrence`-th `day`, counting from the end when negative.
    #[must_use]
    pub const fn nth(occurrence: i8, day: Weekday) -> Self {
        Self {
            occurrence: Some(occurrence),
            day,
        }
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.occurrence {
            Some(n) => write!(f, "{n}{}", self.day),
            None => write!(f, "{}", self.day),
        }
    }
}

impl FromStr for WeekdayNum {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let error = || ValueError::parse(KW_RRULE_BYDAY, s);
        let split = s.len().checked_sub(2).ok_or_else(error)?;
        let (occurrence, day) = s.split_at_checked(split).ok_or_else(error)?;
        let day = day.parse().map_err(|_| error())?;
        let occurrence = match occurrence {
            "" => None,
            n => Some(lexical::parse::<i8, _>(n.trim_start_matches('+')).map_err(|_| error())?),
        };
        Ok(Self { occurrence, day })
    }
}

impl RecurrenceRule {
    /// A rule with only a frequency.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            until: None,
            count: None,
            interval: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: None,
        }
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, part: &str, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, ";{part}=")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if let Some(interval) = self.interval {
            write!(f, ";{KW_RRULE_INTERVAL}={interval}")?;
        }
        write_list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }
}

fn check_range<T>(part: &'static str, items: &[T], min: i64, max: i64, signed: bool) -> Result<(), ValueError>
where
    T: Copy + Into<i64>,
{
    for &item in items {
        let value: i64 = item.into();
        let magnitude = if signed { value.abs() } else { value };
        if magnitude < min || magnitude > max {
            return Err(ValueError::RuleOutOfRange { part, value });
        }
    }
    Ok(())
}

fn parse_list<T: lexical::FromLexical>(part: &'static str, value: &str) -> Result<Vec<T>, ValueError> {
    value
        .split(',')
        .map(|item| {
            lexical::parse::<T, _>(item.trim().trim_start_matches('+'))
                .map_err(|_| ValueError::parse(part, item))
        })
        .collect()
}

impl PropertyValue for RecurrenceRule {
    fn validate(&self) -> Result<(), ValueError> {
        if self.count.is_some() && self.until.is_some() {
            return Err(ValueError::CountAndUntil);
        }
        if self.interval == Some(0) {
            return Err(ValueError::RuleOutOfRange {
                part: KW_RRULE_INTERVAL,
                value: 0,
            });
        }
        check_range(KW_RRULE_BYSECOND, &self.by_second, 0, 60, false)?;
        check_range(KW_RRULE_BYMINUTE, &self.by_minute, 0, 59, false)?;
        check_range(KW_RRULE_BYHOUR, &self.by_hour, 0, 23, false)?;
        check_range(KW_RRULE_BYMONTHDAY, &self.by_month_day, 1, 31, true)?;
        check_range(KW_RRULE_BYYEARDAY, &self.by_year_day, 1, 366, true)?;
        check_range(KW_RRULE_BYWEEKNO, &self.by_week_no, 1, 53, true)?;
        check_range(KW_RRULE_BYMONTH, &self.by_month, 1, 12, false)?;
        check_range(KW_RRULE_BYSETPOS, &self.by_set_pos, 1, 366, true)?;
        let occurrences: Vec<i8> = self.by_day.iter().filter_map(|d| d.occurrence).collect();
        check_range(KW_RRULE_BYDAY, &occurrences, 1, 53, true)
    }

    fn encode_name(&self) -> Option<&'static str> {
        Some(KW_RRULE)
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let mut freq = None;
        let mut rule = Self::new(Frequency::Daily);

        for part in raw.trim().split(';').filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| ValueError::parse(KW_RRULE, part))?;
            let key = key.trim().to_ascii_uppercase();
            match key.as_str() {
                KW_RRULE_FREQ => {
                    freq = Some(
                        value
                            .parse()
                            .map_err(|_| ValueError::parse(KW_RRULE_FREQ, value))?,
                    );
                }
                KW_RRULE_UNTIL => rule.until = Some(DateTime::decode_value(value)?),
                KW_RRULE_COUNT => {
                    rule.count = Some(
                        lexical::parse(value.trim())
                            .map_err(|_| ValueError::parse(KW_RRULE_COUNT, value))?,
                    );
                }
                KW_RRULE_INTERVAL => {
                    rule.interval = Some(
                        lexical::parse(value.trim())
                            .map_err(|_| ValueError::parse(KW_RRULE_INTERVAL, value))?,
                    );
                }
                KW_RRULE_BYSECOND => rule.by_second = parse_list(KW_RRULE_BYSECOND, value)?,
                KW_RRULE_BYMINUTE => rule.by_minute = parse_list(KW_RRULE_BYMINUTE, value)?,
                KW_RRULE_BYHOUR => rule.by_hour = parse_list(KW_RRULE_BYHOUR, value)?,
                KW_RRULE_BYDAY => {
                    rule.by_day = value
                        .split(',')
                        .map(str::parse)
                        .collect::<Result<_, _>>()?;
                }
                KW_RRULE_BYMONTHDAY => {
                    rule.by_month_day = parse_list(KW_RRULE_BYMONTHDAY, value)?;
                }
                KW_RRULE_BYYEARDAY => rule.by_year_day = parse_list(KW_RRULE_BYYEARDAY, value)?,
                KW_RRULE_BYWEEKNO => rule.by_week_no = parse_list(KW_RRULE_BYWEEKNO, value)?,
                KW_RRULE_BYMONTH => rule.by_month = parse_list(KW_RRULE_BYMONTH, value)?,
                KW_RRULE_BYSETPOS => rule.by_set_pos = parse_list(KW_RRULE_BYSETPOS, value)?,
                KW_RRULE_WKST => {
                    rule.wkst = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| ValueError::parse(KW_RRULE_WKST, value))?,
                    );
                }
                other => tracing::trace!(part = other, "ignoring unknown recurrence rule part"),
            }
        }

        rule.freq = freq.ok_or(ValueError::MissingFrequency)?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn encodes_in_canonical_order() {
        let rule = RecurrenceRule {
            interval: Some(2),
            by_day: vec![
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::nth(-1, Weekday::Friday),
            ],
            by_month: vec![1, 6],
            wkst: Some(Weekday::Sunday),
            until: Some(DateTime::utc(Timestamp::from_second(1_704_067_200).unwrap())),
            ..RecurrenceRule::new(Frequency::Monthly)
        };
        assert_eq!(
            rule.encode_value(),
            "FREQ=MONTHLY;UNTIL=20240101T000000Z;INTERVAL=2;BYDAY=MO,-1FR;BYMONTH=1,6;WKST=SU"
        );
        assert_eq!(RecurrenceRule::decode_value(&rule.encode_value()), Ok(rule));
    }

    #[test]
    fn weekly_count() {
        let rule = RecurrenceRule {
            count: Some(14),
            ..RecurrenceRule::new(Frequency::Weekly)
        };
        assert_eq!(rule.to_property().encode(), "RRULE:FREQ=WEEKLY;COUNT=14");
    }

    #[test]
    fn validates_rules() {
        let both = RecurrenceRule {
            count: Some(3),
            until: Some(DateTime::now()),
            ..RecurrenceRule::new(Frequency::Daily)
        };
        assert_eq!(both.validate(), Err(ValueError::CountAndUntil));

        let month = RecurrenceRule {
            by_month: vec![13],
            ..RecurrenceRule::new(Frequency::Yearly)
        };
        assert!(month.validate().is_err());

        let day = RecurrenceRule {
            by_month_day: vec![-31, 1],
            ..RecurrenceRule::new(Frequency::Monthly)
        };
        assert!(day.validate().is_ok());
    }

    #[test]
    fn decodes_leniently() {
        let rule = RecurrenceRule::decode_value("freq=daily;X-FOO=bar;BYDAY=+2TU").unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.by_day, [WeekdayNum::nth(2, Weekday::Tuesday)]);

        assert_eq!(
            RecurrenceRule::decode_value("COUNT=3"),
            Err(ValueError::MissingFrequency)
        );
        assert!(RecurrenceRule::decode_value("FREQ=FORTNIGHTLY").is_err());
    }
}
