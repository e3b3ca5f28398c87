// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DURATION value as defined in RFC 5545 Section 3.3.6.

use std::fmt::{self, Write};

use chumsky::prelude::*;
use jiff::SignedDuration;

use crate::error::ValueError;
use crate::keyword::KW_DURATION;
use crate::value::PropertyValue;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: i64 = 7 * SECS_PER_DAY;

/// A signed duration with second precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(SignedDuration);

/// A duration split into its RFC 5545 designators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationParts {
    /// Whether the duration is negative.
    pub negative: bool,
    /// Whole weeks.
    pub weeks: u64,
    /// Remaining days.
    pub days: u64,
    /// Remaining hours.
    pub hours: u64,
    /// Remaining minutes.
    pub minutes: u64,
    /// Remaining seconds.
    pub seconds: u64,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Self = Self(SignedDuration::ZERO);

    /// A duration of `secs` seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(SignedDuration::from_secs(secs))
    }

    /// Total length in whole seconds.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0.as_secs()
    }

    /// Returns `true` if the duration points into the past.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    /// Splits the duration into weeks, days, hours, minutes and seconds.
    #[must_use]
    pub const fn decompose(self) -> DurationParts {
        let secs = self.0.as_secs();
        let total = secs.unsigned_abs();
        let (week, day, hour, minute) = (
            SECS_PER_WEEK.unsigned_abs(),
            SECS_PER_DAY.unsigned_abs(),
            SECS_PER_HOUR.unsigned_abs(),
            SECS_PER_MINUTE.unsigned_abs(),
        );
        DurationParts {
            negative: secs < 0,
            weeks: total / week,
            days: total % week / day,
            hours: total % day / hour,
            minutes: total % hour / minute,
            seconds: total % minute,
        }
    }
}

impl From<SignedDuration> for Duration {
    fn from(duration: SignedDuration) -> Self {
        Self::from_secs(duration.as_secs())
    }
}

impl From<Duration> for SignedDuration {
    fn from(duration: Duration) -> Self {
        duration.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.decompose();
        if parts.negative {
            f.write_char('-')?;
        }
        f.write_char('P')?;

        if self.0.is_zero() {
            return f.write_str("T0S");
        }

        if parts.weeks > 0 {
            write!(f, "{}W", parts.weeks)?;
        }
        if parts.days > 0 {
            write!(f, "{}D", parts.days)?;
        }
        if parts.hours > 0 || parts.minutes > 0 || parts.seconds > 0 {
            f.write_char('T')?;
            if parts.hours > 0 {
                write!(f, "{}H", parts.hours)?;
            }
            if parts.minutes > 0 {
                write!(f, "{}M", parts.minutes)?;
            }
            if parts.seconds > 0 {
                write!(f, "{}S", parts.seconds)?;
            }
        }
        Ok(())
    }
}

impl PropertyValue for Duration {
    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        let parts = value_duration()
            .parse(raw)
            .into_result()
            .map_err(|_| ValueError::parse(KW_DURATION, raw))?;

        let total = [
            (parts.weeks, SECS_PER_WEEK),
            (parts.days, SECS_PER_DAY),
            (parts.hours, SECS_PER_HOUR),
            (parts.minutes, SECS_PER_MINUTE),
            (parts.seconds, 1),
        ]
        .into_iter()
        .try_fold(0_i64, |acc, (n, unit)| {
            i64::try_from(n)
                .ok()
                .and_then(|n| n.checked_mul(unit))
                .and_then(|n| acc.checked_add(n))
        })
        .ok_or_else(|| ValueError::parse(KW_DURATION, raw))?;

        Ok(Self::from_secs(if parts.negative { -total } else { total }))
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// Weeks combined with days (`P1W2D`) and sparse time parts (`PT1H30S`) are
/// accepted as well, since common producers emit them.
fn value_duration<'src>() -> impl Parser<'src, &'src str, DurationParts, extra::Err<Rich<'src, char>>>
{
    // case-sensitive
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map(|s, span| {
            lexical::parse::<u32, _>(&s)
                .map(u64::from)
                .map_err(|_| Rich::custom(span, "u32 out of range"))
        });
    let unit = |designator: char| int.clone().then_ignore(just(designator)).or_not();

    let sign = just('-')
        .to(true)
        .or(just('+').to(false))
        .or_not()
        .map(Option::unwrap_or_default);

    let date = unit('W').then(unit('D'));
    let time = just('T').ignore_then(unit('H').then(unit('M')).then(unit('S')));

    sign.then_ignore(just('P'))
        .then(date)
        .then(time.or_not())
        .then_ignore(end())
        .try_map(|((negative, (weeks, days)), time), span| {
            let ((hours, minutes), seconds) = match time {
                Some(((None, None), None)) => {
                    return Err(Rich::custom(span, "empty time part"));
                }
                Some(time) => time,
                None if weeks.is_none() && days.is_none() => {
                    return Err(Rich::custom(span, "empty duration"));
                }
                None => ((None, None), None),
            };
            Ok(DurationParts {
                negative,
                weeks: weeks.unwrap_or_default(),
                days: days.unwrap_or_default(),
                hours: hours.unwrap_or_default(),
                minutes: minutes.unwrap_or_default(),
                seconds: seconds.unwrap_or_default(),
            })
        })
}
