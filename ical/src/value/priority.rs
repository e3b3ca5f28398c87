// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! PRIORITY values as defined in RFC 5545 Section 3.8.1.9.

use std::fmt;

use crate::error::ValueError;
use crate::value::PropertyValue;

/// Priority from 1 (highest) to 9 (lowest); 0 leaves it undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// No priority, the property is omitted.
    pub const UNDEFINED: Self = Self(0);

    /// Highest priority.
    pub const HIGHEST: Self = Self(1);

    /// Lowest priority.
    pub const LOWEST: Self = Self(9);

    /// Creates a priority.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is greater than 9.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 9 {
            return Err(ValueError::Priority(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// The numeric priority.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PropertyValue for Priority {
    fn validate(&self) -> Result<(), ValueError> {
        Self::new(self.0).map(|_| ())
    }

    fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let value = lexical::parse::<i64, _>(raw.trim())
            .map_err(|_| ValueError::parse("INTEGER", raw))?;
        match u8::try_from(value) {
            Ok(value) if value <= 9 => Ok(Self(value)),
            _ => Err(ValueError::Priority(value)),
        }
    }
}
