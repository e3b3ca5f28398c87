// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! GEO property value as defined in RFC 5545 Section 3.8.1.6.

use std::fmt;

use crate::error::ValueError;
use crate::keyword::KW_GEO;
use crate::value::PropertyValue;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geo {
    /// Latitude, within [-90, 90].
    pub latitude: f64,
    /// Longitude, within [-180, 180].
    pub longitude: f64,
}

impl Geo {
    /// Creates a position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Geo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {:.6}", self.latitude, self.longitude)
    }
}

impl PropertyValue for Geo {
    fn validate(&self) -> Result<(), ValueError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValueError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValueError::Longitude(self.longitude));
        }
        Ok(())
    }

    fn encode_name(&self) -> Option<&'static str> {
        Some(KW_GEO)
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let error = || ValueError::parse(KW_GEO, raw);
        let mut parts = raw
            .split(|c: char| c == ';' || c.is_whitespace())
            .filter(|s| !s.is_empty());
        let (Some(latitude), Some(longitude), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(error());
        };
        Ok(Self {
            latitude: lexical::parse(latitude).map_err(|_| error())?,
            longitude: lexical::parse(longitude).map_err(|_| error())?,
        })
    }
}
