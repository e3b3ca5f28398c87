// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! URI value as defined in RFC 5545 Section 3.3.13.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ValueError;
use crate::keyword::{KW_URI, KW_VALUE};
use crate::property::Params;
use crate::value::PropertyValue;

/// An absolute URI, emitted with `VALUE=URI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(Url);

impl Uri {
    /// Parses an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an absolute URI.
    pub fn parse(s: &str) -> Result<Self, ValueError> {
        Url::parse(s.trim())
            .map(Self)
            .map_err(|_| ValueError::parse(KW_URI, s))
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for Uri {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl PropertyValue for Uri {
    fn encode_params(&self) -> Params {
        [(KW_VALUE, KW_URI)].into_iter().collect()
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        Self::parse(raw)
    }
}
