// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Time zone component (VTIMEZONE) as defined in RFC 5545 Section 3.6.5.
//!
//! Only the identifying properties are modelled; STANDARD and DAYLIGHT
//! sub-components are left to the server, which can resolve the zone through
//! the `TZURL` pointer.

use crate::component::Component;
use crate::error::ValueError;
use crate::value::Uri;

const TZURL_BASE: &str = "http://tzurl.org/zoneinfo/";

crate::component! {
    /// Time zone component (VTIMEZONE)
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct TimeZone {
        /// Time zone identifier
        pub id: String => property("tzid,required"),

        /// Location name used by libical
        pub location: String => property("x-lic-location,omitempty"),

        /// Where an up-to-date definition can be fetched
        pub url: Option<Uri> => property("tzurl,omitempty"),
    }
}

impl Component for TimeZone {}

impl TimeZone {
    /// A time zone that refers to an IANA zone by name and points `TZURL` at
    /// `http://tzurl.org/zoneinfo/<name>`.
    ///
    /// # Errors
    ///
    /// Fails if the name is not in the time zone database.
    pub fn dynamic(name: &str) -> Result<Self, ValueError> {
        let name = name.trim();
        jiff::tz::TimeZone::get(name).map_err(|_| ValueError::UnknownTimeZone(name.to_string()))?;
        Ok(Self {
            id: name.to_string(),
            location: name.to_string(),
            url: Some(Uri::parse(&format!("{TZURL_BASE}{name}"))?),
        })
    }
}
