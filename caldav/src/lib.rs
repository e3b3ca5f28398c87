// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `CalDAV` client for accessing and managing calendars on `CalDAV` servers (RFC 4791).
//!
//! Calendar objects travel as [`davcal_ical::Calendar`] values: they are
//! marshalled into `PUT` bodies and unmarshalled from `GET` bodies and from
//! the `calendar-data` properties of multistatus responses. Queries are built
//! as a [`CalendarQuery`] filter tree.
//!
//! ```
//! use davcal_caldav::CalendarQuery;
//! use davcal_ical::DateTime;
//!
//! let start = DateTime::utc("2024-06-01T00:00:00Z".parse().unwrap());
//! let end = DateTime::utc("2024-07-01T00:00:00Z".parse().unwrap());
//! let query = CalendarQuery::event_range(start, end).unwrap().with_uid("meeting-1");
//! assert!(query.to_xml().unwrap().contains(r#"<C:comp-filter name="VEVENT">"#));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod client;
mod config;
mod error;
mod http;
mod request;
mod response;
mod types;
mod xml;

pub use crate::client::CalDavClient;
pub use crate::config::{AuthMethod, CalDavConfig};
pub use crate::error::CalDavError;
pub use crate::request::{
    CalendarDataRequest, CalendarQuery, Collation, ComponentFilter, Depth, Filter,
    ParameterFilter, Prop, PropFindRequest, PropertyFilter, TextMatch, TimeRange,
};
pub use crate::response::{MultiStatusResponse, PropStat, Properties, ResponseItem};
pub use crate::types::{CalendarCollection, CalendarResource, ETag, Href};
