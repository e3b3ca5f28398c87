// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Encode and decode iCalendar data with types that describe their own wire
//! form.
//!
//! Components are plain structs declared through [`component!`], which records
//! for every field whether it is a property or a nested component and how the
//! property is named. Property values customize their encoding through the
//! hooks of [`PropertyValue`]. [`marshal`] and [`unmarshal`] walk that
//! metadata in both directions.
//!
//! ```
//! use davcal_ical::{Calendar, DateTime, Duration, Event, marshal, unmarshal};
//!
//! let start = DateTime::utc("2024-06-01T09:00:00Z".parse().unwrap());
//! let mut event = Event::with_duration("meeting-1", start, Duration::from_secs(3600));
//! event.summary = "Planning, Q3".to_string();
//!
//! let text = marshal(&Calendar::with_event(event).unwrap()).unwrap();
//! assert!(text.contains("SUMMARY:Planning\\, Q3\r\n"));
//!
//! let calendar: Calendar = unmarshal(&text).unwrap();
//! assert_eq!(calendar.event().unwrap().summary, "Planning, Q3");
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

mod component;
mod error;
mod field;
pub mod keyword;
mod marshal;
pub mod property;
pub mod semantic;
mod syntax;
mod unmarshal;
pub mod value;

pub use crate::component::{Component, Schema};
pub use crate::error::{IcalError, ValueError};
pub use crate::field::{ComponentField, PropertyField};
pub use crate::marshal::{
    Marshal, MarshalOptions, encode_component, encode_value, marshal, marshal_with,
};
pub use crate::property::{Params, Property};
pub use crate::semantic::{Calendar, Event, TimeZone};
pub use crate::syntax::{Token, tokenize};
pub use crate::unmarshal::{
    Unmarshal, decode_bare, decode_component, decode_property_value, hydrate_component, unmarshal,
};
pub use crate::value::{
    Attendee, Classification, Contact, CsvList, DateTime, DateTimeList, Duration, EventStatus,
    Frequency, Geo, Method, Organizer, Priority, PropertyValue, RecurrenceRule, TimeTransparency,
    Uri, Weekday, WeekdayNum,
};
