// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value types and the hooks they use to control their encoding.
//!
//! Every type that can sit in a property field implements [`PropertyValue`].
//! Only [`PropertyValue::decode_value`] is mandatory; every other hook has a
//! default that matches the behavior of a plain value: the value is rendered
//! with [`Display`](fmt::Display), has no parameters, and keeps the field's
//! property name.

mod address;
mod datetime;
mod duration;
mod enums;
mod geo;
mod priority;
mod rrule;
mod text;
mod uri;

use std::fmt;

pub use address::{Attendee, AttendeeRole, CalendarUser, Contact, Organizer, OrganizerRole, Role};
pub use datetime::{DateTime, DateTimeList};
pub use duration::{Duration, DurationParts};
pub use enums::{Classification, EventStatus, Method, TimeTransparency};
pub use geo::Geo;
pub use priority::Priority;
pub use rrule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};
pub use text::{CsvList, escape_text, split_text_list, unescape_text};
pub use uri::Uri;

use crate::error::ValueError;
use crate::property::{Params, Property};

/// Encoding and decoding hooks of a property value.
pub trait PropertyValue: fmt::Display + Sized {
    /// Checks semantic rules; called before encoding and after decoding.
    ///
    /// # Errors
    ///
    /// Returns an error describing the violated rule.
    fn validate(&self) -> Result<(), ValueError> {
        Ok(())
    }

    /// Renders the wire form of the value.
    fn encode_value(&self) -> String {
        self.to_string()
    }

    /// Overrides the property name the value is emitted under.
    fn encode_name(&self) -> Option<&'static str> {
        None
    }

    /// Parameters emitted alongside the value.
    fn encode_params(&self) -> Params {
        Params::new()
    }

    /// Returns `true` if the value counts as absent.
    fn is_empty(&self) -> bool {
        false
    }

    /// Parses the raw wire value.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid value of this type.
    fn decode_value(raw: &str) -> Result<Self, ValueError>;

    /// Reads back the parameters of a decoded property.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is invalid for this value.
    fn decode_params(&mut self, _params: &Params) -> Result<(), ValueError> {
        Ok(())
    }

    /// Builds the property contributed by the hooks.
    ///
    /// The name is empty unless [`PropertyValue::encode_name`] supplies one.
    fn to_property(&self) -> Property {
        Property {
            name: self.encode_name().unwrap_or_default().to_string(),
            value: self.encode_value(),
            params: self.encode_params(),
            ..Property::default()
        }
    }
}

impl PropertyValue for String {
    fn encode_value(&self) -> String {
        escape_text(self)
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        Ok(unescape_text(raw))
    }
}

impl PropertyValue for bool {
    fn encode_value(&self) -> String {
        if *self { "TRUE" } else { "FALSE" }.to_string()
    }

    fn is_empty(&self) -> bool {
        !*self
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("TRUE") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("FALSE") {
            Ok(false)
        } else {
            Err(ValueError::parse("BOOLEAN", raw))
        }
    }
}

macro_rules! impl_numeric_value {
    ($kind:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl PropertyValue for $ty {
                #[allow(clippy::float_cmp)]
                fn is_empty(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn decode_value(raw: &str) -> Result<Self, ValueError> {
                    lexical::parse::<$ty, _>(raw.trim()).map_err(|_| ValueError::parse($kind, raw))
                }
            }
        )+
    };
}

impl_numeric_value!("INTEGER" => i8, i16, i32, i64, u8, u16, u32, u64);
impl_numeric_value!("FLOAT" => f32, f64);
