// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar object (VCALENDAR) as defined in RFC 5545 Section 3.4.

use crate::component::Component;
use crate::error::ValueError;
use crate::semantic::{Event, TimeZone};
use crate::value::Method;

crate::component! {
    /// Main iCalendar object that contains components and properties
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Calendar {
        /// Version of iCalendar specification, `2.0` when left empty
        pub version: String => property(",2.0"),

        /// Product identifier of the generating software
        pub prod_id: String => property("prodid,-//davcal//NONSGML davcal-ical//EN"),

        /// Calendar scale (usually GREGORIAN)
        pub calendar_scale: String => property("calscale,omitempty"),

        /// Method for the calendar (PUBLISH, REQUEST, etc.)
        pub method: Option<Method> => property(",omitempty"),

        /// Time zone definitions
        pub timezones: Vec<TimeZone> => component,

        /// Events
        pub events: Vec<Event> => component,
    }
}

impl Component for Calendar {
    fn validate(&self) -> Result<(), ValueError> {
        if self.method.is_none() && self.events.iter().any(|e| e.date_start.is_none()) {
            return Err(ValueError::MissingStart);
        }
        Ok(())
    }
}

impl Calendar {
    /// Wraps a single event.
    ///
    /// # Errors
    ///
    /// Fails if the event has no start date.
    pub fn with_event(event: Event) -> Result<Self, ValueError> {
        let mut calendar = Self::default();
        calendar.add_event(event)?;
        Ok(calendar)
    }

    /// Appends an event.
    ///
    /// # Errors
    ///
    /// Fails if the event has no start date and the calendar has no method.
    pub fn add_event(&mut self, event: Event) -> Result<(), ValueError> {
        if event.date_start.is_none() && self.method.is_none() {
            return Err(ValueError::MissingStart);
        }
        self.events.push(event);
        Ok(())
    }

    /// Appends a time zone definition unless one with the same TZID exists.
    pub fn add_timezone(&mut self, timezone: TimeZone) {
        if !self.timezones.iter().any(|tz| tz.id == timezone.id) {
            self.timezones.push(timezone);
        }
    }

    /// The first event, for single-event calendar objects.
    #[must_use]
    pub fn event(&self) -> Option<&Event> {
        self.events.first()
    }

    /// Takes the first event, for single-event calendar objects.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        self.events.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateTime, Duration, IcalError, marshal, unmarshal};

    #[test]
    fn fills_version_and_product() {
        let text = marshal(&Calendar::default()).unwrap();
        assert_eq!(
            text,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//davcal//NONSGML davcal-ical//EN\r\nEND:VCALENDAR"
        );

        let calendar: Calendar = unmarshal(&text).unwrap();
        assert_eq!(calendar.version, "2.0");
        assert!(calendar.events.is_empty());
    }

    #[test]
    fn start_is_required_without_method() {
        let mut event = Event::with_duration("1", DateTime::now(), Duration::from_secs(60));
        event.date_start = None;

        let err = Calendar::with_event(event.clone()).unwrap_err();
        assert_eq!(err, ValueError::MissingStart);

        let mut calendar = Calendar {
            method: Some(Method::Cancel),
            ..Calendar::default()
        };
        calendar.add_event(event.clone()).unwrap();
        assert!(marshal(&calendar).is_ok());

        calendar.method = None;
        let err = marshal(&calendar).unwrap_err();
        assert!(matches!(err, IcalError::InvalidComponent { source: ValueError::MissingStart, .. }));
    }

    #[test]
    fn single_event_accessors() {
        let event = Event::with_duration("1", DateTime::now(), Duration::from_secs(60));
        let calendar = Calendar::with_event(event.clone()).unwrap();
        assert_eq!(calendar.event().map(|e| e.uid.as_str()), Some("1"));
        assert_eq!(calendar.into_event(), Some(event));
    }

    #[test]
    fn rejects_other_top_level_components() {
        let err = unmarshal::<Calendar>("BEGIN:VEVENT\nUID:1\nEND:VEVENT").unwrap_err();
        assert!(matches!(err, IcalError::TagMismatch { expected, found }
            if expected == "VCALENDAR" && found == "VEVENT"));

        let err = unmarshal::<Calendar>(
            "BEGIN:VCALENDAR\nEND:VCALENDAR\nBEGIN:VCALENDAR\nEND:VCALENDAR",
        )
        .unwrap_err();
        assert!(matches!(err, IcalError::TooManyComponents { count: 2, .. }));

        let err = unmarshal::<Calendar>("VERSION:2.0").unwrap_err();
        assert!(matches!(err, IcalError::MissingComponent { .. }));
    }
}
