// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT) as defined in RFC 5545 Section 3.6.1.

use crate::component::Component;
use crate::error::ValueError;
use crate::value::{
    Attendee, Classification, CsvList, DateTime, DateTimeList, Duration, EventStatus, Geo,
    Organizer, Priority, RecurrenceRule, TimeTransparency, Uri,
};

crate::component! {
    /// Event component (VEVENT)
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Event {
        /// Unique identifier for the event
        pub uid: String => property(",required"),

        /// Date/time the event was created in the calendar store
        pub date_stamp: Option<DateTime> => property("dtstamp,required"),

        /// Start date/time of the event, required unless the calendar has a
        /// METHOD
        pub date_start: Option<DateTime> => property("dtstart,omitempty"),

        /// End date/time of the event
        pub date_end: Option<DateTime> => property("dtend,omitempty"),

        /// Duration of the event (alternative to `date_end`)
        pub duration: Option<Duration> => property(",omitempty"),

        /// Access classification
        pub class: Option<Classification> => property(",omitempty"),

        /// Creation date/time
        pub created: Option<DateTime> => property(",omitempty"),

        /// Description of the event
        pub description: String => property(",omitempty"),

        /// Geographic position
        pub geo: Option<Geo> => property(",omitempty"),

        /// Last modification date/time
        pub last_modified: Option<DateTime> => property(",omitempty"),

        /// Location of the event
        pub location: String => property(",omitempty"),

        /// Organizer of the event
        pub organizer: Option<Organizer> => property(",omitempty"),

        /// Priority, 1 (highest) to 9 (lowest), 0 for undefined
        pub priority: Priority => property(",omitempty"),

        /// Revision sequence number
        pub sequence: u32 => property(",omitempty"),

        /// Status of the event
        pub status: Option<EventStatus> => property(",omitempty"),

        /// Summary/title of the event
        pub summary: String => property(",omitempty"),

        /// Time transparency for busy time searches
        pub transparency: Option<TimeTransparency> => property("transp,omitempty"),

        /// URL associated with the event
        pub url: Option<Uri> => property(",omitempty"),

        /// Recurrence ID, set on overridden instances of a recurring event
        pub recurrence_id: Option<DateTime> => property(",omitempty"),

        /// Recurrence rules
        pub recurrence_rules: Vec<RecurrenceRule> => property("rrule,omitempty"),

        /// Attachment
        pub attachment: Option<Uri> => property("attach,omitempty"),

        /// Attendees of the event
        pub attendees: Vec<Attendee> => property("attendee,omitempty"),

        /// Categories, one list per CATEGORIES line
        pub categories: Vec<CsvList> => property(",omitempty"),

        /// Comments
        pub comments: Vec<String> => property("comment,omitempty"),

        /// Contact information, one entry per CONTACT line
        pub contact_info: Vec<String> => property("contact,omitempty"),

        /// Exception dates of the recurrence set, one list per EXDATE line
        pub exception_dates: Vec<DateTimeList> => property("exdate,omitempty"),

        /// Additional dates of the recurrence set, one list per RDATE line
        pub recurrence_dates: Vec<DateTimeList> => property("rdate,omitempty"),

        /// UIDs of related components
        pub related_to: Vec<String> => property(",omitempty"),

        /// Resources needed for the event, one list per RESOURCES line
        pub resources: Vec<CsvList> => property(",omitempty"),
    }
}

impl Component for Event {
    fn validate(&self) -> Result<(), ValueError> {
        match (&self.date_end, &self.duration) {
            (Some(_), Some(_)) => Err(ValueError::EndAndDuration),
            (None, None) => Err(ValueError::MissingEnd),
            _ => Ok(()),
        }
    }
}

impl Event {
    /// Creates an event spanning `start` to `end`, stamped with the current
    /// time.
    #[must_use]
    pub fn with_end(uid: impl Into<String>, start: DateTime, end: DateTime) -> Self {
        Self {
            uid: uid.into(),
            date_stamp: Some(DateTime::now()),
            date_start: Some(start),
            date_end: Some(end),
            ..Self::default()
        }
    }

    /// Creates an event lasting `duration` from `start`, stamped with the
    /// current time.
    #[must_use]
    pub fn with_duration(uid: impl Into<String>, start: DateTime, duration: Duration) -> Self {
        Self {
            uid: uid.into(),
            date_stamp: Some(DateTime::now()),
            date_start: Some(start),
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Returns `true` if the event repeats, by rule or by explicit dates.
    #[must_use]
    pub fn is_recurrence(&self) -> bool {
        !self.recurrence_rules.is_empty() || self.additional_dates().next().is_some()
    }

    /// Every EXDATE value, across all EXDATE lines.
    pub fn excluded_dates(&self) -> impl Iterator<Item = &DateTime> {
        self.exception_dates.iter().flat_map(|list| &list.0)
    }

    /// Every RDATE value, across all RDATE lines.
    pub fn additional_dates(&self) -> impl Iterator<Item = &DateTime> {
        self.recurrence_dates.iter().flat_map(|list| &list.0)
    }

    /// Returns `true` if the event overrides one instance of a recurring event.
    #[must_use]
    pub const fn is_override(&self) -> bool {
        self.recurrence_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{IcalError, marshal, unmarshal};

    fn start() -> DateTime {
        DateTime::floating(date(2024, 6, 1).at(9, 0, 0, 0))
    }

    #[test]
    fn end_and_duration_are_exclusive() {
        let mut event = Event::with_end("1", start(), DateTime::floating(date(2024, 6, 1).at(10, 0, 0, 0)));
        event.duration = Some(Duration::from_secs(3600));
        let err = marshal(&event).unwrap_err();
        assert!(matches!(
            err,
            IcalError::InvalidComponent { source: ValueError::EndAndDuration, .. }
        ));
        assert_eq!(err.to_string(), "invalid VEVENT: end date and duration are mutually exclusive");

        event.date_end = None;
        event.duration = None;
        let err = marshal(&event).unwrap_err();
        assert_eq!(err.to_string(), "invalid VEVENT: end date or duration must be set");
    }

    #[test]
    fn omits_empty_fields() {
        let mut event = Event::with_duration("uid-1", start(), Duration::from_secs(1800));
        event.date_stamp = Some(DateTime::utc("2024-05-30T12:00:00Z".parse().unwrap()));
        let text = marshal(&event).unwrap();
        assert_eq!(
            text,
            [
                "BEGIN:VEVENT",
                "UID:uid-1",
                "DTSTAMP:20240530T120000Z",
                "DTSTART:20240601T090000",
                "DURATION:PT30M",
                "END:VEVENT",
            ]
            .join("\r\n")
        );
    }

    #[test]
    fn requires_uid_and_stamp() {
        let mut event = Event::with_duration("", start(), Duration::from_secs(60));
        let err = marshal(&event).unwrap_err();
        assert!(matches!(err.root_cause(), IcalError::MissingRequired { name } if name == "UID"));

        event.uid = "x".to_string();
        event.date_stamp = None;
        let err = marshal(&event).unwrap_err();
        assert!(matches!(err.root_cause(), IcalError::MissingRequired { name } if name == "DTSTAMP"));
    }

    #[test]
    fn recurrence_predicates() {
        let event: Event = unmarshal(
            "BEGIN:VEVENT\r\n\
             UID:r\r\n\
             DTSTAMP:20240101T000000Z\r\n\
             DTSTART:20240101T090000Z\r\n\
             DURATION:PT1H\r\n\
             RRULE:FREQ=WEEKLY;COUNT=14\r\n\
             EXDATE:20240108T090000Z,20240115T090000Z\r\n\
             END:VEVENT\r\n",
        )
        .unwrap();
        assert!(event.is_recurrence());
        assert!(!event.is_override());
        assert_eq!(event.excluded_dates().count(), 2);

        let event: Event = unmarshal(
            "BEGIN:VEVENT\nUID:r\nRECURRENCE-ID:20240108T090000Z\nDTSTART:20240108T100000Z\nEND:VEVENT",
        )
        .unwrap();
        assert!(!event.is_recurrence());
        assert!(event.is_override());
    }
}
