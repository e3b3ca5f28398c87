// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of calendar data as servers send it, and the errors raised for
//! data that cannot be encoded or decoded.

use davcal_ical::{
    Calendar, DateTime, Duration, Event, EventStatus, Geo, IcalError, Organizer, ValueError,
    marshal, tokenize, unmarshal,
};
use jiff::civil::date;

const SERVER_EVENT: &str = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example Server//EN

BEGIN:VEVENT
DTSTART;TZID=America/Los_Angeles:20150511T140000
DTEND;TZID=America/Los_Angeles:20150511T150000
DTSTAMP:20150511T204516Z
ORGANIZER;CN=Shared Room:mailto:room-4b-very-long-resource-identif
 ier@resource.example.com
UID:7kukuqrfedlm2f9t0vh1p7o7bs@example.com
ATTENDEE;CUTYPE=INDIVIDUAL;ROLE=REQ-PARTICIPANT;PARTSTAT=ACCEPTED;CN=Front
  Desk;X-NUM-GUESTS=0:MAILTO:front-desk@example.com
ATTENDEE;CN=\"Doe, Jane\";RSVP=TRUE:mailto:jane@example.com
CREATED:20150504T173946Z
DESCRIPTION:
LAST-MODIFIED:20150511T204516Z
LOCATION:Conference room\\, 4th floor
SEQUENCE:0
STATUS:CONFIRMED
SUMMARY:Brand presentation
X-UNKNOWN-PROPERTY:ignored
TRANSP:OPAQUE
BEGIN:VALARM
ACTION:DISPLAY
TRIGGER:-PT15M
END:VALARM
END:VEVENT
END:VCALENDAR
";

#[test]
fn unmarshal_server_event() {
    let calendar: Calendar = unmarshal(SERVER_EVENT).unwrap();
    let event = calendar.into_event().unwrap();

    assert_eq!(event.uid, "7kukuqrfedlm2f9t0vh1p7o7bs@example.com");
    assert_eq!(event.summary, "Brand presentation");
    assert_eq!(event.location, "Conference room, 4th floor");
    assert_eq!(event.description, "");
    assert_eq!(event.status, Some(EventStatus::Confirmed));

    let start = event.date_start.unwrap();
    assert_eq!(start.tzid(), Some("America/Los_Angeles"));
    assert_eq!(
        start.to_timestamp().unwrap().to_string(),
        "2015-05-11T21:00:00Z"
    );

    let organizer = event.organizer.unwrap();
    assert_eq!(organizer.contact.name.as_deref(), Some("Shared Room"));
    assert_eq!(
        organizer.contact.email,
        "room-4b-very-long-resource-identifier@resource.example.com"
    );

    assert_eq!(event.attendees.len(), 2);
    assert_eq!(event.attendees[0].contact.name.as_deref(), Some("Front Desk"));
    assert_eq!(event.attendees[0].contact.email, "front-desk@example.com");
    assert_eq!(event.attendees[1].contact.name.as_deref(), Some("Doe, Jane"));
}

#[test]
fn tokenize_keeps_nesting() {
    let root = tokenize(SERVER_EVENT).unwrap();
    let calendar = root.components("VCALENDAR").first().unwrap();
    assert_eq!(calendar.properties("version").len(), 1);

    let event = calendar.components("VEVENT").first().unwrap();
    assert_eq!(event.properties("ATTENDEE").len(), 2);
    assert_eq!(event.components("VALARM").len(), 1);
    assert!(event.properties("ACTION").is_empty());
}

#[test]
fn tokenize_same_named_nested_components() {
    let text = "BEGIN:X-NODE\nNAME:outer\nBEGIN:X-NODE\nNAME:inner\nEND:X-NODE\nEND:X-NODE";
    let root = tokenize(text).unwrap();

    let outer = root.components("X-NODE").first().unwrap();
    assert_eq!(outer.property("NAME").map(|p| p.value.as_str()), Some("outer"));
    let inner = outer.components("X-NODE").first().unwrap();
    assert_eq!(inner.property("NAME").map(|p| p.value.as_str()), Some("inner"));
}

#[test]
fn unmarshal_structural_errors() {
    let err = unmarshal::<Calendar>("BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:VCALENDAR").unwrap_err();
    assert!(matches!(err, IcalError::MismatchedNesting { expected, found }
        if expected == "VEVENT" && found == "VCALENDAR"));

    let err = unmarshal::<Calendar>("BEGIN:VCALENDAR\nVERSION:2.0").unwrap_err();
    assert!(matches!(err, IcalError::UnmatchedBegin { name } if name == "VCALENDAR"));

    let err = unmarshal::<Calendar>("END:VCALENDAR").unwrap_err();
    assert!(matches!(err, IcalError::UnmatchedEnd { .. }));

    let err = unmarshal::<Calendar>("BEGIN:VCALENDAR\nNO COLON HERE\nEND:VCALENDAR").unwrap_err();
    assert!(matches!(err, IcalError::MalformedLine { line: 2, .. }));

    let err = unmarshal::<Calendar>("\r\n\r\n").unwrap_err();
    assert!(matches!(err, IcalError::EmptyInput));
}

#[test]
fn unmarshal_invalid_value_names_the_path() {
    let text = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:1\nGEO:95;10\nEND:VEVENT\nEND:VCALENDAR";
    let err = unmarshal::<Calendar>(text).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidValue { property, source: ValueError::Latitude(_) } if property == "GEO"
    ));
    let message = err.to_string();
    assert!(message.starts_with("VCALENDAR: field `events`: VEVENT: field `geo`:"), "{message}");
}

#[test]
fn marshal_requires_end_or_duration() {
    let mut event = Event::with_duration("1", DateTime::now(), Duration::from_secs(60));
    event.duration = None;
    let err = marshal(&event).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidComponent { source: ValueError::MissingEnd, .. }
    ));

    let mut event = Event::with_duration("1", DateTime::now(), Duration::from_secs(60));
    event.date_end = Some(DateTime::now());
    let err = marshal(&event).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidComponent { source: ValueError::EndAndDuration, .. }
    ));
}

#[test]
fn marshal_geo_bounds() {
    let start = DateTime::date(date(2024, 1, 1));
    let mut event = Event::with_duration("geo", start, Duration::from_secs(3600));

    event.geo = Some(Geo::new(-91.0, 0.0));
    let err = marshal(&event).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidValue { source: ValueError::Latitude(_), .. }
    ));

    event.geo = Some(Geo::new(0.0, 181.0));
    let err = marshal(&event).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidValue { source: ValueError::Longitude(_), .. }
    ));

    event.geo = Some(Geo::new(10.0, -20.0));
    let text = marshal(&event).unwrap();
    assert!(text.contains("\r\nGEO:10.000000 -20.000000\r\n"));
}

#[test]
fn bare_values() {
    let organizer: Organizer = unmarshal("ORGANIZER;CN=Ann:MAILTO:ann@example.com").unwrap();
    assert_eq!(organizer.contact.name.as_deref(), Some("Ann"));
    assert_eq!(marshal(&organizer).unwrap(), "ORGANIZER;CN=Ann:MAILTO:ann@example.com");

    let err = marshal(&Duration::from_secs(60)).unwrap_err();
    assert!(matches!(err, IcalError::Unnamed { .. }));
}

const RECURRING_EVENT: &str = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example Server//EN
BEGIN:VEVENT
UID:weekly-sync@example.com
DTSTAMP:20240101T000000Z
DTSTART:20240101T090000Z
DURATION:PT30M
RRULE:FREQ=WEEKLY;COUNT=10
EXDATE:20240108T090000Z
EXDATE:20240115T090000Z
EXDATE;TZID=Europe/Berlin:20240122T100000,20240129T100000
RDATE:20240301T090000Z
RDATE:20240302T090000Z
CATEGORIES:work,sync
CATEGORIES:team
RESOURCES:room 4
RESOURCES:projector
RELATED-TO:parent-a@example.com
RELATED-TO:parent-b@example.com
CONTACT:Front desk
CONTACT:Facilities
END:VEVENT
END:VCALENDAR
";

#[test]
fn unmarshal_repeated_list_properties() {
    let calendar: Calendar = unmarshal(RECURRING_EVENT).unwrap();
    let event = calendar.event().unwrap();

    assert_eq!(event.exception_dates.len(), 3);
    let excluded: Vec<String> = event
        .excluded_dates()
        .map(|d| d.to_timestamp().unwrap().to_string())
        .collect();
    assert_eq!(
        excluded,
        [
            "2024-01-08T09:00:00Z",
            "2024-01-15T09:00:00Z",
            "2024-01-22T09:00:00Z",
            "2024-01-29T09:00:00Z",
        ]
    );
    assert_eq!(event.additional_dates().count(), 2);

    let categories: Vec<&str> = event.categories.iter().flat_map(|c| c.iter()).collect();
    assert_eq!(categories, ["work", "sync", "team"]);
    assert_eq!(event.resources.len(), 2);
    assert_eq!(event.related_to, ["parent-a@example.com", "parent-b@example.com"]);
    assert_eq!(event.contact_info, ["Front desk", "Facilities"]);

    let text = marshal(&calendar).unwrap();
    assert_eq!(text.matches("\r\nEXDATE").count(), 3);
    assert!(text.contains("\r\nEXDATE;TZID=Europe/Berlin:20240122T100000,20240129T100000\r\n"));
    assert_eq!(text.matches("\r\nRDATE:").count(), 2);
    assert_eq!(text.matches("\r\nCATEGORIES:").count(), 2);
    assert_eq!(text.matches("\r\nRELATED-TO:").count(), 2);

    let decoded: Calendar = unmarshal(&text).unwrap();
    assert_eq!(decoded, calendar);
}

#[test]
fn unmarshal_unknown_time_zone_is_an_error() {
    let text = "BEGIN:VCALENDAR
BEGIN:VEVENT
UID:1
DTSTART;TZID=W. Europe Standard Time:20240101T090000
DURATION:PT1H
END:VEVENT
END:VCALENDAR";
    let err = unmarshal::<Calendar>(text).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidValue { property, source: ValueError::UnknownTimeZone(tzid) }
            if property == "DTSTART" && tzid == "W. Europe Standard Time"
    ));
    assert!(err.to_string().contains("field `date_start`"), "{err}");
}

#[test]
fn unmarshal_equal_sign_in_parameter_value() {
    let text = "BEGIN:VEVENT
UID:1
DTSTART:20240101T090000Z
DURATION:PT1H
ATTACH;X-SIGNATURE=c2lnbmVk==;FMTTYPE=application/pdf:https://example.com/agenda.pdf
END:VEVENT";
    let event: Event = unmarshal(text).unwrap();
    assert_eq!(
        event.attachment.map(|uri| uri.as_str().to_string()),
        Some("https://example.com/agenda.pdf".to_string())
    );

    let root = tokenize(text).unwrap();
    let attach = root.components("VEVENT").first().unwrap().property("ATTACH").unwrap();
    assert_eq!(attach.params.get("X-SIGNATURE"), Some("c2lnbmVk=="));
    assert_eq!(attach.params.get("FMTTYPE"), Some("application/pdf"));
}

#[test]
fn unmarshal_priority_out_of_range() {
    let text = "BEGIN:VEVENT\nUID:1\nDTSTART:20240101T090000Z\nPRIORITY:42\nEND:VEVENT";
    let err = unmarshal::<Event>(text).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IcalError::InvalidValue { property, source: ValueError::Priority(42) }
            if property == "PRIORITY"
    ));

    let event: Event = unmarshal(&text.replace("PRIORITY:42", "PRIORITY:9")).unwrap();
    assert_eq!(event.priority.get(), 9);
}
