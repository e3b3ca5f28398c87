// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsing tests.

use davcal_caldav::{CalDavError, MultiStatusResponse};
use davcal_ical::{DateTime, IcalError};

const REPORT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/calendars/user/work/second.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"etag-2"</D:getetag>
        <C:calendar-data>BEGIN:VCALENDAR&#13;
VERSION:2.0&#13;
PRODID:-//Example//EN&#13;
BEGIN:VEVENT&#13;
UID:second&#13;
DTSTAMP:20240101T000000Z&#13;
DTSTART:20240105T090000Z&#13;
DTEND:20240105T100000Z&#13;
SUMMARY:Tom &amp; Jerry&#13;
END:VEVENT&#13;
END:VCALENDAR&#13;
</C:calendar-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/calendars/user/work/first.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"etag-1"</D:getetag>
        <C:calendar-data><![CDATA[BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example//EN
BEGIN:VEVENT
UID:first
DTSTAMP:20240101T000000Z
DTSTART:20240103T090000Z
DURATION:PT30M
SUMMARY:<Standup>
END:VEVENT
END:VCALENDAR
]]></C:calendar-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

#[test]
fn response_parse_multistatus_basic() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/calendars/user/event1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"12345"</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");

    assert_eq!(response.responses.len(), 1);
    let item = &response.responses[0];
    assert_eq!(item.href.as_str(), "/calendars/user/event1.ics");
    assert_eq!(item.prop_stats.len(), 1);
    assert_eq!(item.prop_stats[0].status, "HTTP/1.1 200 OK");
    assert!(item.prop_stats[0].is_success());
    assert_eq!(
        item.prop_stats[0].props.get_etag.as_deref(),
        Some("\"12345\"")
    );
    assert!(item.prop_stats[0].props.calendar_data.is_none());
}

#[test]
fn response_two_calendar_data_decode_in_order() {
    let response =
        MultiStatusResponse::from_xml(REPORT_RESPONSE).expect("Failed to parse multistatus");
    let events = response.into_events().expect("Failed to decode events");

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].uid, "second");
    assert_eq!(events[0].summary, "Tom & Jerry");
    assert_eq!(
        events[0].date_start,
        Some(DateTime::utc("2024-01-05T09:00:00Z".parse().unwrap()))
    );
    assert_eq!(events[1].uid, "first");
    assert_eq!(events[1].summary, "<Standup>");
    assert!(events[1].duration.is_some());
}

#[test]
fn response_resources_keep_href_and_etag() {
    let response =
        MultiStatusResponse::from_xml(REPORT_RESPONSE).expect("Failed to parse multistatus");
    let resources = response.into_resources().expect("Failed to decode resources");

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].href.as_str(), "/calendars/user/work/second.ics");
    assert_eq!(resources[0].etag.as_deref(), Some("\"etag-2\""));
    assert_eq!(resources[1].href.as_str(), "/calendars/user/work/first.ics");
    assert_eq!(resources[1].events().len(), 1);
}

#[test]
fn response_skips_failed_propstats() {
    let xml = r#"<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/cal/a.ics</D:href>
    <D:propstat>
      <D:prop><D:getetag>"a"</D:getetag></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
    <D:propstat>
      <D:prop><C:calendar-data>not a calendar</C:calendar-data></D:prop>
      <D:status>HTTP/1.1 404 Not Found</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    assert_eq!(response.responses[0].prop_stats.len(), 2);
    assert!(!response.responses[0].prop_stats[1].is_success());
    assert!(response.into_events().expect("Failed to decode").is_empty());
}

#[test]
fn response_blank_calendar_data_is_an_error() {
    let xml = r#"<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/cal/a.ics</D:href>
    <D:propstat>
      <D:prop><C:calendar-data>
      </C:calendar-data></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    let err = response.into_resources().expect_err("Blank data must fail");
    assert!(matches!(err, CalDavError::InvalidResponse(_)));
}

#[test]
fn response_invalid_calendar_data_is_an_error() {
    let xml = r#"<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/cal/a.ics</D:href>
    <D:propstat>
      <D:prop><C:calendar-data>BEGIN:VCALENDAR
BEGIN:VEVENT
END:VCALENDAR</C:calendar-data></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    let err = response.into_resources().expect_err("Mismatched nesting must fail");
    assert!(matches!(
        err,
        CalDavError::Ical(IcalError::MismatchedNesting { .. })
    ));
}

#[test]
fn response_lists_calendar_collections() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav" xmlns:CS="http://calendarserver.org/ns/">
  <D:response>
    <D:href>/calendars/user/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype><D:collection/></D:resourcetype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/calendars/user/work/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Work &amp; Projects</D:displayname>
        <D:resourcetype>
          <D:collection/>
          <C:calendar/>
        </D:resourcetype>
        <C:calendar-description>Team events</C:calendar-description>
        <C:supported-calendar-component-set>
          <C:comp name="VEVENT"/>
        </C:supported-calendar-component-set>
        <CS:getctag>ctag-7</CS:getctag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
    <D:propstat>
      <D:prop><D:getetag/></D:prop>
      <D:status>HTTP/1.1 404 Not Found</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    let collections = response.into_collections();

    assert_eq!(collections.len(), 1);
    let work = &collections[0];
    assert_eq!(work.href.as_str(), "/calendars/user/work/");
    assert_eq!(work.display_name.as_deref(), Some("Work & Projects"));
    assert_eq!(work.description.as_deref(), Some("Team events"));
    assert_eq!(work.supported_components, vec!["VEVENT".to_string()]);
    assert_eq!(work.ctag.as_deref(), Some("ctag-7"));
    assert!(work.supports_events());
}

#[test]
fn response_malformed_xml_is_an_error() {
    let err = MultiStatusResponse::from_xml("<D:multistatus xmlns:D=\"DAV:\"><D:response></D:multistatus>")
        .expect_err("Mismatched end tag must fail");
    assert!(matches!(err, CalDavError::Xml(_)));
}
