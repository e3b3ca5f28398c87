// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for WebDAV/CalDAV operations.

use davcal_ical::{Calendar, Event, unmarshal};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use reqwest::StatusCode;

use crate::error::CalDavError;
use crate::types::{CalendarCollection, CalendarResource, ETag, Href};
use crate::xml::append_text;

/// `WebDAV` multistatus response.
#[derive(Debug, Clone, Default)]
pub struct MultiStatusResponse {
    /// The response items.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone, Default)]
pub struct ResponseItem {
    /// The resource the response is about.
    pub href: Href,
    /// Properties grouped by status.
    pub prop_stats: Vec<PropStat>,
    /// Status of the whole resource, used instead of propstats.
    pub status: Option<String>,
}

/// Property stat with status and value.
#[derive(Debug, Clone, Default)]
pub struct PropStat {
    /// Properties sharing the status.
    pub props: Properties,
    /// Status line, such as `HTTP/1.1 200 OK`.
    pub status: String,
}

impl PropStat {
    /// The status code of the status line.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        parse_status(&self.status)
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code().is_some_and(|s| s.is_success())
    }
}

/// WebDAV/CalDAV properties.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    /// `DAV:displayname`.
    pub display_name: Option<String>,
    /// `DAV:getetag`.
    pub get_etag: Option<ETag>,
    /// `CS:getctag`.
    pub get_ctag: Option<ETag>,
    /// `DAV:getcontenttype`.
    pub get_content_type: Option<String>,
    /// Raw iCalendar text of `C:calendar-data`.
    pub calendar_data: Option<String>,
    /// `C:calendar-home-set`.
    pub calendar_home_set: Option<Href>,
    /// Component names of `C:supported-calendar-component-set`.
    pub supported_calendar_components: Option<Vec<String>>,
    /// `C:calendar-description`.
    pub calendar_description: Option<String>,
    /// `C:calendar-timezone`.
    pub calendar_timezone: Option<String>,
    /// The resource type contains `C:calendar`.
    pub is_calendar: bool,
    /// The resource type contains `DAV:collection`.
    pub is_collection: bool,
}

impl Properties {
    /// Stores the text of a closed leaf element, returning `false` if the
    /// element is not a known property.
    fn assign(&mut self, element: &[u8], value: String, in_home_set: bool) -> bool {
        match element {
            b"href" if in_home_set => self.calendar_home_set = Some(Href::new(value)),
            b"displayname" => self.display_name = Some(value),
            b"getetag" => self.get_etag = Some(ETag::new(value)),
            b"getctag" => self.get_ctag = Some(ETag::new(value)),
            b"getcontenttype" => self.get_content_type = Some(value),
            b"calendar-data" => self.calendar_data = Some(value),
            b"calendar-description" => self.calendar_description = Some(value),
            b"calendar-timezone" => self.calendar_timezone = Some(value),
            _ => return false,
        }
        true
    }

    /// Records markers carried by element names and attributes.
    fn mark(
        &mut self,
        e: &BytesStart<'_>,
        in_resource_type: bool,
        in_component_set: bool,
    ) -> Result<(), CalDavError> {
        match e.name().local_name().into_inner() {
            b"collection" if in_resource_type => self.is_collection = true,
            b"calendar" if in_resource_type => self.is_calendar = true,
            b"comp" if in_component_set => {
                if let Ok(Some(name_attr)) = e.try_get_attribute("name") {
                    let name = std::str::from_utf8(&name_attr.value)
                        .map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))?
                        .to_string();
                    self.supported_calendar_components
                        .get_or_insert_with(Vec::new)
                        .push(name);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_status(line: &str) -> Option<StatusCode> {
    line.split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails.
    pub fn from_xml(xml: &str) -> Result<Self, CalDavError> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut responses = Vec::new();
        let mut response: Option<ResponseItem> = None;
        let mut prop_stat: Option<PropStat> = None;
        let mut in_prop = false;
        let mut in_resource_type = false;
        let mut in_home_set = false;
        let mut in_component_set = false;
        let mut text = String::new();

        loop {
            let event = reader.read_event()?;
            if append_text(&mut text, &event)? {
                continue;
            }

            match event {
                XmlEvent::Eof => break,

                XmlEvent::Start(ref e) => {
                    text.clear();
                    match e.name().local_name().into_inner() {
                        b"response" => response = Some(ResponseItem::default()),
                        b"propstat" if response.is_some() => {
                            prop_stat = Some(PropStat::default());
                        }
                        b"prop" if prop_stat.is_some() => in_prop = true,
                        b"resourcetype" if in_prop => in_resource_type = true,
                        b"calendar-home-set" if in_prop => in_home_set = true,
                        b"supported-calendar-component-set" if in_prop => in_component_set = true,
                        _ => {
                            if let Some(ps) = prop_stat.as_mut() {
                                ps.props.mark(e, in_resource_type, in_component_set)?;
                            }
                        }
                    }
                }

                XmlEvent::Empty(ref e) => {
                    if let Some(ps) = prop_stat.as_mut() {
                        ps.props.mark(e, in_resource_type, in_component_set)?;
                    }
                }

                XmlEvent::End(ref e) => {
                    let element = e.name().local_name().into_inner();
                    let value = std::mem::take(&mut text).trim().to_string();

                    if in_prop
                        && let Some(ps) = prop_stat.as_mut()
                        && ps.props.assign(element, value.clone(), in_home_set)
                    {
                        continue;
                    }

                    match element {
                        b"href" if prop_stat.is_none() => {
                            if let Some(r) = response.as_mut() {
                                r.href = Href::new(value);
                            }
                        }
                        b"status" => match (prop_stat.as_mut(), response.as_mut()) {
                            (Some(ps), _) => ps.status = value,
                            (None, Some(r)) => r.status = Some(value),
                            (None, None) => {}
                        },
                        b"resourcetype" => in_resource_type = false,
                        b"calendar-home-set" => in_home_set = false,
                        b"supported-calendar-component-set" => in_component_set = false,
                        b"prop" => in_prop = false,
                        b"propstat" => {
                            if let Some(ps) = prop_stat.take()
                                && let Some(r) = response.as_mut()
                            {
                                r.prop_stats.push(ps);
                            }
                        }
                        b"response" => {
                            if let Some(r) = response.take() {
                                responses.push(r);
                            }
                        }
                        b"multistatus" => break,
                        _ => {}
                    }
                }

                _ => {}
            }
        }

        Ok(Self { responses })
    }

    /// Converts multistatus response to calendar resources, in response
    /// order.
    ///
    /// Propstats with a non-success status are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a `calendar-data` value is blank or is not a valid
    /// calendar object.
    pub fn into_resources(self) -> Result<Vec<CalendarResource>, CalDavError> {
        let mut resources = Vec::new();

        for response in self.responses {
            for prop_stat in response.prop_stats {
                if !prop_stat.is_success() {
                    tracing::warn!(href = %response.href, status = %prop_stat.status, "skipping propstat");
                    continue;
                }

                let Some(data) = prop_stat.props.calendar_data else {
                    continue;
                };
                if data.trim().is_empty() {
                    return Err(CalDavError::InvalidResponse(format!(
                        "{}: no calendar data to decode",
                        response.href
                    )));
                }

                let calendar: Calendar = unmarshal(&data)?;
                resources.push(CalendarResource::new(
                    response.href.clone(),
                    prop_stat.props.get_etag,
                    calendar,
                ));
            }
        }

        Ok(resources)
    }

    /// Converts multistatus response to the events it carries, in response
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if a calendar object cannot be decoded.
    pub fn into_events(self) -> Result<Vec<Event>, CalDavError> {
        let resources = self.into_resources()?;
        Ok(resources
            .into_iter()
            .flat_map(|r| r.calendar.events)
            .collect())
    }

    /// Converts multistatus response to calendar collections.
    #[must_use]
    pub fn into_collections(self) -> Vec<CalendarCollection> {
        let mut collections = Vec::new();

        for response in self.responses {
            for prop_stat in response.prop_stats {
                // Only include if it's a calendar collection
                if !prop_stat.is_success() || !prop_stat.props.is_calendar {
                    continue;
                }

                let props = prop_stat.props;
                let mut collection = CalendarCollection::new(response.href.clone());
                collection.display_name = props.display_name;
                collection.description = props.calendar_description;
                collection.supported_components =
                    props.supported_calendar_components.unwrap_or_default();
                collection.ctag = props.get_ctag.or(props.get_etag);
                collections.push(collection);
            }
        }

        collections
    }

    /// The calendar home set announced by any successful propstat.
    #[must_use]
    pub fn calendar_home_set(&self) -> Option<&Href> {
        self.responses
            .iter()
            .flat_map(|r| &r.prop_stats)
            .filter(|ps| ps.is_success())
            .find_map(|ps| ps.props.calendar_home_set.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_lines() {
        assert_eq!(parse_status("HTTP/1.1 200 OK"), Some(StatusCode::OK));
        assert_eq!(
            parse_status("HTTP/1.1 404 Not Found"),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(parse_status("garbage"), None);
    }

    #[test]
    fn reads_collection_markers() {
        let xml = r#"<?xml version="1.0"?>
<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/cal/work/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype><D:collection/><C:calendar/></D:resourcetype>
        <C:supported-calendar-component-set>
          <C:comp name="VEVENT"/>
          <C:comp name="VTODO"/>
        </C:supported-calendar-component-set>
        <C:calendar-home-set><D:href>/cal/</D:href></C:calendar-home-set>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

        let resp = MultiStatusResponse::from_xml(xml).unwrap();
        let item = resp.responses.first().unwrap();
        assert_eq!(item.href.as_str(), "/cal/work/");

        let props = &item.prop_stats.first().unwrap().props;
        assert!(props.is_collection);
        assert!(props.is_calendar);
        assert_eq!(
            props.supported_calendar_components.as_deref(),
            Some(&["VEVENT".to_string(), "VTODO".to_string()][..])
        );
        assert_eq!(resp.calendar_home_set().map(Href::as_str), Some("/cal/"));
    }

    #[test]
    fn response_level_status() {
        let xml = r#"<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/cal/missing.ics</D:href>
    <D:status>HTTP/1.1 404 Not Found</D:status>
  </D:response>
</D:multistatus>"#;

        let resp = MultiStatusResponse::from_xml(xml).unwrap();
        let item = resp.responses.first().unwrap();
        assert_eq!(item.status.as_deref(), Some("HTTP/1.1 404 Not Found"));
        assert!(item.prop_stats.is_empty());
        assert!(resp.into_resources().unwrap().is_empty());
    }
}
