// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request builders for `CalDAV` operations.
//!
//! A [`CalendarQuery`] is a tree of filters rooted at a `VCALENDAR`
//! [`ComponentFilter`]; [`CalendarQuery::to_xml`] renders it as the body of a
//! `calendar-query` REPORT (RFC 4791 Section 7.8).

use std::io::Cursor;

use davcal_ical::DateTime;
use davcal_ical::keyword::{KW_VCALENDAR, KW_VEVENT};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::CalDavError;
use crate::xml::ns;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// PROPFIND request builder.
#[derive(Debug)]
pub struct PropFindRequest {
    props: Vec<Prop>,
}

/// Properties to request in PROPFIND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    /// Display name.
    DisplayName,
    /// Resource type.
    ResourceType,
    /// `ETag`.
    GetETag,
    /// Collection tag.
    GetCTag,
    /// Content type.
    GetContentType,
    /// Calendar data.
    CalendarData,
    /// Calendar home set.
    CalendarHomeSet,
    /// Supported calendar components.
    SupportedCalendarComponents,
    /// Calendar description.
    CalendarDescription,
    /// Calendar timezone.
    CalendarTimezone,
}

impl Prop {
    const fn name(self) -> &'static str {
        match self {
            Self::DisplayName => "displayname",
            Self::ResourceType => "resourcetype",
            Self::GetETag => "getetag",
            Self::GetCTag => "getctag",
            Self::GetContentType => "getcontenttype",
            Self::CalendarData => "calendar-data",
            Self::CalendarHomeSet => "calendar-home-set",
            Self::SupportedCalendarComponents => "supported-calendar-component-set",
            Self::CalendarDescription => "calendar-description",
            Self::CalendarTimezone => "calendar-timezone",
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::DisplayName | Self::ResourceType | Self::GetETag | Self::GetContentType => "D",
            Self::GetCTag => "CS",
            Self::CalendarData
            | Self::CalendarHomeSet
            | Self::SupportedCalendarComponents
            | Self::CalendarDescription
            | Self::CalendarTimezone => "C",
        }
    }
}

impl PropFindRequest {
    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Adds a property to the request.
    pub fn add_property(&mut self, prop: Prop) -> &mut Self {
        self.props.push(prop);
        self
    }

    /// The properties requested so far.
    #[must_use]
    pub fn properties(&self) -> &[Prop] {
        &self.props
    }

    /// Builds the XML body for the PROPFIND request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <D:propfind xmlns:D="DAV:">
        let mut propfind = BytesStart::new("D:propfind");
        propfind.push_attribute(("xmlns:D", ns::DAV));
        if self.props.iter().any(|p| p.prefix() == "C") {
            propfind.push_attribute(("xmlns:C", ns::CALDAV));
        }
        if self.props.iter().any(|p| p.prefix() == "CS") {
            propfind.push_attribute(("xmlns:CS", ns::CALENDARSERVER));
        }
        writer.write_event(Event::Start(propfind))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &self.props {
            let tag = format!("{}:{}", prop.prefix(), prop.name());
            writer.write_event(Event::Start(BytesStart::new(tag.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::End(BytesEnd::new("D:propfind")))?;
        into_string(writer)
    }
}

impl Default for PropFindRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of the `Depth` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Depth {
    /// The resource only.
    Zero,
    /// The resource and its direct members.
    #[default]
    One,
    /// The resource and all its descendants.
    Infinity,
}

impl Depth {
    /// The header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

/// A time range in UTC. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl TimeRange {
    /// A closed range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not a UTC date-time or `end` is
    /// before `start`.
    pub fn new(start: DateTime, end: DateTime) -> Result<Self, CalDavError> {
        require_utc("start", &start)?;
        require_utc("end", &end)?;
        if end.to_timestamp() < start.to_timestamp() {
            return Err(CalDavError::InvalidTimeRange(format!(
                "end {end} is before start {start}"
            )));
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    /// A range open towards the future.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not a UTC date-time.
    pub fn starting(start: DateTime) -> Result<Self, CalDavError> {
        require_utc("start", &start)?;
        Ok(Self {
            start: Some(start),
            end: None,
        })
    }

    /// A range open towards the past.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not a UTC date-time.
    pub fn ending(end: DateTime) -> Result<Self, CalDavError> {
        require_utc("end", &end)?;
        Ok(Self {
            start: None,
            end: Some(end),
        })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    fn element(&self, tag: &str) -> BytesStart<'static> {
        let mut elem = BytesStart::new(tag.to_string());
        if let Some(start) = &self.start {
            elem.push_attribute(("start", start.to_string().as_str()));
        }
        if let Some(end) = &self.end {
            elem.push_attribute(("end", end.to_string().as_str()));
        }
        elem
    }
}

fn require_utc(bound: &str, value: &DateTime) -> Result<(), CalDavError> {
    match value.is_utc() {
        true => Ok(()),
        false => Err(CalDavError::InvalidTimeRange(format!(
            "{bound} must be a UTC date-time, got {value}"
        ))),
    }
}

/// Collation used by a [`TextMatch`] (RFC 4790).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    /// Byte-wise comparison, `i;octet`.
    Octet,
    /// ASCII case-insensitive comparison, `i;ascii-casemap`.
    AsciiCaseMap,
}

impl Collation {
    /// The collation identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Octet => "i;octet",
            Self::AsciiCaseMap => "i;ascii-casemap",
        }
    }
}

/// Substring match on a property or parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    /// Text to search for.
    pub content: String,
    /// Collation to use; the server default when `None`.
    pub collation: Option<Collation>,
    /// Whether to negate the match.
    pub negate: bool,
}

impl TextMatch {
    /// A match on `content` with the server's default collation.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            collation: None,
            negate: false,
        }
    }

    /// Sets the collation.
    #[must_use]
    pub const fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = Some(collation);
        self
    }

    /// Inverts the match.
    #[must_use]
    pub const fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut elem = BytesStart::new("C:text-match");
        if let Some(collation) = self.collation {
            elem.push_attribute(("collation", collation.as_str()));
        }
        if self.negate {
            elem.push_attribute(("negate-condition", "yes"));
        }
        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Text(BytesText::new(&self.content)))?;
        writer.write_event(Event::End(BytesEnd::new("C:text-match")))?;
        Ok(())
    }
}

/// Filter on a parameter of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFilter {
    /// Parameter name.
    pub name: String,
    /// Match only properties without this parameter.
    pub is_not_defined: bool,
    /// Match on the parameter value.
    pub text_match: Option<TextMatch>,
}

impl ParameterFilter {
    /// Matches properties carrying the parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_not_defined: false,
            text_match: None,
        }
    }

    /// Matches parameters whose value contains `content`.
    #[must_use]
    pub fn matching(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            text_match: Some(TextMatch::new(content)),
            ..Self::new(name)
        }
    }

    /// Matches properties lacking the parameter.
    #[must_use]
    pub const fn not_defined(mut self) -> Self {
        self.is_not_defined = true;
        self
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut elem = BytesStart::new("C:param-filter");
        elem.push_attribute(("name", self.name.as_str()));
        writer.write_event(Event::Start(elem))?;
        if self.is_not_defined {
            writer.write_event(Event::Empty(BytesStart::new("C:is-not-defined")))?;
        } else if let Some(text_match) = &self.text_match {
            text_match.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("C:param-filter")))?;
        Ok(())
    }
}

/// Filter on a property of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    /// Property name.
    pub name: String,
    /// Match only components without this property.
    pub is_not_defined: bool,
    /// Match date-time values within a range.
    pub time_range: Option<TimeRange>,
    /// Match on the property value.
    pub text_match: Option<TextMatch>,
    /// Filters on the parameters of the property.
    pub parameters: Vec<ParameterFilter>,
}

impl PropertyFilter {
    /// Matches components carrying the property.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_not_defined: false,
            time_range: None,
            text_match: None,
            parameters: Vec::new(),
        }
    }

    /// Matches properties whose value contains `content`.
    #[must_use]
    pub fn matching(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name).with_text_match(TextMatch::new(content))
    }

    /// Matches components lacking the property.
    #[must_use]
    pub const fn not_defined(mut self) -> Self {
        self.is_not_defined = true;
        self
    }

    /// Sets the time range.
    #[must_use]
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Sets the text match.
    #[must_use]
    pub fn with_text_match(mut self, text_match: TextMatch) -> Self {
        self.text_match = Some(text_match);
        self
    }

    /// Adds a parameter filter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterFilter) -> Self {
        self.parameters.push(parameter);
        self
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut elem = BytesStart::new("C:prop-filter");
        elem.push_attribute(("name", self.name.as_str()));
        writer.write_event(Event::Start(elem))?;
        if self.is_not_defined {
            writer.write_event(Event::Empty(BytesStart::new("C:is-not-defined")))?;
        } else {
            if let Some(time_range) = &self.time_range {
                writer.write_event(Event::Empty(time_range.element("C:time-range")))?;
            } else if let Some(text_match) = &self.text_match {
                text_match.write(writer)?;
            }
            for parameter in &self.parameters {
                parameter.write(writer)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("C:prop-filter")))?;
        Ok(())
    }
}

/// Filter on a component and, through nesting, on its sub-components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFilter {
    /// Component name, such as `VEVENT`.
    pub name: String,
    /// Match only when no such component exists.
    pub is_not_defined: bool,
    /// Match components overlapping a range.
    pub time_range: Option<TimeRange>,
    /// Filters on nested components.
    pub components: Vec<ComponentFilter>,
    /// Filters on properties.
    pub properties: Vec<PropertyFilter>,
}

impl ComponentFilter {
    /// Matches any component with this name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_not_defined: false,
            time_range: None,
            components: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Matches when the component is absent.
    #[must_use]
    pub const fn not_defined(mut self) -> Self {
        self.is_not_defined = true;
        self
    }

    /// Sets the time range.
    #[must_use]
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Adds a nested component filter.
    #[must_use]
    pub fn with_component(mut self, component: ComponentFilter) -> Self {
        self.components.push(component);
        self
    }

    /// Adds a property filter.
    #[must_use]
    pub fn with_property(mut self, property: PropertyFilter) -> Self {
        self.properties.push(property);
        self
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut elem = BytesStart::new("C:comp-filter");
        elem.push_attribute(("name", self.name.as_str()));
        writer.write_event(Event::Start(elem))?;
        if self.is_not_defined {
            writer.write_event(Event::Empty(BytesStart::new("C:is-not-defined")))?;
        } else {
            if let Some(time_range) = &self.time_range {
                writer.write_event(Event::Empty(time_range.element("C:time-range")))?;
            }
            for property in &self.properties {
                property.write(writer)?;
            }
            for component in &self.components {
                component.write(writer)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("C:comp-filter")))?;
        Ok(())
    }
}

/// The `filter` element of a calendar query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Root filter, normally on `VCALENDAR`.
    pub component: ComponentFilter,
}

/// What a calendar query returns for each match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDataRequest {
    /// Request the `ETag` of each resource.
    pub etag: bool,
    /// Ask the server to expand recurrences within a range.
    pub expand: Option<TimeRange>,
    /// Ask the server to limit overridden instances to a range.
    pub limit_recurrence_set: Option<TimeRange>,
}

/// A `calendar-query` REPORT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    /// Requested properties.
    pub prop: CalendarDataRequest,
    /// Match conditions.
    pub filter: Filter,
}

impl CalendarQuery {
    /// A query returning calendar data and `ETag`s of the resources that
    /// match `component`.
    #[must_use]
    pub fn new(component: ComponentFilter) -> Self {
        Self {
            prop: CalendarDataRequest {
                etag: true,
                ..CalendarDataRequest::default()
            },
            filter: Filter { component },
        }
    }

    /// Events overlapping `[start, end)`, with recurrences expanded by the
    /// server.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not in UTC or the range is
    /// reversed.
    pub fn event_range(start: DateTime, end: DateTime) -> Result<Self, CalDavError> {
        let range = TimeRange::new(start, end)?;
        let events = ComponentFilter::new(KW_VEVENT).with_time_range(range.clone());
        let mut query = Self::new(ComponentFilter::new(KW_VCALENDAR).with_component(events));
        query.prop.expand = Some(range);
        Ok(query)
    }

    /// Restricts the query to the resource holding `uid`.
    ///
    /// The match is added to the innermost component filter.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        let uid = TextMatch::new(uid).with_collation(Collation::Octet);
        push_innermost(
            &mut self.filter.component,
            PropertyFilter::new("UID").with_text_match(uid),
        );
        self
    }

    /// Builds the XML body for the REPORT request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn to_xml(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <C:calendar-query xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
        let mut calendar_query = BytesStart::new("C:calendar-query");
        calendar_query.push_attribute(("xmlns:D", ns::DAV));
        calendar_query.push_attribute(("xmlns:C", ns::CALDAV));
        writer.write_event(Event::Start(calendar_query))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        if self.prop.etag {
            writer.write_event(Event::Start(BytesStart::new("D:getetag")))?;
            writer.write_event(Event::End(BytesEnd::new("D:getetag")))?;
        }
        writer.write_event(Event::Start(BytesStart::new("C:calendar-data")))?;
        if let Some(expand) = &self.prop.expand {
            writer.write_event(Event::Empty(expand.element("C:expand")))?;
        }
        if let Some(limit) = &self.prop.limit_recurrence_set {
            writer.write_event(Event::Empty(limit.element("C:limit-recurrence-set")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("C:calendar-data")))?;
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::Start(BytesStart::new("C:filter")))?;
        self.filter.component.write(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("C:filter")))?;

        writer.write_event(Event::End(BytesEnd::new("C:calendar-query")))?;
        into_string(writer)
    }
}

fn push_innermost(filter: &mut ComponentFilter, property: PropertyFilter) {
    match filter.components.last_mut() {
        Some(inner) => push_innermost(inner, property),
        None => filter.properties.push(property),
    }
}

fn into_string(writer: XmlWriter) -> Result<String, CalDavError> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))
}
