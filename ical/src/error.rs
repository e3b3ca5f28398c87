// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for encoding and decoding iCalendar data.

/// Errors raised by the marshal and unmarshal engine.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum IcalError {
    /// The input contained no content lines at all.
    #[error("no iCalendar content to decode")]
    EmptyInput,

    /// A content line could not be split into name, parameters and value.
    #[error("malformed content line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number where the unfolded line starts.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A BEGIN line was never closed.
    #[error("unmatched BEGIN:{name} (component not closed)")]
    UnmatchedBegin {
        /// Component name from the BEGIN line.
        name: String,
    },

    /// An END line had no open component.
    #[error("unmatched END:{name} (no corresponding BEGIN)")]
    UnmatchedEnd {
        /// Component name from the END line.
        name: String,
    },

    /// An END line closed a different component than the innermost open one.
    #[error("mismatched nesting: expected END:{expected}, found END:{found}")]
    MismatchedNesting {
        /// The innermost open component.
        expected: String,
        /// The component named by the END line.
        found: String,
    },

    /// The decoded component does not have the tag of the target type.
    #[error("expected component {expected}, found {found}")]
    TagMismatch {
        /// Tag of the target type.
        expected: String,
        /// Tag found in the input.
        found: String,
    },

    /// No component with the target tag was found.
    #[error("no {tag} component found")]
    MissingComponent {
        /// Tag of the target type.
        tag: String,
    },

    /// A single-valued target received several components.
    #[error("expected a single {tag} component, found {count}")]
    TooManyComponents {
        /// Tag of the target type.
        tag: String,
        /// Number of components found.
        count: usize,
    },

    /// A bare value was decoded from input without exactly one property line.
    #[error("expected a single property line, found {count}")]
    PropertyCount {
        /// Number of top-level properties found.
        count: usize,
    },

    /// A bare value has no property name to be emitted under.
    #[error("value of type {type_name} has no property name")]
    Unnamed {
        /// Rust type name of the value.
        type_name: &'static str,
    },

    /// A required property had neither a value nor a default.
    #[error("missing value for required property {name}")]
    MissingRequired {
        /// Property name.
        name: String,
    },

    /// A property value could not be decoded or failed validation.
    #[error("invalid {property} value: {source}")]
    InvalidValue {
        /// Property name.
        property: String,
        /// Underlying value error.
        #[source]
        source: ValueError,
    },

    /// A component failed validation.
    #[error("invalid {tag}: {source}")]
    InvalidComponent {
        /// Component tag.
        tag: String,
        /// Underlying value error.
        #[source]
        source: ValueError,
    },

    /// An error raised while processing a field.
    #[error("field `{field}`: {source}")]
    Field {
        /// Rust field name.
        field: &'static str,
        /// Underlying error.
        #[source]
        source: Box<IcalError>,
    },

    /// An error raised inside a component.
    #[error("{tag}: {source}")]
    Component {
        /// Component tag.
        tag: String,
        /// Underlying error.
        #[source]
        source: Box<IcalError>,
    },
}

impl IcalError {
    /// Attaches the name of the field being processed.
    #[must_use]
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Attaches the tag of the component being processed.
    #[must_use]
    pub fn in_component(self, tag: &str) -> Self {
        Self::Component {
            tag: tag.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping field and component context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Field { source, .. } | Self::Component { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}

/// Errors raised by value validation and value parsing.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Latitude outside [-90, 90].
    #[error("latitude must be between -90 and 90 degrees, got {0}")]
    Latitude(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude must be between -180 and 180 degrees, got {0}")]
    Longitude(f64),

    /// Not a usable calendar user address.
    #[error("malformed mail address '{0}'")]
    MailAddress(String),

    /// Both DTEND and DURATION are set.
    #[error("end date and duration are mutually exclusive")]
    EndAndDuration,

    /// Neither DTEND nor DURATION is set.
    #[error("end date or duration must be set")]
    MissingEnd,

    /// An event without start date was added to a calendar without method.
    #[error("start date must be set when the calendar has no method")]
    MissingStart,

    /// Both COUNT and UNTIL are set on a recurrence rule.
    #[error("recurrence rule COUNT and UNTIL are mutually exclusive")]
    CountAndUntil,

    /// A numeric recurrence rule part is out of range.
    #[error("recurrence rule {part} value {value} is out of range")]
    RuleOutOfRange {
        /// Rule part name, e.g. `BYMONTH`.
        part: &'static str,
        /// Offending value.
        value: i64,
    },

    /// PRIORITY outside 0 to 9.
    #[error("priority must be between 0 and 9, got {0}")]
    Priority(i64),

    /// A recurrence rule has no FREQ part.
    #[error("recurrence rule requires FREQ")]
    MissingFrequency,

    /// TZID does not name a known time zone.
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),

    /// The text could not be parsed as the expected kind of value.
    #[error("invalid {kind} '{value}'")]
    Parse {
        /// Kind of value expected, e.g. `DATE-TIME`.
        kind: &'static str,
        /// Raw text.
        value: String,
    },
}

impl ValueError {
    pub(crate) fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_renders_nesting_path() {
        let err = IcalError::InvalidValue {
            property: "GEO".to_string(),
            source: ValueError::Latitude(-91.0),
        }
        .in_field("geo")
        .in_component("VEVENT")
        .in_field("events")
        .in_component("VCALENDAR");

        let message = err.to_string();
        assert!(message.starts_with("VCALENDAR: field `events`: VEVENT: field `geo`:"));
        assert!(message.contains("latitude"));
        assert!(matches!(err.root_cause(), IcalError::InvalidValue { .. }));
    }
}
