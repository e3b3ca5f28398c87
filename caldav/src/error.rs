// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcal_ical::IcalError;
use reqwest::StatusCode;

use crate::types::Href;

/// `CalDAV` client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CalDavError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// XML parsing/writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// iCalendar encoding or decoding error.
    #[error("iCalendar error: {0}")]
    Ical(#[from] IcalError),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(Href),

    /// Precondition failed (`ETag` mismatch).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The server answered with a status the operation does not accept.
    #[error("unexpected status {status} returned from provider, expected {expected}: {body}")]
    UnexpectedStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Accepted statuses.
        expected: String,
        /// Response body, possibly empty.
        body: String,
    },

    /// Server doesn't send a DAV header.
    #[error("Server does not support WebDAV: missing DAV header")]
    NotACalDavServer,

    /// Invalid response from server.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server doesn't support required capability.
    #[error("Server doesn't support required capability: {0}")]
    UnsupportedCapability(String),

    /// A query time range is not in UTC or is reversed.
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

impl From<reqwest::Error> for CalDavError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<quick_xml::Error> for CalDavError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for CalDavError {
    fn from(e: quick_xml::encoding::EncodingError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::io::Error> for CalDavError {
    fn from(e: std::io::Error) -> Self {
        Self::Xml(format!("IO error: {e}"))
    }
}
