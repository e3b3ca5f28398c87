// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for WebDAV/CalDAV processing.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;

use crate::error::CalDavError;

/// XML namespaces used in `CalDAV`.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// `CalDAV` namespace.
    pub const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";

    /// Calendar server extensions, home of `getctag`.
    pub const CALENDARSERVER: &str = "http://calendarserver.org/ns/";
}

/// Appends the character data carried by `event` to `text`.
///
/// Text, CDATA sections and entity references all contribute, so element
/// content split by the reader around `&amp;` or `&#13;` is reassembled.
/// Returns `false` for events without character data.
///
/// # Errors
///
/// Returns an error if the data is not valid in the document encoding or an
/// entity is unknown.
pub fn append_text(text: &mut String, event: &Event<'_>) -> Result<bool, CalDavError> {
    match event {
        Event::Text(e) => text.push_str(&e.decode()?),
        Event::CData(e) => text.push_str(&e.decode()?),
        Event::GeneralRef(e) => {
            let ch = e
                .resolve_char_ref()
                .map_err(|err| CalDavError::Xml(err.to_string()))?;
            if let Some(ch) = ch {
                text.push(ch);
            } else {
                let name = e.decode()?;
                let value = resolve_predefined_entity(&name)
                    .ok_or_else(|| CalDavError::Xml(format!("unknown entity: &{name};")))?;
                text.push_str(value);
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
