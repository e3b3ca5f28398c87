// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT escaping as defined in RFC 5545 Section 3.3.11, and comma separated
//! text lists.

use std::fmt;

use crate::error::ValueError;
use crate::value::PropertyValue;

/// Escapes backslash, semicolon, comma and newline.
///
/// CRLF pairs are folded into a single escaped newline.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' if chars.peek() == Some(&'\n') => {}
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_text`].
///
/// `\N` is accepted as a newline. Unknown escapes keep the escaped character,
/// and a trailing lone backslash is kept as is.
#[must_use]
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }
    out
}

/// Splits a list on unescaped commas and unescapes every item.
#[must_use]
pub fn split_text_list(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => {
                items.push(unescape_text(text.get(start..i).unwrap_or_default()));
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(unescape_text(text.get(start..).unwrap_or_default()));
    items
}

/// A comma separated list of text values, e.g. CATEGORIES or RESOURCES.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvList(pub Vec<String>);

impl CsvList {
    /// Creates a list from its items.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// Iterates over the items.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for CsvList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&escape_text(item))?;
        }
        Ok(())
    }
}

impl PropertyValue for CsvList {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self(split_text_list(raw)))
    }
}

impl<S: Into<String>> FromIterator<S> for CsvList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
