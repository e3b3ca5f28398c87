// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Encoding of components and values into iCalendar text.

use crate::component::Component;
use crate::error::IcalError;
use crate::keyword::{CRLF, KW_BEGIN, KW_END};
use crate::value::PropertyValue;

/// Types that can be written as iCalendar content lines.
///
/// Implemented by every type declared with [`component!`](crate::component),
/// by property values that name their own property, and by slices, vectors
/// and options of those.
pub trait Marshal {
    /// Appends the unfolded content lines of `self`.
    ///
    /// # Errors
    ///
    /// Fails if a value is invalid or a required property is missing.
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError>;
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        (**self).marshal_into(lines)
    }
}

impl<T: Marshal> Marshal for Option<T> {
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        match self {
            Some(value) => value.marshal_into(lines),
            None => Ok(()),
        }
    }
}

impl<T: Marshal> Marshal for [T] {
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        self.iter().try_for_each(|value| value.marshal_into(lines))
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        self.as_slice().marshal_into(lines)
    }
}

/// Output options of [`marshal_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarshalOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    pub folding: Option<usize>,
}

impl MarshalOptions {
    /// Folds lines at 75 octets as recommended by RFC 5545.
    #[must_use]
    pub const fn folded() -> Self {
        Self { folding: Some(75) }
    }

    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }
}

/// Encodes a value into iCalendar text with CRLF line endings and no folding.
///
/// An absent value (`None`, an empty slice) encodes to an empty string.
///
/// # Errors
///
/// Fails if a value is invalid, a component fails validation, a required
/// property is missing, or a bare value has no property name.
pub fn marshal<T: Marshal + ?Sized>(value: &T) -> Result<String, IcalError> {
    marshal_with(value, MarshalOptions::default())
}

/// Encodes a value into iCalendar text with the given options.
///
/// # Errors
///
/// See [`marshal`].
pub fn marshal_with<T: Marshal + ?Sized>(
    value: &T,
    options: MarshalOptions,
) -> Result<String, IcalError> {
    let mut lines = Vec::new();
    value.marshal_into(&mut lines)?;
    tracing::trace!(lines = lines.len(), "marshalled content lines");

    let text = match options.folding {
        Some(width) => lines
            .iter()
            .map(|line| fold_line(line, width))
            .collect::<Vec<_>>()
            .join(CRLF),
        None => lines.join(CRLF),
    };
    Ok(text)
}

/// Writes a component as a BEGIN/END block around its fields.
///
/// # Errors
///
/// Fails if the component or one of its fields is invalid.
pub fn encode_component<C: Component>(
    component: &C,
    lines: &mut Vec<String>,
) -> Result<(), IcalError> {
    let tag = component.encode_tag();
    component
        .validate()
        .map_err(|source| IcalError::InvalidComponent {
            tag: tag.clone(),
            source,
        })?;

    lines.push(format!("{KW_BEGIN}:{tag}"));
    component
        .encode_fields(lines)
        .map_err(|err| err.in_component(&tag))?;
    lines.push(format!("{KW_END}:{tag}"));
    Ok(())
}

/// Writes a bare value as a single content line named by its own hooks.
///
/// # Errors
///
/// Fails if the value is invalid or does not name its property.
pub fn encode_value<V: PropertyValue>(value: &V, lines: &mut Vec<String>) -> Result<(), IcalError> {
    if value.is_empty() {
        return Ok(());
    }

    let prop = value.to_property();
    if prop.name.is_empty() {
        return Err(IcalError::Unnamed {
            type_name: std::any::type_name::<V>(),
        });
    }
    value
        .validate()
        .map_err(|source| IcalError::InvalidValue {
            property: prop.name.clone(),
            source,
        })?;
    if prop.has_name_and_value() {
        lines.push(prop.encode());
    }
    Ok(())
}

/// Folds a line so that no physical line exceeds `width` octets, counting
/// the leading space of continuation lines. Splits only on UTF-8 boundaries.
fn fold_line(line: &str, width: usize) -> String {
    let width = width.max(5);
    if line.len() <= width {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / width * 3);
    let mut rest = line;
    let mut limit = width;
    while rest.len() > limit {
        let at = floor_char_boundary(rest, limit);
        let (head, tail) = rest.split_at(at);
        folded.push_str(head);
        folded.push_str(CRLF);
        folded.push(' ');
        rest = tail;
        limit = width - 1;
    }
    folded.push_str(rest);
    folded
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
