// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing the component hierarchy from content lines.
//!
//! # Algorithm
//!
//! The tree builder uses a stack-based algorithm:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to parent component
//!
//! The bottom of the stack is an unnamed root, so properties outside any
//! component and several top-level components are both representable.

use std::collections::BTreeMap;

use crate::error::IcalError;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::property::{Property, canonical_name};
use crate::syntax::lexer::ContentLine;

/// A node of the decoded document: a component with its properties and
/// nested components, both grouped by upper-case name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// Component name, empty for the document root.
    pub name: String,
    /// Properties in source order, grouped by name.
    pub properties: BTreeMap<String, Vec<Property>>,
    /// Nested components in source order, grouped by name.
    pub components: BTreeMap<String, Vec<Token>>,
}

impl Token {
    /// Creates an empty node.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: canonical_name(name),
            ..Self::default()
        }
    }

    /// Returns `true` for the unnamed document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// All properties with the given name.
    #[must_use]
    pub fn properties(&self, name: &str) -> &[Property] {
        self.properties
            .get(&canonical_name(name))
            .map_or(&[], Vec::as_slice)
    }

    /// The first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties(name).first()
    }

    /// All nested components with the given name.
    #[must_use]
    pub fn components(&self, name: &str) -> &[Token] {
        self.components
            .get(&canonical_name(name))
            .map_or(&[], Vec::as_slice)
    }

    /// Iterates over every nested component.
    pub fn children(&self) -> impl Iterator<Item = &Token> {
        self.components.values().flatten()
    }

    /// Adds a property.
    pub fn push_property(&mut self, property: Property) {
        self.properties
            .entry(property.name.clone())
            .or_default()
            .push(property);
    }

    /// Adds a nested component.
    pub fn push_component(&mut self, component: Token) {
        self.components
            .entry(component.name.clone())
            .or_default()
            .push(component);
    }
}

/// Build a component tree from scanned content lines.
///
/// # Errors
///
/// Fails on BEGIN/END lines without a component name or with parameters, an
/// END without a matching BEGIN, an END that closes a different component
/// than the innermost open one, or a BEGIN left open at the end of input.
pub(crate) fn build_tree(lines: Vec<ContentLine>) -> Result<Token, IcalError> {
    let mut stack = vec![Token::default()];

    for line in lines {
        if line.name == KW_BEGIN {
            let name = component_name(&line)?;
            stack.push(Token::new(&name));
        } else if line.name == KW_END {
            let name = component_name(&line)?;
            let component = match stack.pop() {
                Some(component) if !stack.is_empty() => component,
                _ => return Err(IcalError::UnmatchedEnd { name }),
            };
            if !component.name.eq_ignore_ascii_case(&name) {
                return Err(IcalError::MismatchedNesting {
                    expected: component.name,
                    found: name,
                });
            }
            if let Some(parent) = stack.last_mut() {
                parent.push_component(component);
            }
        } else if let Some(current) = stack.last_mut() {
            current.push_property(Property {
                name: line.name,
                value: line.value,
                params: line.params,
                ..Property::default()
            });
        }
    }

    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(root),
        Some(open) => Err(IcalError::UnmatchedBegin { name: open.name }),
        None => Err(IcalError::EmptyInput),
    }
}

fn component_name(line: &ContentLine) -> Result<String, IcalError> {
    let malformed = |reason: &str| IcalError::MalformedLine {
        line: line.line,
        reason: reason.to_string(),
    };
    if !line.params.is_empty() {
        return Err(malformed("BEGIN/END must not have parameters"));
    }
    let name = line.value.trim();
    if name.is_empty() {
        return Err(malformed("BEGIN/END without a component name"));
    }
    Ok(canonical_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::scan_line;

    fn lines(src: &[&str]) -> Vec<ContentLine> {
        src.iter()
            .enumerate()
            .map(|(i, s)| scan_line(s, i + 1).unwrap())
            .collect()
    }

    #[test]
    fn nests_components() {
        let root = build_tree(lines(&[
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "BEGIN:VEVENT",
            "UID:1",
            "END:VEVENT",
            "BEGIN:VEVENT",
            "UID:2",
            "END:VEVENT",
            "END:VCALENDAR",
        ]))
        .unwrap();

        assert!(root.is_root());
        let [calendar] = root.components("VCALENDAR") else {
            panic!("expected one calendar");
        };
        assert_eq!(calendar.property("version").unwrap().value, "2.0");
        let uids: Vec<_> = calendar
            .components("VEVENT")
            .iter()
            .map(|e| e.property("UID").unwrap().value.as_str())
            .collect();
        assert_eq!(uids, ["1", "2"]);
    }

    #[test]
    fn same_named_nesting_is_tracked_by_depth() {
        let root = build_tree(lines(&[
            "BEGIN:X-NODE",
            "BEGIN:X-NODE",
            "NAME:inner",
            "END:X-NODE",
            "NAME:outer",
            "END:X-NODE",
        ]))
        .unwrap();

        let [outer] = root.components("X-NODE") else {
            panic!("expected one outer node");
        };
        assert_eq!(outer.property("NAME").unwrap().value, "outer");
        assert_eq!(outer.components("X-NODE").first().unwrap().property("NAME").unwrap().value, "inner");
    }

    #[test]
    fn end_is_case_insensitive() {
        let root = build_tree(lines(&["BEGIN:vevent", "END:VEVENT"])).unwrap();
        assert_eq!(root.components("VEVENT").len(), 1);
    }

    #[test]
    fn nesting_errors() {
        let err = build_tree(lines(&["BEGIN:VCALENDAR", "BEGIN:VEVENT", "END:VCALENDAR"]))
            .unwrap_err();
        assert!(matches!(err, IcalError::MismatchedNesting { ref expected, ref found }
            if expected == "VEVENT" && found == "VCALENDAR"));

        let err = build_tree(lines(&["END:VEVENT"])).unwrap_err();
        assert!(matches!(err, IcalError::UnmatchedEnd { .. }));

        let err = build_tree(lines(&["BEGIN:VCALENDAR", "VERSION:2.0"])).unwrap_err();
        assert!(matches!(err, IcalError::UnmatchedBegin { ref name } if name == "VCALENDAR"));

        let err = build_tree(lines(&["BEGIN;X=1:VEVENT", "END:VEVENT"])).unwrap_err();
        assert!(matches!(err, IcalError::MalformedLine { line: 1, .. }));
    }
}
