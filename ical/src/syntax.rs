// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax analysis for iCalendar text, no types.
//!
//! # Architecture
//!
//! ```text
//! Source → Unfold → Lexer → Content Lines → Tree Builder → Token
//! ```
//!
//! 1. **Unfold**: joins folded lines and drops blank ones, accepting both
//!    CRLF and bare LF line endings
//! 2. **Lexer**: splits every logical line into name, parameters and value
//! 3. **Tree Builder**: turns BEGIN/END pairs into a nested [`Token`]

mod lexer;
mod tree_builder;

pub use tree_builder::Token;

use crate::error::IcalError;
use crate::syntax::lexer::scan_line;
use crate::syntax::tree_builder::build_tree;

/// Tokenizes iCalendar text into a tree rooted at an unnamed [`Token`].
///
/// ```
/// let root = davcal_ical::tokenize("BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n").unwrap();
/// let calendar = &root.components("VCALENDAR")[0];
/// assert_eq!(calendar.property("VERSION").unwrap().value, "2.0");
/// ```
///
/// # Errors
///
/// Fails on empty input, malformed content lines and unbalanced BEGIN/END.
pub fn tokenize(src: &str) -> Result<Token, IcalError> {
    let lines = unfold(src)
        .into_iter()
        .map(|(line, text)| scan_line(&text, line))
        .collect::<Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        return Err(IcalError::EmptyInput);
    }
    tracing::trace!(lines = lines.len(), "scanned content lines");
    build_tree(lines)
}

/// Joins folded lines, keeping the physical line number each logical line
/// starts at.
fn unfold(src: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (i, raw) in src.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t'])
            && let Some((_, last)) = lines.last_mut()
        {
            last.push_str(rest);
            continue;
        }
        if raw.trim().is_empty() {
            continue;
        }
        lines.push((i + 1, raw.to_string()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_crlf_and_lf() {
        let lines = unfold("DESCRIPTION:This is a lo\r\n ng description\r\n\tthat exists\r\n\r\nUID:1\n");
        assert_eq!(
            lines,
            [
                (1, "DESCRIPTION:This is a long descriptionthat exists".to_string()),
                (5, "UID:1".to_string()),
            ]
        );
    }

    #[test]
    fn folding_keeps_multibyte_characters() {
        let root = tokenize("SUMMARY:caf\r\n é\r\n").unwrap();
        assert_eq!(root.property("SUMMARY").unwrap().value, "café");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(tokenize(""), Err(IcalError::EmptyInput)));
        assert!(matches!(tokenize("\r\n\n  \n"), Err(IcalError::EmptyInput)));
    }

    #[test]
    fn reports_physical_line_numbers() {
        let err = tokenize("BEGIN:VEVENT\n\nBROKEN\nEND:VEVENT").unwrap_err();
        assert!(matches!(err, IcalError::MalformedLine { line: 3, .. }), "{err}");
    }
}
