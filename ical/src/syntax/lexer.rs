// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for the head of a content line (name and parameters).
//!
//! Only the part before the first unquoted colon is tokenized. The value is
//! taken verbatim from the remainder of the line, so colons, semicolons and
//! commas inside it never need escaping at this level.

use std::iter::Peekable;

use logos::Logos;

use crate::error::IcalError;
use crate::property::{Params, desanitize_name};

/// Token emitted while scanning the head of a content line.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Logos)]
pub(crate) enum HeadToken<'a> {
    /// Semicolon (;), starts a parameter
    #[token(";")]
    Semicolon,

    /// Colon (:), ends the head
    #[token(":")]
    Colon,

    /// Equal sign (=), separates a parameter name from its values
    #[token("=")]
    Equal,

    /// Comma (,), separates parameter values
    #[token(",")]
    Comma,

    /// Double-quoted parameter value, quotes included
    #[regex(r#""[^"]*""#)]
    Quoted(&'a str),

    /// Any run of characters that are not delimiters, `\x` escapes included
    #[regex(r#"([^;:,="\\]|\\.)+"#)]
    Text(&'a str),
}

/// One unfolded content line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentLine {
    /// Physical line number where the logical line starts.
    pub line: usize,
    /// Desanitized, upper-cased name.
    pub name: String,
    /// Parameters in source order.
    pub params: Params,
    /// Raw value, everything after the first unquoted colon.
    pub value: String,
}

/// Splits a logical line into name, parameters and value.
pub(crate) fn scan_line(src: &str, line: usize) -> Result<ContentLine, IcalError> {
    let malformed = |reason: &str| IcalError::MalformedLine {
        line,
        reason: reason.to_string(),
    };

    let mut lexer = HeadToken::lexer(src);
    let mut head = Vec::new();
    loop {
        match lexer.next() {
            Some(Ok(HeadToken::Colon)) => break,
            Some(Ok(token)) => head.push(token),
            Some(Err(())) => return Err(malformed("unterminated quoted parameter value")),
            None => return Err(malformed("missing ':' between name and value")),
        }
    }
    let value = lexer.remainder().to_string();

    let mut tokens = head.into_iter().peekable();
    let name = match tokens.next() {
        Some(HeadToken::Text(name)) if !name.trim().is_empty() => desanitize_name(name.trim()),
        _ => return Err(malformed("missing property name")),
    };

    let mut params = Params::new();
    while let Some(token) = tokens.next() {
        if token != HeadToken::Semicolon {
            return Err(malformed("expected ';' before parameter"));
        }
        let key = match tokens.next() {
            Some(HeadToken::Text(key)) if !key.trim().is_empty() => key.trim(),
            _ => return Err(malformed("missing parameter name")),
        };
        if tokens.next() != Some(HeadToken::Equal) {
            return Err(malformed("expected '=' after parameter name"));
        }
        let values = scan_param_values(&mut tokens);
        params.insert(key, values.join(","));
    }

    Ok(ContentLine {
        line,
        name,
        params,
        value,
    })
}

fn scan_param_values<'a, I>(tokens: &mut Peekable<I>) -> Vec<String>
where
    I: Iterator<Item = HeadToken<'a>>,
{
    let mut values = Vec::new();
    loop {
        let value = match tokens.peek() {
            Some(HeadToken::Quoted(s)) => {
                let value = s.trim_matches('"').to_string();
                tokens.next();
                value
            }
            // paramtext may contain '=', e.g. `X-KEY=a=b`
            _ => {
                let mut value = String::new();
                while let Some(token) =
                    tokens.next_if(|t| matches!(t, HeadToken::Text(_) | HeadToken::Equal))
                {
                    match token {
                        HeadToken::Text(s) => value.push_str(s),
                        _ => value.push('='),
                    }
                }
                value.trim().to_string()
            }
        };
        values.push(value);

        if tokens.next_if_eq(&HeadToken::Comma).is_none() {
            return values;
        }
    }
}
