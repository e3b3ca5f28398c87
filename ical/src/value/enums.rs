// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Enumerated property values.

use crate::error::ValueError;
use crate::value::PropertyValue;

/// Access classification (CLASS), RFC 5545 Section 3.8.1.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Classification {
    /// Visible to everyone.
    Public,
    /// Visible to the owner only.
    Private,
    /// Only busy time is visible.
    Confidential,
}

/// Event status (STATUS), RFC 5545 Section 3.8.1.11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum EventStatus {
    /// Indicates event is tentative.
    Tentative,
    /// Indicates event is definite.
    Confirmed,
    /// Indicates event was cancelled.
    Cancelled,
}

/// Time transparency (TRANSP), RFC 5545 Section 3.8.2.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TimeTransparency {
    /// Blocks time on busy time searches.
    Opaque,
    /// Transparent on busy time searches.
    Transparent,
}

/// Scheduling method (METHOD), RFC 5546 Section 1.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    /// Post notification of an event.
    Publish,
    /// Make a request for an event.
    Request,
    /// Reply to an event request.
    Reply,
    /// Add one or more instances to an existing event.
    Add,
    /// Cancel one or more instances of an existing event.
    Cancel,
    /// Request an updated event.
    Refresh,
    /// Counter a request with an alternative proposal.
    Counter,
    /// Decline a counter proposal.
    DeclineCounter,
}

macro_rules! impl_enum_value {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn decode_value(raw: &str) -> Result<Self, ValueError> {
                    raw.trim().parse().map_err(|_| ValueError::parse($kind, raw))
                }
            }
        )+
    };
}

impl_enum_value!(
    Classification => "CLASS",
    EventStatus => "STATUS",
    TimeTransparency => "TRANSP",
    Method => "METHOD",
);
