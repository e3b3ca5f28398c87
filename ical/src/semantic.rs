// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Strongly-typed components of a CalDAV calendar object resource, declared
//! with [`component!`](crate::component) so that their wire form follows from
//! the field metadata.

mod icalendar;
mod vevent;
mod vtimezone;

pub use icalendar::Calendar;
pub use vevent::Event;
pub use vtimezone::TimeZone;
