// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! CAL-ADDRESS values for the ORGANIZER and ATTENDEE properties.

use std::fmt;
use std::marker::PhantomData;

use crate::error::ValueError;
use crate::keyword::{KW_ATTENDEE, KW_CN, KW_ORGANIZER, MAILTO};
use crate::property::Params;
use crate::value::PropertyValue;

/// A person reachable by e-mail, optionally with a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Contact {
    /// Display name, emitted as the `CN` parameter.
    pub name: Option<String>,
    /// Mail address without the `mailto:` scheme.
    pub email: String,
}

impl Contact {
    /// A contact with only a mail address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// A contact with a display name.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    /// Parses `Display Name <local@domain>` or a bare `local@domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mail address is malformed.
    pub fn parse(s: &str) -> Result<Self, ValueError> {
        let s = s.trim();
        let contact = match s.strip_suffix('>').and_then(|rest| rest.rsplit_once('<')) {
            Some((name, email)) => {
                let name = name.trim().trim_matches('"').trim();
                Self {
                    name: (!name.is_empty()).then(|| name.to_string()),
                    email: email.trim().to_string(),
                }
            }
            None => Self::new(s),
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Checks that the mail address has the form `local@domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mail address is malformed.
    pub fn validate(&self) -> Result<(), ValueError> {
        let error = || ValueError::MailAddress(self.email.clone());
        let (local, domain) = self.email.split_once('@').ok_or_else(error)?;
        let valid = !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !self
                .email
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | ',' | ';' | ':'));
        if valid { Ok(()) } else { Err(error()) }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// The property a [`CalendarUser`] is emitted under.
pub trait Role {
    /// Property name.
    const PROPERTY: &'static str;
}

/// Marker for ORGANIZER.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OrganizerRole;

impl Role for OrganizerRole {
    const PROPERTY: &'static str = KW_ORGANIZER;
}

/// Marker for ATTENDEE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttendeeRole;

impl Role for AttendeeRole {
    const PROPERTY: &'static str = KW_ATTENDEE;
}

/// A calendar user address, e.g. `ORGANIZER;CN=Foo Bar:MAILTO:foo@bar.com`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CalendarUser<R> {
    /// The person behind the address.
    pub contact: Contact,
    role: PhantomData<R>,
}

/// The organizer of an event.
pub type Organizer = CalendarUser<OrganizerRole>;

/// An attendee of an event.
pub type Attendee = CalendarUser<AttendeeRole>;

impl<R> CalendarUser<R> {
    /// Wraps a contact.
    #[must_use]
    pub const fn new(contact: Contact) -> Self {
        Self {
            contact,
            role: PhantomData,
        }
    }
}

impl<R> From<Contact> for CalendarUser<R> {
    fn from(contact: Contact) -> Self {
        Self::new(contact)
    }
}

impl<R: Role> fmt::Display for CalendarUser<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MAILTO}:{}", self.contact.email)
    }
}

impl<R: Role> PropertyValue for CalendarUser<R> {
    fn validate(&self) -> Result<(), ValueError> {
        self.contact.validate()
    }

    fn encode_name(&self) -> Option<&'static str> {
        Some(R::PROPERTY)
    }

    fn encode_params(&self) -> Params {
        self.contact
            .name
            .iter()
            .map(|name| (KW_CN, name.as_str()))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.contact.email.is_empty()
    }

    fn decode_value(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        let email = match raw.split_at_checked(MAILTO.len() + 1) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("mailto:") => rest,
            _ => raw,
        };
        Ok(Self::new(Contact::new(email)))
    }

    fn decode_params(&mut self, params: &Params) -> Result<(), ValueError> {
        self.contact.name = params.get(KW_CN).map(ToString::to_string);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mail_addresses() {
        let contact = Contact::parse("Foo Bar <foo@bar.com>").unwrap();
        assert_eq!(contact, Contact::with_name("Foo Bar", "foo@bar.com"));
        assert_eq!(contact.to_string(), "Foo Bar <foo@bar.com>");

        assert_eq!(Contact::parse("foo@bar.com").unwrap(), Contact::new("foo@bar.com"));

        for bad in ["", "foo", "@bar.com", "foo@", "foo bar@baz.com", "a@b@c", "foo@.com"] {
            assert!(Contact::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn organizer_hooks() {
        let organizer = Organizer::new(Contact::with_name("Foo Bar", "foo@bar.com"));
        assert_eq!(
            organizer.to_property().encode(),
            "ORGANIZER;CN=Foo Bar:MAILTO:foo@bar.com"
        );

        let attendee = Attendee::new(Contact::new("foo@bar.com"));
        assert_eq!(attendee.to_property().encode(), "ATTENDEE:MAILTO:foo@bar.com");
    }

    #[test]
    fn decodes_scheme_case_insensitively() {
        let params: Params = [("CN", "Fakebiz Shared")].into_iter().collect();
        let mut attendee = Attendee::decode_value("mailto:shared@group.example.com").unwrap();
        attendee.decode_params(&params).unwrap();
        assert!(attendee.validate().is_ok());
        assert_eq!(
            attendee.contact,
            Contact::with_name("Fakebiz Shared", "shared@group.example.com")
        );
    }
}
