// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The property model: one `NAME[;PARAM=VALUE...]:VALUE` content line plus the
//! metadata that decides how an empty value is treated.
//!
//! A [`Property`] is produced in two ways. On encode, [`Property::from_annotation`]
//! turns a field declaration into a skeleton that is later filled by the field
//! value. On decode, the tokenizer produces properties carrying only the raw
//! name, parameters and value.

use std::borrow::Cow;
use std::fmt::Write;

/// Ordered property parameters with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the value of a parameter, comparing keys case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a parameter, replacing an existing one with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = canonical_name(&key.into());
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Removes a parameter and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(key))?;
        Some(self.0.remove(index).1)
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Params {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// A single iCalendar property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Canonical (upper-case, hyphenated) property name.
    pub name: String,
    /// Encoded value, already escaped for the wire.
    pub value: String,
    /// Property parameters.
    pub params: Params,
    /// Omit the property when its value is empty.
    pub omit_empty: bool,
    /// Fail encoding when the value is empty and there is no default.
    pub required: bool,
    /// Value used when the field value is empty.
    pub default_value: Option<String>,
}

impl Property {
    /// Creates a property with a name and an encoded value.
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: canonical_name(name),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Derives a property skeleton from a field declaration.
    ///
    /// The annotation is a comma-separated list: the first token overrides the
    /// property name (empty uses the field name), the second is `omitempty`,
    /// `required`, or a literal default value. An annotation of `-` skips the
    /// field and yields `None`.
    ///
    /// ```
    /// use davcal_ical::Property;
    ///
    /// let prop = Property::from_annotation("date_stamp", "dtstamp,required").unwrap();
    /// assert_eq!(prop.name, "DTSTAMP");
    /// assert!(prop.required);
    ///
    /// let prop = Property::from_annotation("last_modified", ",omitempty").unwrap();
    /// assert_eq!(prop.name, "LAST-MODIFIED");
    ///
    /// assert!(Property::from_annotation("cache", "-").is_none());
    /// ```
    #[must_use]
    pub fn from_annotation(field: &str, annotation: &str) -> Option<Self> {
        if annotation == "-" {
            return None;
        }

        // The default value may itself contain commas, so split once.
        let (name, option) = match annotation.split_once(',') {
            Some((name, option)) => (name, Some(option)),
            None => (annotation, None),
        };
        let name = if name.is_empty() { field } else { name };

        let mut prop = Self {
            name: canonical_name(name),
            ..Self::default()
        };
        match option {
            Some("omitempty") => prop.omit_empty = true,
            Some("required") => prop.required = true,
            Some("") | None => {}
            Some(default) => prop.default_value = Some(default.to_string()),
        }
        Some(prop)
    }

    /// Returns `true` if both a name and a value are present.
    #[must_use]
    pub fn has_name_and_value(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }

    /// Overlays another property onto this one.
    ///
    /// A non-empty name or value in `other` replaces the current one, and its
    /// parameters are added. Flags and defaults are kept.
    pub fn merge(&mut self, other: Self) {
        if !other.name.is_empty() {
            self.name = other.name;
        }
        if !other.value.is_empty() {
            self.value = other.value;
        }
        self.params.extend(other.params.0);
    }

    /// Renders the content line, without the line terminator.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut line = sanitize_name(&self.name);
        for (key, value) in self.params.iter() {
            let _ = write!(line, ";{}={}", sanitize_name(key), sanitize_param_value(value));
        }
        line.push(':');
        line.push_str(&self.value);
        line
    }
}

/// Upper-cases a name and replaces underscores with hyphens.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase().replace('_', "-")
}

/// Canonicalizes a name for output and escapes colons.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    canonical_name(name).replace(':', "\\:")
}

/// Reverses [`sanitize_name`] on a decoded name.
#[must_use]
pub fn desanitize_name(name: &str) -> String {
    name.replace("\\:", ":").to_ascii_uppercase()
}

fn sanitize_param_value(value: &str) -> Cow<'_, str> {
    let value = if value.contains('"') {
        Cow::Owned(value.replace('"', "'"))
    } else {
        Cow::Borrowed(value)
    };
    if value.contains([':', ';', ',']) {
        Cow::Owned(format!("\"{value}\""))
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_tokens() {
        let prop = Property::from_annotation("uid", ",required").unwrap();
        assert_eq!(prop.name, "UID");
        assert!(prop.required);
        assert!(!prop.omit_empty);

        let prop = Property::from_annotation("date_end", "dtend,omitempty").unwrap();
        assert_eq!(prop.name, "DTEND");
        assert!(prop.omit_empty);

        let prop = Property::from_annotation("version", ",2.0").unwrap();
        assert_eq!(prop.default_value.as_deref(), Some("2.0"));

        let prop = Property::from_annotation("prod_id", "prodid,-//a,b//EN").unwrap();
        assert_eq!(prop.name, "PRODID");
        assert_eq!(prop.default_value.as_deref(), Some("-//a,b//EN"));

        let prop = Property::from_annotation("summary", "").unwrap();
        assert_eq!(prop, Property::new("SUMMARY", ""));
    }

    #[test]
    fn encodes_params_and_sanitizes_name() {
        let mut prop = Property::new("x_foo:bar", "value");
        prop.params.insert("cn", "Foo Bar");
        prop.params.insert("x-list", "a,b");
        prop.params.insert("x-quote", "say \"hi\"");
        assert_eq!(
            prop.encode(),
            "X-FOO\\:BAR;CN=Foo Bar;X-LIST=\"a,b\";X-QUOTE=say 'hi':value"
        );
        assert_eq!(desanitize_name("x-foo\\:bar"), "X-FOO:BAR");
    }

    #[test]
    fn merge_overrides_name_value_and_params() {
        let mut base = Property::from_annotation("organizer", ",omitempty").unwrap();
        let mut hooked = Property::new("", "MAILTO:foo@bar.com");
        hooked.params.insert("CN", "Foo");
        base.merge(hooked);

        assert_eq!(base.name, "ORGANIZER");
        assert!(base.omit_empty);
        assert!(base.has_name_and_value());
        assert_eq!(base.params.get("cn"), Some("Foo"));
    }

    #[test]
    fn params_replace_case_insensitively() {
        let mut params: Params = [("tzid", "Europe/Paris")].into_iter().collect();
        params.insert("TZID", "Asia/Tokyo");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("Tzid"), Some("Asia/Tokyo"));
        assert_eq!(params.remove("tzid").as_deref(), Some("Asia/Tokyo"));
        assert!(params.is_empty());
    }
}
