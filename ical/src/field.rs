// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! How a field of a component is encoded and decoded, by field shape.
//!
//! Property fields come in three shapes: optional (`Option<V>`), repeated
//! (`Vec<V>`) and plain scalars whose default value means "empty". Component
//! fields are either optional or repeated.

use crate::component::Component;
use crate::error::IcalError;
use crate::marshal::{Marshal, encode_component, encode_value};
use crate::property::Property;
use crate::syntax::Token;
use crate::unmarshal::{Unmarshal, decode_bare, decode_property_value, hydrate_component};
use crate::value::{
    CalendarUser, Classification, CsvList, DateTime, DateTimeList, Duration, EventStatus, Geo,
    Method, Priority, PropertyValue, RecurrenceRule, Role, TimeTransparency, Uri,
};

/// A component field holding one or more property values.
pub trait PropertyField {
    /// Appends the content lines of the field, starting from the skeleton
    /// derived from its annotation.
    ///
    /// # Errors
    ///
    /// Fails if a value is invalid or a required value is missing.
    fn encode_property(&self, skeleton: &Property, lines: &mut Vec<String>)
    -> Result<(), IcalError>;

    /// Reads the field from the properties of `token` named by the skeleton.
    /// An absent property leaves the field untouched.
    ///
    /// # Errors
    ///
    /// Fails if a present value cannot be decoded.
    fn decode_property(&mut self, skeleton: &Property, token: &Token) -> Result<(), IcalError>;
}

/// A component field holding nested components.
pub trait ComponentField {
    /// Appends the nested components as BEGIN/END blocks.
    ///
    /// # Errors
    ///
    /// Fails if a nested component cannot be encoded.
    fn encode_components(&self, lines: &mut Vec<String>) -> Result<(), IcalError>;

    /// Reads the nested components of `token` carrying the child tag.
    ///
    /// # Errors
    ///
    /// Fails if a nested component cannot be decoded, or if a single-valued
    /// field meets several of them.
    fn decode_components(&mut self, token: &Token) -> Result<(), IcalError>;
}

/// Encodes one value over a skeleton, falling back to the default value,
/// then to a required-field error, and otherwise skipping the line.
fn encode_one<V: PropertyValue>(
    skeleton: &Property,
    value: Option<&V>,
    lines: &mut Vec<String>,
) -> Result<(), IcalError> {
    let mut prop = skeleton.clone();
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        value
            .validate()
            .map_err(|source| IcalError::InvalidValue {
                property: skeleton.name.clone(),
                source,
            })?;
        prop.merge(value.to_property());
    }

    if prop.value.is_empty() {
        match prop.default_value.take() {
            Some(default) => prop.value = default,
            None if prop.required => return Err(IcalError::MissingRequired { name: prop.name }),
            None => return Ok(()),
        }
    }
    lines.push(prop.encode());
    Ok(())
}

/// The first property named by the skeleton; later duplicates are dropped.
fn first_property<'a>(skeleton: &Property, token: &'a Token) -> Option<&'a Property> {
    let props = token.properties(&skeleton.name);
    if props.len() > 1 {
        tracing::warn!(
            property = %skeleton.name,
            count = props.len(),
            "property occurs more than once, keeping the first"
        );
    }
    props.first()
}

impl<V: PropertyValue> PropertyField for Option<V> {
    fn encode_property(
        &self,
        skeleton: &Property,
        lines: &mut Vec<String>,
    ) -> Result<(), IcalError> {
        encode_one(skeleton, self.as_ref(), lines)
    }

    fn decode_property(&mut self, skeleton: &Property, token: &Token) -> Result<(), IcalError> {
        if let Some(prop) = first_property(skeleton, token) {
            *self = Some(decode_property_value(prop)?);
        }
        Ok(())
    }
}

impl<V: PropertyValue> PropertyField for Vec<V> {
    fn encode_property(
        &self,
        skeleton: &Property,
        lines: &mut Vec<String>,
    ) -> Result<(), IcalError> {
        if self.is_empty() {
            return encode_one::<V>(skeleton, None, lines);
        }
        self.iter()
            .try_for_each(|value| encode_one(skeleton, Some(value), lines))
    }

    fn decode_property(&mut self, skeleton: &Property, token: &Token) -> Result<(), IcalError> {
        for prop in token.properties(&skeleton.name) {
            self.push(decode_property_value(prop)?);
        }
        Ok(())
    }
}

macro_rules! impl_scalar_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PropertyField for $ty {
                fn encode_property(
                    &self,
                    skeleton: &Property,
                    lines: &mut Vec<String>,
                ) -> Result<(), IcalError> {
                    encode_one(skeleton, Some(self), lines)
                }

                fn decode_property(
                    &mut self,
                    skeleton: &Property,
                    token: &Token,
                ) -> Result<(), IcalError> {
                    if let Some(prop) = first_property(skeleton, token) {
                        *self = decode_property_value(prop)?;
                    }
                    Ok(())
                }
            }
        )+
    };
}

impl_scalar_field!(
    String,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    CsvList,
    DateTimeList,
    Priority,
);

impl<C: Component> ComponentField for Option<C> {
    fn encode_components(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        match self {
            Some(component) => encode_component(component, lines),
            None => Ok(()),
        }
    }

    fn decode_components(&mut self, token: &Token) -> Result<(), IcalError> {
        let tag = C::default().encode_tag();
        match token.components(&tag) {
            [] => {}
            [child] => *self = Some(hydrate_component(child)?),
            many => {
                return Err(IcalError::TooManyComponents {
                    tag,
                    count: many.len(),
                });
            }
        }
        Ok(())
    }
}

impl<C: Component> ComponentField for Vec<C> {
    fn encode_components(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        self.iter()
            .try_for_each(|component| encode_component(component, lines))
    }

    fn decode_components(&mut self, token: &Token) -> Result<(), IcalError> {
        let tag = C::default().encode_tag();
        for child in token.components(&tag) {
            self.push(hydrate_component(child)?);
        }
        Ok(())
    }
}

macro_rules! impl_bare_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Marshal for $ty {
                fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
                    encode_value(self, lines)
                }
            }

            impl Unmarshal for $ty {
                fn unmarshal_token(root: &Token) -> Result<Self, IcalError> {
                    decode_bare(root)
                }
            }
        )+
    };
}

// Values that name their own property can be written and read on their own.
// The rest fail with `IcalError::Unnamed` when marshalled bare.
impl_bare_value!(
    Classification,
    CsvList,
    DateTime,
    DateTimeList,
    Duration,
    EventStatus,
    Geo,
    Method,
    RecurrenceRule,
    TimeTransparency,
    Uri,
);

impl<R: Role> Marshal for CalendarUser<R> {
    fn marshal_into(&self, lines: &mut Vec<String>) -> Result<(), IcalError> {
        encode_value(self, lines)
    }
}

impl<R: Role> Unmarshal for CalendarUser<R> {
    fn unmarshal_token(root: &Token) -> Result<Self, IcalError> {
        decode_bare(root)
    }
}
