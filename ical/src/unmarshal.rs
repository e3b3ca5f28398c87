// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of iCalendar text into components and values.

use crate::component::Component;
use crate::error::IcalError;
use crate::property::Property;
use crate::syntax::{Token, tokenize};
use crate::value::PropertyValue;

/// Types that can be read back from a tokenized document.
pub trait Unmarshal: Sized {
    /// Decodes `Self` from the unnamed root of a tokenized document.
    ///
    /// # Errors
    ///
    /// Fails if the document does not contain what `Self` expects or a value
    /// cannot be decoded.
    fn unmarshal_token(root: &Token) -> Result<Self, IcalError>;
}

impl<C: Component> Unmarshal for Vec<C> {
    fn unmarshal_token(root: &Token) -> Result<Self, IcalError> {
        root.children().map(hydrate_component).collect()
    }
}

/// Decodes iCalendar text.
///
/// A component target takes the single top-level component, which must carry
/// its tag. A vector of components takes every top-level component. A bare
/// value takes the single top-level property line.
///
/// # Errors
///
/// Fails on malformed text, unbalanced BEGIN/END, a tag mismatch, a wrong
/// number of top-level components, or an undecodable value.
pub fn unmarshal<T: Unmarshal>(text: &str) -> Result<T, IcalError> {
    let root = tokenize(text)?;
    T::unmarshal_token(&root)
}

/// Decodes the single top-level component of a document.
///
/// # Errors
///
/// Fails if there is no such component, if it has a different tag, or if
/// there are several of them.
pub fn decode_component<C: Component>(root: &Token) -> Result<C, IcalError> {
    let tag = C::default().encode_tag();
    match root.components(&tag) {
        [token] => hydrate_component(token),
        [] => match root.children().next() {
            Some(other) => Err(IcalError::TagMismatch {
                expected: tag,
                found: other.name.clone(),
            }),
            None => Err(IcalError::MissingComponent { tag }),
        },
        many => Err(IcalError::TooManyComponents {
            tag,
            count: many.len(),
        }),
    }
}

/// Fills a fresh component from a token carrying its tag.
///
/// # Errors
///
/// Fails if the token has another tag or a field cannot be decoded.
pub fn hydrate_component<C: Component>(token: &Token) -> Result<C, IcalError> {
    let mut component = C::default();
    let tag = component.encode_tag();
    if !token.name.eq_ignore_ascii_case(&tag) {
        return Err(IcalError::TagMismatch {
            expected: tag,
            found: token.name.clone(),
        });
    }
    component
        .decode_fields(token)
        .map_err(|err| err.in_component(&tag))?;
    Ok(component)
}

/// Decodes a bare value from the single top-level property of a document.
///
/// # Errors
///
/// Fails if the document does not hold exactly one top-level property, the
/// property has a different name than the value type emits, or the value
/// cannot be decoded.
pub fn decode_bare<V: PropertyValue>(root: &Token) -> Result<V, IcalError> {
    let mut props = root.properties.values().flatten();
    let (Some(prop), None) = (props.next(), props.next()) else {
        return Err(IcalError::PropertyCount {
            count: root.properties.values().map(Vec::len).sum(),
        });
    };

    let value: V = decode_property_value(prop)?;
    if let Some(name) = value.encode_name()
        && !name.eq_ignore_ascii_case(&prop.name)
    {
        return Err(IcalError::TagMismatch {
            expected: name.to_string(),
            found: prop.name.clone(),
        });
    }
    Ok(value)
}

/// Decodes the value and parameters of a property, then validates the result.
///
/// # Errors
///
/// Returns [`IcalError::InvalidValue`] naming the property.
pub fn decode_property_value<V: PropertyValue>(prop: &Property) -> Result<V, IcalError> {
    let invalid = |source| IcalError::InvalidValue {
        property: prop.name.clone(),
        source,
    };
    let mut value = V::decode_value(&prop.value).map_err(invalid)?;
    value.decode_params(&prop.params).map_err(invalid)?;
    value.validate().map_err(invalid)?;
    Ok(value)
}
