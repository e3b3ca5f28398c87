// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component schemas and the [`component!`](crate::component) declaration macro.
//!
//! A component is a struct whose fields are tagged either as properties or as
//! nested components. The macro records that metadata once and derives the
//! field-by-field encoder and decoder from it, so the struct definition is the
//! only place where the mapping lives.
//!
//! ```
//! use davcal_ical::{Component, marshal, unmarshal};
//!
//! davcal_ical::component! {
//!     /// A to-do list.
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Checklist {
//!         pub title: String => property("summary,required"),
//!         pub items: Vec<String> => property("x-item"),
//!         pub done: bool => property("x-done,omitempty"),
//!     }
//! }
//!
//! impl Component for Checklist {}
//!
//! let list = Checklist {
//!     title: "Groceries".to_string(),
//!     items: vec!["milk".to_string(), "eggs".to_string()],
//!     done: false,
//! };
//! let text = marshal(&list).unwrap();
//! assert_eq!(
//!     text,
//!     "BEGIN:VCHECKLIST\r\nSUMMARY:Groceries\r\nX-ITEM:milk\r\nX-ITEM:eggs\r\nEND:VCHECKLIST"
//! );
//! assert_eq!(unmarshal::<Checklist>(&text).unwrap(), list);
//! ```

use crate::error::{IcalError, ValueError};
use crate::syntax::Token;

/// Field metadata of a component, generated by [`component!`](crate::component).
pub trait Schema {
    /// Rust type name, used to derive the default tag.
    const TYPE_NAME: &'static str;

    /// Appends the content lines of every field, in declaration order.
    ///
    /// # Errors
    ///
    /// Fails if a field cannot be encoded, with the field name attached.
    fn encode_fields(&self, lines: &mut Vec<String>) -> Result<(), IcalError>;

    /// Fills every field from the properties and children of `token`.
    ///
    /// # Errors
    ///
    /// Fails if a field cannot be decoded, with the field name attached.
    fn decode_fields(&mut self, token: &Token) -> Result<(), IcalError>;
}

/// Hooks of a component. Declare the struct with [`component!`](crate::component)
/// and implement this trait, overriding hooks where needed.
pub trait Component: Schema + Default {
    /// Tag written on the BEGIN and END lines; `V` plus the upper-cased type
    /// name unless overridden.
    fn encode_tag(&self) -> String {
        format!("V{}", Self::TYPE_NAME.to_ascii_uppercase())
    }

    /// Checks cross-field rules before the component is encoded.
    ///
    /// # Errors
    ///
    /// Returns the violated rule.
    fn validate(&self) -> Result<(), ValueError> {
        Ok(())
    }
}

/// Declares a component struct together with its field metadata.
///
/// Every field ends with `=> property("annotation")` or `=> component`.
/// The annotation is `name,option`: `name` overrides the property name (empty
/// uses the field name, upper-cased, `_` becoming `-`), and `option` is
/// `omitempty`, `required`, or a literal default value. `=> property("-")`
/// skips the field, and `=> property` alone is the same as `property("")`.
///
/// The macro implements [`Schema`], [`Marshal`](crate::Marshal) and
/// [`Unmarshal`](crate::Unmarshal); the type must also implement
/// [`Component`] and [`Default`].
#[macro_export]
macro_rules! component {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $kind:ident $(($annotation:literal))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Schema for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn encode_fields(
                &self,
                lines: &mut ::std::vec::Vec<::std::string::String>,
            ) -> ::std::result::Result<(), $crate::IcalError> {
                $(
                    $crate::__component_field!(
                        encode $kind, self.$field, $field, [$($annotation)?], lines
                    );
                )*
                ::std::result::Result::Ok(())
            }

            fn decode_fields(
                &mut self,
                token: &$crate::Token,
            ) -> ::std::result::Result<(), $crate::IcalError> {
                $(
                    $crate::__component_field!(
                        decode $kind, self.$field, $field, [$($annotation)?], token
                    );
                )*
                ::std::result::Result::Ok(())
            }
        }

        impl $crate::Marshal for $name {
            fn marshal_into(
                &self,
                lines: &mut ::std::vec::Vec<::std::string::String>,
            ) -> ::std::result::Result<(), $crate::IcalError> {
                $crate::encode_component(self, lines)
            }
        }

        impl $crate::Unmarshal for $name {
            fn unmarshal_token(
                root: &$crate::Token,
            ) -> ::std::result::Result<Self, $crate::IcalError> {
                $crate::decode_component(root)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __component_field {
    (encode property, $value:expr, $field:ident, [$($annotation:literal)?], $lines:ident) => {
        if let ::std::option::Option::Some(skeleton) = $crate::Property::from_annotation(
            stringify!($field),
            $crate::__annotation!($($annotation)?),
        ) {
            $crate::PropertyField::encode_property(&$value, &skeleton, $lines)
                .map_err(|err| err.in_field(stringify!($field)))?;
        }
    };
    (decode property, $value:expr, $field:ident, [$($annotation:literal)?], $token:ident) => {
        if let ::std::option::Option::Some(skeleton) = $crate::Property::from_annotation(
            stringify!($field),
            $crate::__annotation!($($annotation)?),
        ) {
            $crate::PropertyField::decode_property(&mut $value, &skeleton, $token)
                .map_err(|err| err.in_field(stringify!($field)))?;
        }
    };
    (encode component, $value:expr, $field:ident, [], $lines:ident) => {
        $crate::ComponentField::encode_components(&$value, $lines)
            .map_err(|err| err.in_field(stringify!($field)))?;
    };
    (decode component, $value:expr, $field:ident, [], $token:ident) => {
        $crate::ComponentField::decode_components(&mut $value, $token)
            .map_err(|err| err.in_field(stringify!($field)))?;
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __annotation {
    () => {
        ""
    };
    ($annotation:literal) => {
        $annotation
    };
}
