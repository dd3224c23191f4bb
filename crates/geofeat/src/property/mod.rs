// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime property instances bound to descriptors.
//!
//! A [`Property`] is one of three shapes (scalar [`Attribute`],
//! [`GeometryAttribute`], or nested [`ComplexAttribute`]), and a
//! [`Feature`] is the identified complex attribute at the root of a
//! record.

mod attribute;
mod complex;
mod error;
mod feature;
mod value;

pub use attribute::{Attribute, GeometryAttribute};
pub use complex::{ComplexAttribute, Property};
pub use error::ValidationError;
pub use feature::Feature;
pub use value::{binding_default, PropertyValue};
