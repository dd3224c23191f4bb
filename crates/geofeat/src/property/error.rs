// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors for property instances.

use std::fmt;

use crate::schema::{Name, Occurs, TypeError};

/// A property instance failed validation against its descriptor.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Null value on a non-nillable slot.
    NotNillable {
        /// The slot name.
        name: Name,
    },
    /// A value outside the descriptor's binding family.
    BindingMismatch {
        /// The slot name.
        name: Name,
        /// Expected binding or type description.
        expected: String,
        /// Kind of the offending value.
        got: &'static str,
    },
    /// A restriction predicate rejected the value.
    RestrictionViolated {
        /// The slot name.
        name: Name,
    },
    /// A child carries a descriptor the declared type does not know.
    UnknownProperty {
        /// The undeclared name.
        name: Name,
    },
    /// Children do not follow the declared descriptor order.
    OutOfOrder {
        /// The out-of-place name.
        name: Name,
    },
    /// Occurrence count outside a descriptor's multiplicity.
    Multiplicity {
        /// The slot name.
        name: Name,
        /// Observed occurrence count.
        count: usize,
        /// Declared minimum.
        min: u32,
        /// Declared maximum.
        max: Occurs,
    },
    /// `set_value` with a collection of a different size.
    SizeMismatch {
        /// Current child count.
        expected: usize,
        /// Offered child count.
        got: usize,
    },
    /// Default-value synthesis failed while materializing an instance.
    DefaultSynthesis(TypeError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNillable { name } => {
                write!(f, "Property {} is not nillable", name)
            }
            Self::BindingMismatch {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Property {}: expected {}, got {}",
                    name, expected, got
                )
            }
            Self::RestrictionViolated { name } => {
                write!(f, "Property {}: value violates a restriction", name)
            }
            Self::UnknownProperty { name } => {
                write!(f, "Property {} is not declared by the type", name)
            }
            Self::OutOfOrder { name } => {
                write!(f, "Property {} is out of descriptor order", name)
            }
            Self::Multiplicity {
                name,
                count,
                min,
                max,
            } => {
                write!(
                    f,
                    "Property {}: {} occurrences outside {}..{}",
                    name, count, min, max
                )
            }
            Self::SizeMismatch { expected, got } => {
                write!(
                    f,
                    "Value swap requires {} properties, got {}",
                    expected, got
                )
            }
            Self::DefaultSynthesis(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DefaultSynthesis(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TypeError> for ValidationError {
    fn from(err: TypeError) -> Self {
        Self::DefaultSynthesis(err)
    }
}
