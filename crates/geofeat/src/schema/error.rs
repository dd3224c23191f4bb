// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for schema construction and derivation.
//!
//! `TypeError` covers malformed type construction; `SchemaError` covers
//! failures when deriving from or constraining already-built types. All
//! are fail-fast: the caller fixes the input and retries, nothing is
//! retried automatically and no half-built type is ever observable.

use std::fmt;

use crate::geom::CrsParseError;

use super::Name;

/// Malformed type construction.
#[derive(Debug, Clone)]
pub enum TypeError {
    /// A type or descriptor was given an empty local name.
    EmptyName,
    /// Attaching the super type would make the type its own ancestor.
    AncestorCycle {
        /// Name of the type whose super chain loops.
        name: Name,
    },
    /// Two descriptors in one complex type share a name.
    DuplicateDescriptor {
        /// The colliding descriptor name.
        name: Name,
    },
    /// `min_occurs` exceeds a bounded `max_occurs`.
    InvalidMultiplicity {
        /// The offending descriptor name.
        name: Name,
        /// Declared minimum.
        min: u32,
        /// Declared bounded maximum.
        max: u32,
    },
    /// The named default geometry is missing or not geometry-kind.
    DefaultGeometryNotFound {
        /// The name that failed to resolve.
        name: Name,
    },
    /// An SRID string could not be decoded to an EPSG code.
    InvalidSrid(CrsParseError),
    /// No default value can be synthesized for the descriptor's binding.
    UnsupportedBinding {
        /// The descriptor whose binding has no default.
        name: Name,
    },
    /// A type-spec token named a binding not present in the vocabulary or
    /// the caller's registry.
    UnknownTypeToken {
        /// The unresolved token.
        token: String,
    },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Type name must not be empty"),
            Self::AncestorCycle { name } => {
                write!(f, "Type {} would be its own ancestor", name)
            }
            Self::DuplicateDescriptor { name } => {
                write!(f, "Duplicate descriptor name: {}", name)
            }
            Self::InvalidMultiplicity { name, min, max } => {
                write!(f, "Descriptor {}: min {} exceeds max {}", name, min, max)
            }
            Self::DefaultGeometryNotFound { name } => {
                write!(f, "Default geometry {} is not a geometry descriptor", name)
            }
            Self::InvalidSrid(err) => write!(f, "{}", err),
            Self::UnsupportedBinding { name } => {
                write!(f, "No default value mapping for descriptor {}", name)
            }
            Self::UnknownTypeToken { token } => {
                write!(f, "Unknown type token: {:?}", token)
            }
        }
    }
}

impl std::error::Error for TypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSrid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CrsParseError> for TypeError {
    fn from(err: CrsParseError) -> Self {
        Self::InvalidSrid(err)
    }
}

/// Failures deriving from or constraining already-built types.
#[derive(Debug, Clone)]
pub enum SchemaError {
    /// A named property does not exist in the source type.
    PropertyNotFound {
        /// The missing property name.
        name: Name,
        /// Rendering of the full source type, for diagnostics.
        schema: String,
    },
    /// The caller requested a simple type but the descriptors violate the
    /// flat, single-valued, single-level constraint.
    NotSimple {
        /// The type being built.
        name: Name,
        /// First descriptor that broke the constraint.
        offender: Name,
    },
    /// A descriptor's multiplicity is not exactly one in a simple build.
    Multiplicity {
        /// The offending descriptor name.
        name: Name,
    },
    /// Underlying type construction error.
    Type(TypeError),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyNotFound { name, schema } => {
                write!(f, "Property not found: {} in type {}", name, schema)
            }
            Self::NotSimple { name, offender } => {
                write!(
                    f,
                    "Type {} is not simple: descriptor {} is multi-valued or nested",
                    name, offender
                )
            }
            Self::Multiplicity { name } => {
                write!(f, "Simple type requires multiplicity 1..1 on {}", name)
            }
            Self::Type(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Type(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TypeError> for SchemaError {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}
