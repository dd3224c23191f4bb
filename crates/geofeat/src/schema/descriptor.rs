// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property descriptors: named, cardinality-bounded slots.

use std::fmt;
use std::sync::Arc;

use crate::property::PropertyValue;

use super::{Name, PropertyType, TypeError, TypeKind};

/// Upper multiplicity bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    /// At most this many occurrences.
    Bounded(u32),
    /// No upper bound.
    Unbounded,
}

impl Occurs {
    /// Whether `count` occurrences satisfy this bound.
    pub fn admits(&self, count: usize) -> bool {
        match self {
            Self::Bounded(max) => count <= *max as usize,
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(max) => write!(f, "{}", max),
            Self::Unbounded => write!(f, "*"),
        }
    }
}

/// A named slot binding a [`PropertyType`] into a containing complex type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub(super) name: Name,
    pub(super) ty: Arc<PropertyType>,
    pub(super) min_occurs: u32,
    pub(super) max_occurs: Occurs,
    pub(super) nillable: bool,
    pub(super) default_value: Option<PropertyValue>,
}

impl PropertyDescriptor {
    /// Create a descriptor, validating its invariants.
    ///
    /// Fails when the name is empty, when `min_occurs` exceeds a bounded
    /// `max_occurs`, or when the slot is non-nillable with no explicit
    /// default and no default can be synthesized for the bound type
    /// (complex bindings have no synthesized default).
    pub fn new(
        name: Name,
        ty: Arc<PropertyType>,
        min_occurs: u32,
        max_occurs: Occurs,
        nillable: bool,
        default_value: Option<PropertyValue>,
    ) -> Result<Self, TypeError> {
        if name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        if let Occurs::Bounded(max) = max_occurs {
            if min_occurs > max {
                return Err(TypeError::InvalidMultiplicity {
                    name,
                    min: min_occurs,
                    max,
                });
            }
        }
        if !nillable && default_value.is_none() && matches!(ty.kind(), TypeKind::Complex { .. }) {
            return Err(TypeError::UnsupportedBinding { name });
        }
        Ok(Self {
            name,
            ty,
            min_occurs,
            max_occurs,
            nillable,
            default_value,
        })
    }

    /// A single-valued (`1..1`), nillable descriptor with no default.
    pub fn single(name: Name, ty: Arc<PropertyType>) -> Result<Self, TypeError> {
        Self::new(name, ty, 1, Occurs::Bounded(1), true, None)
    }

    /// The slot name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The bound type.
    pub fn ty(&self) -> &Arc<PropertyType> {
        &self.ty
    }

    /// Lower multiplicity bound.
    pub fn min_occurs(&self) -> u32 {
        self.min_occurs
    }

    /// Upper multiplicity bound.
    pub fn max_occurs(&self) -> Occurs {
        self.max_occurs
    }

    /// Whether the explicit null value is admitted.
    pub fn is_nillable(&self) -> bool {
        self.nillable
    }

    /// Declared default, if any.
    pub fn default_value(&self) -> Option<&PropertyValue> {
        self.default_value.as_ref()
    }

    /// Whether multiplicity is exactly `1..1`.
    pub fn is_single(&self) -> bool {
        self.min_occurs == 1 && self.max_occurs == Occurs::Bounded(1)
    }

    /// Whether the bound type is geometry-kind.
    pub fn is_geometry(&self) -> bool {
        self.ty.is_geometry()
    }

    /// Whether the bound type is complex.
    pub fn is_complex(&self) -> bool {
        self.ty.is_complex()
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}..{}]",
            self.name,
            self.ty.name(),
            self.min_occurs,
            self.max_occurs
        )
    }
}
