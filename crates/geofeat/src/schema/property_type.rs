// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property types: the nodes of the runtime type lattice.

use std::sync::Arc;

use crate::geom::Crs;

use super::{Binding, GeometryKind, Name, PropertyDescriptor, Restriction, ScalarKind};

/// The shape of a property type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A scalar value family.
    Scalar {
        /// The scalar binding.
        binding: ScalarKind,
    },
    /// A geometry value family, optionally pinned to a CRS.
    Geometry {
        /// The geometry binding.
        binding: GeometryKind,
        /// Reference system of values of this type, when known.
        crs: Option<Crs>,
    },
    /// An ordered collection of child descriptors.
    Complex {
        /// Child slots, in declaration order.
        descriptors: Vec<Arc<PropertyDescriptor>>,
    },
}

/// A node in the type lattice.
///
/// Types are immutable once constructed and shared by `Arc`; the
/// super-type link forms a single-inheritance chain. Construct through
/// [`TypeFactory`](super::TypeFactory), which validates names and the
/// super chain.
#[derive(Debug)]
pub struct PropertyType {
    pub(super) name: Name,
    pub(super) kind: TypeKind,
    pub(super) is_abstract: bool,
    pub(super) restrictions: Vec<Restriction>,
    pub(super) super_type: Option<Arc<PropertyType>>,
    pub(super) description: Option<String>,
}

impl PropertyType {
    /// The qualified name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The shape.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Whether instances of this type may not be created directly.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Value restrictions.
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// The immediate super type.
    pub fn super_type(&self) -> Option<&Arc<PropertyType>> {
        self.super_type.as_ref()
    }

    /// Human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether this is a scalar type.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar { .. })
    }

    /// Whether this is a geometry type.
    pub fn is_geometry(&self) -> bool {
        matches!(self.kind, TypeKind::Geometry { .. })
    }

    /// Whether this is a complex type.
    pub fn is_complex(&self) -> bool {
        matches!(self.kind, TypeKind::Complex { .. })
    }

    /// The binding, for scalar and geometry types.
    pub fn binding(&self) -> Option<Binding> {
        match &self.kind {
            TypeKind::Scalar { binding } => Some(Binding::Scalar(*binding)),
            TypeKind::Geometry { binding, .. } => Some(Binding::Geometry(*binding)),
            TypeKind::Complex { .. } => None,
        }
    }

    /// The CRS, for geometry types that carry one.
    pub fn crs(&self) -> Option<Crs> {
        match &self.kind {
            TypeKind::Geometry { crs, .. } => *crs,
            _ => None,
        }
    }

    /// Child descriptors, in declaration order. Empty for non-complex
    /// types.
    pub fn descriptors(&self) -> &[Arc<PropertyDescriptor>] {
        match &self.kind {
            TypeKind::Complex { descriptors } => descriptors,
            _ => &[],
        }
    }

    /// Find a child descriptor by query name.
    pub fn descriptor(&self, name: &Name) -> Option<&Arc<PropertyDescriptor>> {
        self.descriptors().iter().find(|d| name.matches(&d.name))
    }

    /// The ordered super-type chain, from immediate parent to the root.
    ///
    /// Acyclicity is guaranteed by construction (immutable `Arc` nodes
    /// cannot be linked into a cycle after the fact); the walk still
    /// tracks visited node identities and stops on a revisit so that it
    /// terminates even if that invariant were ever broken.
    pub fn ancestors(&self) -> Vec<Arc<PropertyType>> {
        let mut chain = Vec::new();
        let mut seen: Vec<*const PropertyType> = vec![self as *const PropertyType];
        let mut current = self.super_type.clone();
        while let Some(ty) = current {
            if seen.contains(&Arc::as_ptr(&ty)) {
                break;
            }
            seen.push(Arc::as_ptr(&ty));
            current = ty.super_type.clone();
            chain.push(ty);
        }
        chain
    }
}

/// Shallow structural equality: name, shape, abstractness, and
/// restrictions. The super chain is deliberately excluded; ancestor-set
/// comparison is the job of [`types_equal`](super::ops::types_equal).
impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.is_abstract == other.is_abstract
            && self.restrictions == other.restrictions
    }
}
