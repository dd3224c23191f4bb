// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature types: complex types at the root of a record.

use std::fmt;
use std::sync::Arc;

use super::{Name, PropertyDescriptor, PropertyType};

/// A complex type serving as the root of feature records.
///
/// Wraps the underlying complex [`PropertyType`] with the distinguished
/// default-geometry name and the precomputed simplicity flag. Cloning is
/// cheap: the root is shared.
#[derive(Debug, Clone)]
pub struct FeatureType {
    root: Arc<PropertyType>,
    default_geometry: Option<Name>,
    simple: bool,
}

impl FeatureType {
    pub(super) fn from_parts(
        root: Arc<PropertyType>,
        default_geometry: Option<Name>,
        simple: bool,
    ) -> Self {
        Self {
            root,
            default_geometry,
            simple,
        }
    }

    /// The qualified type name.
    pub fn name(&self) -> &Name {
        self.root.name()
    }

    /// The underlying complex type node.
    pub fn root(&self) -> &Arc<PropertyType> {
        &self.root
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[Arc<PropertyDescriptor>] {
        self.root.descriptors()
    }

    /// Find a descriptor by query name.
    pub fn descriptor(&self, name: &Name) -> Option<&Arc<PropertyDescriptor>> {
        self.root.descriptor(name)
    }

    /// The distinguished geometry descriptor name, if set.
    pub fn default_geometry(&self) -> Option<&Name> {
        self.default_geometry.as_ref()
    }

    /// The distinguished geometry descriptor: the default geometry when
    /// set, otherwise the first geometry-kind descriptor in declaration
    /// order.
    pub fn geometry_descriptor(&self) -> Option<&Arc<PropertyDescriptor>> {
        if let Some(name) = &self.default_geometry {
            return self.descriptors().iter().find(|d| name.matches(d.name()));
        }
        self.descriptors().iter().find(|d| d.is_geometry())
    }

    /// Whether this is a simple type: flat, single-valued, single-level.
    pub fn is_simple(&self) -> bool {
        self.simple
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name())?;
        for (i, d) in self.descriptors().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "}}")
    }
}

/// A type is simple iff every descriptor is exactly `1..1` and binds a
/// scalar or geometry type: no nested complex children, so the tree has
/// no grandchildren and no repetition.
pub(super) fn compute_simple(descriptors: &[Arc<PropertyDescriptor>]) -> bool {
    descriptors.iter().all(|d| d.is_single() && !d.is_complex())
}
