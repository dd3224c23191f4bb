// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent builder for feature and complex types.

use std::collections::HashMap;
use std::sync::Arc;

use crate::geom::Crs;

use super::feature_type::compute_simple;
use super::{
    Binding, FeatureType, GeometryKind, Name, Occurs, PropertyDescriptor, PropertyType,
    Restriction, ScalarKind, SchemaError, TypeError, TypeFactory, TypeKind, CORE_NAMESPACE,
};

/// Mutable, stateful builder accumulating descriptors into an immutable
/// [`FeatureType`] or complex [`PropertyType`].
///
/// Binding resolution goes through a registry seeded with the default
/// scalar schema and the geometry family; unresolved bindings are
/// synthesized on the fly as single-valued nillable attribute types.
///
/// `build_*` consumes the builder: the produced type is a frozen snapshot
/// that later builder mutation cannot reach.
#[derive(Debug)]
pub struct TypeBuilder {
    factory: TypeFactory,
    namespace: Option<String>,
    name: String,
    description: Option<String>,
    super_type: Option<Arc<PropertyType>>,
    is_abstract: bool,
    restrictions: Vec<Restriction>,
    properties: Vec<Arc<PropertyDescriptor>>,
    default_geometry: Option<Name>,
    bindings: HashMap<Binding, Arc<PropertyType>>,
    pending_error: Option<TypeError>,
}

impl TypeBuilder {
    /// Start a builder for the named type, with a fresh factory.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_factory(TypeFactory::new(), name)
    }

    /// Start a builder using an existing factory.
    pub fn with_factory(factory: TypeFactory, name: impl Into<String>) -> Self {
        let bindings = seed_bindings();
        Self {
            factory,
            namespace: None,
            name: name.into(),
            description: None,
            super_type: None,
            is_abstract: false,
            restrictions: Vec::new(),
            properties: Vec::new(),
            default_geometry: None,
            bindings,
            pending_error: None,
        }
    }

    /// Set the type namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the human-readable description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the built type abstract.
    pub fn abstract_type(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Set the super type. The chain is validated at build time.
    pub fn super_type(mut self, super_type: Arc<PropertyType>) -> Self {
        self.super_type = Some(super_type);
        self
    }

    /// Attach a restriction to the built type.
    pub fn restriction(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    /// Name the default geometry descriptor. Resolution against the
    /// accumulated descriptors happens at build time.
    pub fn default_geometry(mut self, name: impl Into<Name>) -> Self {
        self.default_geometry = Some(name.into());
        self
    }

    /// Add a single-valued nillable property with the given binding.
    ///
    /// The binding resolves against the registry; unregistered bindings
    /// are synthesized on the fly.
    pub fn add(mut self, name: &str, binding: Binding) -> Self {
        let ty = self.resolve_binding(binding);
        self.push_single(name, ty);
        self
    }

    /// Add a single-valued nillable scalar property.
    pub fn add_scalar(self, name: &str, kind: ScalarKind) -> Self {
        self.add(name, Binding::Scalar(kind))
    }

    /// Add a single-valued nillable geometry property, optionally pinned
    /// to a CRS.
    pub fn add_geometry(mut self, name: &str, kind: GeometryKind, crs: Option<Crs>) -> Self {
        let ty = match crs {
            None => self.resolve_binding(Binding::Geometry(kind)),
            Some(crs) => synthesize_geometry(kind, Some(crs)),
        };
        self.push_single(name, ty);
        self
    }

    /// Add a geometry property with the CRS given as an SRID string
    /// (`"4326"` or `"EPSG:4326"`). A decode failure is a hard error,
    /// never silently ignored.
    pub fn add_geometry_srid(
        self,
        name: &str,
        kind: GeometryKind,
        srid: &str,
    ) -> Result<Self, TypeError> {
        let crs = Crs::decode(srid)?;
        Ok(self.add_geometry(name, kind, Some(crs)))
    }

    /// Append an already-built descriptor.
    pub fn add_descriptor(mut self, descriptor: Arc<PropertyDescriptor>) -> Self {
        self.properties.push(descriptor);
        self
    }

    /// Append a batch of descriptors, preserving their order.
    pub fn add_descriptors(
        mut self,
        descriptors: impl IntoIterator<Item = Arc<PropertyDescriptor>>,
    ) -> Self {
        self.properties.extend(descriptors);
        self
    }

    /// Register an additional binding.
    pub fn add_binding(mut self, binding: Binding, ty: Arc<PropertyType>) -> Self {
        self.bindings.insert(binding, ty);
        self
    }

    /// Replace the whole binding registry.
    pub fn set_bindings(mut self, bindings: HashMap<Binding, Arc<PropertyType>>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Build a feature type.
    ///
    /// Resolves the default geometry (an explicitly named one must be a
    /// geometry-kind descriptor; otherwise the first geometry descriptor
    /// in declaration order is chosen) and computes simplicity. When
    /// `simple` is requested, the build fails eagerly on the first descriptor
    /// whose multiplicity is not exactly one, then on any remaining
    /// simplicity violation. The super type defaults to the factory's
    /// abstract feature root.
    pub fn build_feature_type(self, simple: bool) -> Result<FeatureType, SchemaError> {
        if let Some(err) = self.pending_error {
            return Err(err.into());
        }
        let name = self.qualified_name()?;

        let default_geometry = match self.default_geometry {
            Some(requested) => {
                let resolved = self
                    .properties
                    .iter()
                    .find(|d| requested.matches(d.name()))
                    .filter(|d| d.is_geometry());
                if resolved.is_none() {
                    return Err(TypeError::DefaultGeometryNotFound { name: requested }.into());
                }
                Some(requested)
            }
            None => self
                .properties
                .iter()
                .find(|d| d.is_geometry())
                .map(|d| d.name().clone()),
        };

        if simple {
            if let Some(d) = self.properties.iter().find(|d| !d.is_single()) {
                return Err(SchemaError::Multiplicity {
                    name: d.name().clone(),
                });
            }
            if !compute_simple(&self.properties) {
                let offender = self
                    .properties
                    .iter()
                    .find(|d| !d.is_single() || d.is_complex())
                    .map(|d| d.name().clone())
                    .unwrap_or_else(|| name.clone());
                return Err(SchemaError::NotSimple { name, offender });
            }
        }

        self.factory
            .create_feature_type(
                name,
                self.properties,
                default_geometry,
                self.is_abstract,
                self.restrictions,
                self.super_type,
                self.description,
            )
            .map_err(Into::into)
    }

    /// Build a plain complex type: same accumulation machinery, no
    /// feature semantics (no default geometry, no implicit super type).
    pub fn build_complex_type(self) -> Result<Arc<PropertyType>, TypeError> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }
        let name = self.qualified_name()?;
        self.factory.create_complex_type(
            name,
            self.properties,
            self.is_abstract,
            self.restrictions,
            self.super_type,
            self.description,
        )
    }

    /// The factory this builder constructs through.
    pub fn factory(&self) -> &TypeFactory {
        &self.factory
    }

    fn qualified_name(&self) -> Result<Name, TypeError> {
        if self.name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        Ok(match &self.namespace {
            Some(ns) => Name::new(ns.clone(), self.name.clone()),
            None => Name::local(self.name.clone()),
        })
    }

    fn resolve_binding(&mut self, binding: Binding) -> Arc<PropertyType> {
        if let Some(ty) = self.bindings.get(&binding) {
            return ty.clone();
        }
        log::debug!("[TypeBuilder] synthesizing binding {}", binding.token());
        let ty = match binding {
            Binding::Scalar(kind) => synthesize_scalar(kind),
            Binding::Geometry(kind) => synthesize_geometry(kind, None),
        };
        self.bindings.insert(binding, ty.clone());
        ty
    }

    fn push_single(&mut self, name: &str, ty: Arc<PropertyType>) {
        match PropertyDescriptor::new(
            Name::local(name),
            ty,
            1,
            Occurs::Bounded(1),
            true,
            None,
        ) {
            Ok(d) => self.properties.push(Arc::new(d)),
            // Only an empty name can fail here; surfaced at build time.
            Err(err) => {
                if self.pending_error.is_none() {
                    self.pending_error = Some(err);
                }
            }
        }
    }
}

pub(super) fn synthesize_scalar(kind: ScalarKind) -> Arc<PropertyType> {
    Arc::new(PropertyType {
        name: Name::new(CORE_NAMESPACE, kind.token()),
        kind: TypeKind::Scalar { binding: kind },
        is_abstract: false,
        restrictions: Vec::new(),
        super_type: None,
        description: None,
    })
}

pub(super) fn synthesize_geometry(kind: GeometryKind, crs: Option<Crs>) -> Arc<PropertyType> {
    Arc::new(PropertyType {
        name: Name::new(CORE_NAMESPACE, kind.token()),
        kind: TypeKind::Geometry { binding: kind, crs },
        is_abstract: false,
        restrictions: Vec::new(),
        super_type: None,
        description: None,
    })
}

/// The default scalar schema plus the geometry family.
fn seed_bindings() -> HashMap<Binding, Arc<PropertyType>> {
    let mut map = HashMap::new();
    for kind in ScalarKind::ALL {
        map.insert(Binding::Scalar(kind), synthesize_scalar(kind));
    }
    for kind in GeometryKind::ALL {
        map.insert(Binding::Geometry(kind), synthesize_geometry(kind, None));
    }
    map
}
