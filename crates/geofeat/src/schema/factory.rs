// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The explicit type factory.
//!
//! All type construction flows through a `TypeFactory` instance passed by
//! reference into the builder and the type operations; there is no
//! process-wide factory singleton. Tests can therefore run alternate
//! factories side by side.

use std::sync::Arc;

use crate::geom::Crs;

use super::feature_type::compute_simple;
use super::{
    FeatureType, GeometryKind, Name, PropertyDescriptor, PropertyType, Restriction, ScalarKind,
    TypeError, TypeKind, CORE_NAMESPACE,
};

/// Factory for immutable property types.
///
/// Holds the well-known abstract feature root that feature types default
/// their super type to.
#[derive(Debug, Clone)]
pub struct TypeFactory {
    feature_root: Arc<PropertyType>,
}

impl TypeFactory {
    /// Create a factory with the standard abstract feature root.
    pub fn new() -> Self {
        let feature_root = Arc::new(PropertyType {
            name: Name::new(CORE_NAMESPACE, "Feature"),
            kind: TypeKind::Complex {
                descriptors: Vec::new(),
            },
            is_abstract: true,
            restrictions: Vec::new(),
            super_type: None,
            description: Some("Abstract root of all feature types".to_string()),
        });
        Self { feature_root }
    }

    /// The abstract root every feature type descends from by default.
    pub fn feature_root(&self) -> &Arc<PropertyType> {
        &self.feature_root
    }

    /// Create a scalar attribute type.
    pub fn create_scalar_type(
        &self,
        name: Name,
        binding: ScalarKind,
        is_abstract: bool,
        restrictions: Vec<Restriction>,
        super_type: Option<Arc<PropertyType>>,
        description: Option<String>,
    ) -> Result<Arc<PropertyType>, TypeError> {
        self.create(
            name,
            TypeKind::Scalar { binding },
            is_abstract,
            restrictions,
            super_type,
            description,
        )
    }

    /// Create a geometry attribute type, optionally pinned to a CRS.
    #[allow(clippy::too_many_arguments)]
    pub fn create_geometry_type(
        &self,
        name: Name,
        binding: GeometryKind,
        crs: Option<Crs>,
        is_abstract: bool,
        restrictions: Vec<Restriction>,
        super_type: Option<Arc<PropertyType>>,
        description: Option<String>,
    ) -> Result<Arc<PropertyType>, TypeError> {
        self.create(
            name,
            TypeKind::Geometry { binding, crs },
            is_abstract,
            restrictions,
            super_type,
            description,
        )
    }

    /// Create a complex type from an ordered descriptor list.
    ///
    /// Rejects duplicate descriptor names; a descriptor cannot be absent
    /// by construction, so the degenerate inputs left to check are names.
    pub fn create_complex_type(
        &self,
        name: Name,
        descriptors: Vec<Arc<PropertyDescriptor>>,
        is_abstract: bool,
        restrictions: Vec<Restriction>,
        super_type: Option<Arc<PropertyType>>,
        description: Option<String>,
    ) -> Result<Arc<PropertyType>, TypeError> {
        check_duplicates(&descriptors)?;
        self.create(
            name,
            TypeKind::Complex { descriptors },
            is_abstract,
            restrictions,
            super_type,
            description,
        )
    }

    /// Create a feature type.
    ///
    /// When `default_geometry` is named it must resolve to a
    /// geometry-kind descriptor; when `None` it stays unset (the builder
    /// is where declaration-order auto-selection happens). The simplicity
    /// flag is computed here from the final descriptor list.
    #[allow(clippy::too_many_arguments)]
    pub fn create_feature_type(
        &self,
        name: Name,
        descriptors: Vec<Arc<PropertyDescriptor>>,
        default_geometry: Option<Name>,
        is_abstract: bool,
        restrictions: Vec<Restriction>,
        super_type: Option<Arc<PropertyType>>,
        description: Option<String>,
    ) -> Result<FeatureType, TypeError> {
        if let Some(geom_name) = &default_geometry {
            let resolved = descriptors
                .iter()
                .find(|d| geom_name.matches(d.name()))
                .filter(|d| d.is_geometry());
            if resolved.is_none() {
                return Err(TypeError::DefaultGeometryNotFound {
                    name: geom_name.clone(),
                });
            }
        }
        let simple = compute_simple(&descriptors);
        let super_type = super_type.or_else(|| Some(self.feature_root.clone()));
        let root = self.create_complex_type(
            name,
            descriptors,
            is_abstract,
            restrictions,
            super_type,
            description,
        )?;
        Ok(FeatureType::from_parts(root, default_geometry, simple))
    }

    fn create(
        &self,
        name: Name,
        kind: TypeKind,
        is_abstract: bool,
        restrictions: Vec<Restriction>,
        super_type: Option<Arc<PropertyType>>,
        description: Option<String>,
    ) -> Result<Arc<PropertyType>, TypeError> {
        if name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        validate_super_chain(&name, super_type.as_ref())?;
        Ok(Arc::new(PropertyType {
            name,
            kind,
            is_abstract,
            restrictions,
            super_type,
            description,
        }))
    }
}

impl Default for TypeFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the proposed super chain to the root, tracking visited node
/// identities. The chain of immutable `Arc` nodes cannot loop, but the
/// walk must terminate regardless: acyclicity is load-bearing for every
/// ancestor-based algorithm downstream.
fn validate_super_chain(
    name: &Name,
    super_type: Option<&Arc<PropertyType>>,
) -> Result<(), TypeError> {
    let mut seen: Vec<*const PropertyType> = Vec::new();
    let mut current = super_type.cloned();
    while let Some(ty) = current {
        if seen.contains(&Arc::as_ptr(&ty)) {
            return Err(TypeError::AncestorCycle { name: name.clone() });
        }
        seen.push(Arc::as_ptr(&ty));
        current = ty.super_type().cloned();
    }
    Ok(())
}

fn check_duplicates(descriptors: &[Arc<PropertyDescriptor>]) -> Result<(), TypeError> {
    for (i, d) in descriptors.iter().enumerate() {
        if descriptors[..i].iter().any(|prev| prev.name() == d.name()) {
            return Err(TypeError::DuplicateDescriptor {
                name: d.name().clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Occurs;
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let factory = TypeFactory::new();
        let err = factory
            .create_scalar_type(Name::local(""), ScalarKind::Int, false, vec![], None, None)
            .expect_err("must fail");
        assert!(matches!(err, TypeError::EmptyName));
    }

    #[test]
    fn test_duplicate_descriptor_rejected() {
        let factory = TypeFactory::new();
        let int_ty = factory
            .create_scalar_type(Name::local("Integer"), ScalarKind::Int, false, vec![], None, None)
            .expect("type");
        let d1 = Arc::new(PropertyDescriptor::single(Name::local("pop"), int_ty.clone()).expect("d1"));
        let d2 = Arc::new(
            PropertyDescriptor::new(
                Name::local("pop"),
                int_ty,
                0,
                Occurs::Bounded(1),
                true,
                None,
            )
            .expect("d2"),
        );
        let err = factory
            .create_complex_type(Name::local("city"), vec![d1, d2], false, vec![], None, None)
            .expect_err("must fail");
        assert!(matches!(err, TypeError::DuplicateDescriptor { .. }));
    }

    #[test]
    fn test_default_geometry_must_be_geometry_kind() {
        let factory = TypeFactory::new();
        let int_ty = factory
            .create_scalar_type(Name::local("Integer"), ScalarKind::Int, false, vec![], None, None)
            .expect("type");
        let pop = Arc::new(PropertyDescriptor::single(Name::local("pop"), int_ty).expect("pop"));
        let err = factory
            .create_feature_type(
                Name::local("city"),
                vec![pop],
                Some(Name::local("pop")),
                false,
                vec![],
                None,
                None,
            )
            .expect_err("must fail");
        assert!(matches!(err, TypeError::DefaultGeometryNotFound { .. }));
    }

    #[test]
    fn test_feature_type_defaults_to_feature_root_super() {
        let factory = TypeFactory::new();
        let ft = factory
            .create_feature_type(Name::local("empty"), vec![], None, false, vec![], None, None)
            .expect("feature type");
        let supers = ft.root().ancestors();
        assert_eq!(supers.len(), 1);
        assert_eq!(supers[0].name().local_part(), "Feature");
    }
}
