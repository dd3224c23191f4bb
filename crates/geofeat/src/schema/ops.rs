// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateless operations over already-built types: subtype derivation,
//! CRS propagation, structural equality, and default-value synthesis.

use std::collections::HashSet;
use std::sync::Arc;

use crate::geom::Crs;
use crate::property::{binding_default, PropertyValue};

use super::{
    FeatureType, Name, PropertyDescriptor, PropertyType, SchemaError, TypeError, TypeFactory,
};

/// Derive a new type exposing the named descriptors, in the requested
/// order, optionally re-binding geometry descriptors to `crs_override`
/// and renaming the result.
///
/// Fast path: when no rename is requested and the projection is
/// identical to the source (same count, same names and namespaces in
/// order, every geometry descriptor already bound to the override CRS),
/// the source type is returned unchanged, sharing its root.
///
/// A name that resolves to no descriptor fails with
/// [`SchemaError::PropertyNotFound`], carrying a rendering of the full
/// source type for diagnostics.
pub fn create_sub_type(
    factory: &TypeFactory,
    ty: &FeatureType,
    names: &[Name],
    crs_override: Option<Crs>,
    new_name: Option<Name>,
) -> Result<FeatureType, SchemaError> {
    let unchanged = new_name.is_none()
        && names.len() == ty.descriptors().len()
        && ty.descriptors().iter().zip(names).all(|(d, n)| {
            d.name() == n
                && match crs_override {
                    None => true,
                    Some(crs) => !d.is_geometry() || d.ty().crs() == Some(crs),
                }
        });
    if unchanged {
        return Ok(ty.clone());
    }

    let mut selected = Vec::with_capacity(names.len());
    for n in names {
        let d = ty
            .descriptors()
            .iter()
            .find(|d| n.matches(d.name()))
            .ok_or_else(|| SchemaError::PropertyNotFound {
                name: n.clone(),
                schema: ty.to_string(),
            })?;
        selected.push(rebind_geometry_crs(factory, d, crs_override)?);
    }

    // The original default geometry survives only if projected.
    let default_geometry = ty
        .default_geometry()
        .filter(|n| selected.iter().any(|d| n.matches(d.name())))
        .cloned();

    let root = ty.root();
    factory
        .create_feature_type(
            new_name.unwrap_or_else(|| ty.name().clone()),
            selected,
            default_geometry,
            root.is_abstract(),
            root.restrictions().to_vec(),
            root.super_type().cloned(),
            root.description().map(str::to_string),
        )
        .map_err(Into::into)
}

/// Rewrite every geometry descriptor's CRS to `crs`.
///
/// With `force_only_missing`, only descriptors currently lacking a CRS
/// are rewritten. Non-geometry descriptors pass through unchanged. The
/// result's default geometry is re-derived from the original
/// default-geometry's local name, preserving author intent.
pub fn transform(
    factory: &TypeFactory,
    schema: &FeatureType,
    crs: Crs,
    force_only_missing: bool,
) -> Result<FeatureType, SchemaError> {
    let mut rewritten = Vec::with_capacity(schema.descriptors().len());
    for d in schema.descriptors() {
        if d.is_geometry() && (!force_only_missing || d.ty().crs().is_none()) {
            rewritten.push(rebind_geometry_crs(factory, d, Some(crs))?);
        } else {
            rewritten.push(d.clone());
        }
    }

    let default_geometry = schema
        .default_geometry()
        .map(|n| Name::local(n.local_part().to_string()));

    let root = schema.root();
    factory
        .create_feature_type(
            schema.name().clone(),
            rewritten,
            default_geometry,
            root.is_abstract(),
            root.restrictions().to_vec(),
            root.super_type().cloned(),
            root.description().map(str::to_string),
        )
        .map_err(Into::into)
}

/// Structural type equality: identical qualified name, element-wise
/// identical descriptor arrays (order-sensitive), and identical ancestor
/// sets (order-insensitive). Two types with the same name and
/// descriptors but different super chains are not equal.
pub fn types_equal(a: &PropertyType, b: &PropertyType) -> bool {
    a == b && ancestor_names(a) == ancestor_names(b)
}

fn ancestor_names(ty: &PropertyType) -> HashSet<Name> {
    ty.ancestors()
        .iter()
        .map(|t| t.name().clone())
        .collect()
}

/// The value a descriptor contributes when no value was supplied.
///
/// Explicit default first; else `Null` for nillable slots; else the
/// synthesized per-binding default. Complex bindings have no synthesized
/// default, so a non-nillable, defaultless complex descriptor is a hard
/// error.
pub fn default_value(descriptor: &PropertyDescriptor) -> Result<PropertyValue, TypeError> {
    if let Some(v) = descriptor.default_value() {
        return Ok(v.clone());
    }
    if descriptor.is_nillable() {
        return Ok(PropertyValue::Null);
    }
    match descriptor.ty().binding() {
        Some(binding) => Ok(binding_default(binding)),
        None => Err(TypeError::UnsupportedBinding {
            name: descriptor.name().clone(),
        }),
    }
}

fn rebind_geometry_crs(
    factory: &TypeFactory,
    descriptor: &Arc<PropertyDescriptor>,
    crs_override: Option<Crs>,
) -> Result<Arc<PropertyDescriptor>, SchemaError> {
    let Some(crs) = crs_override else {
        return Ok(descriptor.clone());
    };
    let old = descriptor.ty();
    let super::TypeKind::Geometry { binding, crs: old_crs } = old.kind() else {
        return Ok(descriptor.clone());
    };
    if *old_crs == Some(crs) {
        return Ok(descriptor.clone());
    }
    let binding = *binding;
    let new_ty = factory
        .create_geometry_type(
            old.name().clone(),
            binding,
            Some(crs),
            old.is_abstract(),
            old.restrictions().to_vec(),
            old.super_type().cloned(),
            old.description().map(str::to_string),
        )
        .map_err(SchemaError::from)?;
    let rebound = PropertyDescriptor::new(
        descriptor.name().clone(),
        new_ty,
        descriptor.min_occurs(),
        descriptor.max_occurs(),
        descriptor.is_nillable(),
        descriptor.default_value().cloned(),
    )
    .map_err(SchemaError::from)?;
    Ok(Arc::new(rebound))
}

#[cfg(test)]
mod tests {
    use super::super::{Occurs, ScalarKind, TypeBuilder};
    use super::*;

    #[test]
    fn test_default_value_synthesis() {
        let factory = TypeFactory::new();
        let int_ty = factory
            .create_scalar_type(Name::local("Integer"), ScalarKind::Int, false, vec![], None, None)
            .expect("type");
        let required = PropertyDescriptor::new(
            Name::local("count"),
            int_ty.clone(),
            1,
            Occurs::Bounded(1),
            false,
            None,
        )
        .expect("descriptor");
        assert_eq!(default_value(&required).expect("value"), PropertyValue::Int(0));

        let nillable = PropertyDescriptor::single(Name::local("count"), int_ty).expect("descriptor");
        assert_eq!(default_value(&nillable).expect("value"), PropertyValue::Null);
    }

    #[test]
    fn test_explicit_default_wins() {
        let factory = TypeFactory::new();
        let int_ty = factory
            .create_scalar_type(Name::local("Integer"), ScalarKind::Int, false, vec![], None, None)
            .expect("type");
        let d = PropertyDescriptor::new(
            Name::local("count"),
            int_ty,
            1,
            Occurs::Bounded(1),
            false,
            Some(PropertyValue::Int(7)),
        )
        .expect("descriptor");
        assert_eq!(default_value(&d).expect("value"), PropertyValue::Int(7));
    }

    #[test]
    fn test_types_equal_reflexive() {
        let ft = TypeBuilder::new("roads")
            .add_scalar("name", ScalarKind::String)
            .build_feature_type(false)
            .expect("build");
        assert!(types_equal(ft.root(), ft.root()));
    }

    #[test]
    fn test_different_super_chains_are_not_equal() {
        let factory = TypeFactory::new();
        let other_root = factory
            .create_complex_type(Name::local("OtherRoot"), vec![], true, vec![], None, None)
            .expect("root");

        let a = TypeBuilder::with_factory(factory.clone(), "t")
            .add_scalar("x", ScalarKind::Int)
            .build_feature_type(false)
            .expect("a");
        let b = TypeBuilder::with_factory(factory, "t")
            .add_scalar("x", ScalarKind::Int)
            .super_type(other_root)
            .build_feature_type(false)
            .expect("b");

        assert_eq!(**a.root(), **b.root());
        assert!(!types_equal(a.root(), b.root()));
    }
}
