// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subtype derivation, CRS propagation, and structural equality over
//! built types.

use geofeat::schema::ops::{create_sub_type, transform, types_equal};
use geofeat::{
    Crs, GeometryKind, Name, ScalarKind, SchemaError, TypeBuilder, TypeFactory,
};

fn factory() -> TypeFactory {
    TypeFactory::new()
}

/// `T = {geom: Point(EPSG:4326)*, pop: Integer}`
fn sample_type(factory: &TypeFactory) -> geofeat::FeatureType {
    TypeBuilder::with_factory(factory.clone(), "cities")
        .add_geometry_srid("geom", GeometryKind::Point, "EPSG:4326")
        .expect("srid")
        .add_scalar("pop", ScalarKind::Int)
        .build_feature_type(true)
        .expect("build")
}

#[test]
fn default_geometry_resolves_to_first_geometry() {
    let f = factory();
    let ty = sample_type(&f);
    assert_eq!(ty.default_geometry().map(Name::local_part), Some("geom"));
    let d = ty.geometry_descriptor().expect("geometry descriptor");
    assert_eq!(d.ty().crs(), Some(Crs::WGS84));
}

#[test]
fn projecting_away_the_geometry_clears_the_default() {
    let f = factory();
    let ty = sample_type(&f);
    let narrowed =
        create_sub_type(&f, &ty, &[Name::local("pop")], None, None).expect("subtype");
    assert_eq!(narrowed.descriptors().len(), 1);
    assert_eq!(
        narrowed.descriptors()[0].name().local_part(),
        "pop"
    );
    assert!(narrowed.default_geometry().is_none());
    assert!(narrowed.geometry_descriptor().is_none());
}

#[test]
fn unchanged_projection_takes_the_fast_path() {
    let f = factory();
    let ty = sample_type(&f);
    let same = create_sub_type(
        &f,
        &ty,
        &[Name::local("geom"), Name::local("pop")],
        None,
        None,
    )
    .expect("subtype");
    // The fast path shares the source root.
    assert!(std::sync::Arc::ptr_eq(ty.root(), same.root()));
    assert!(types_equal(ty.root(), same.root()));
}

#[test]
fn reordering_builds_a_new_type() {
    let f = factory();
    let ty = sample_type(&f);
    let reordered = create_sub_type(
        &f,
        &ty,
        &[Name::local("pop"), Name::local("geom")],
        None,
        None,
    )
    .expect("subtype");
    assert!(!std::sync::Arc::ptr_eq(ty.root(), reordered.root()));
    let names: Vec<_> = reordered
        .descriptors()
        .iter()
        .map(|d| d.name().local_part().to_string())
        .collect();
    assert_eq!(names, ["pop", "geom"]);
    // Same name, different descriptor order: not structurally equal.
    assert!(!types_equal(ty.root(), reordered.root()));
    // The default geometry survived the projection.
    assert_eq!(
        reordered.default_geometry().map(Name::local_part),
        Some("geom")
    );
}

#[test]
fn missing_property_names_the_offender() {
    let f = factory();
    let ty = sample_type(&f);
    let err = create_sub_type(&f, &ty, &[Name::local("altitude")], None, None)
        .expect_err("must fail");
    match err {
        SchemaError::PropertyNotFound { name, schema } => {
            assert_eq!(name.local_part(), "altitude");
            // The diagnostic carries the full source type.
            assert!(schema.contains("geom"));
            assert!(schema.contains("pop"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn subtype_with_crs_override_rebinds_geometry() {
    let f = factory();
    let ty = sample_type(&f);
    let web = Crs::epsg(3857);
    let projected = create_sub_type(
        &f,
        &ty,
        &[Name::local("geom"), Name::local("pop")],
        Some(web),
        None,
    )
    .expect("subtype");
    let geom = projected.geometry_descriptor().expect("geometry");
    assert_eq!(geom.ty().crs(), Some(web));
    // The scalar descriptor passes through untouched.
    let pop = projected.descriptor(&Name::local("pop")).expect("pop");
    assert!(pop.ty().crs().is_none());
}

#[test]
fn transform_rewrites_all_geometries() {
    let f = factory();
    let ty = TypeBuilder::with_factory(f.clone(), "mixed")
        .add_geometry_srid("a", GeometryKind::Point, "4326")
        .expect("srid")
        .add_geometry("b", GeometryKind::Polygon, None)
        .add_scalar("label", ScalarKind::String)
        .build_feature_type(false)
        .expect("build");

    let target = Crs::epsg(25832);
    let all = transform(&f, &ty, target, false).expect("transform");
    assert_eq!(
        all.descriptor(&Name::local("a")).expect("a").ty().crs(),
        Some(target)
    );
    assert_eq!(
        all.descriptor(&Name::local("b")).expect("b").ty().crs(),
        Some(target)
    );
    // Default geometry re-derived from the original's local name.
    assert_eq!(all.default_geometry().map(Name::local_part), Some("a"));
}

#[test]
fn transform_force_only_missing_preserves_existing_crs() {
    let f = factory();
    let ty = TypeBuilder::with_factory(f.clone(), "mixed")
        .add_geometry_srid("a", GeometryKind::Point, "4326")
        .expect("srid")
        .add_geometry("b", GeometryKind::Polygon, None)
        .build_feature_type(false)
        .expect("build");

    let target = Crs::epsg(25832);
    let filled = transform(&f, &ty, target, true).expect("transform");
    assert_eq!(
        filled.descriptor(&Name::local("a")).expect("a").ty().crs(),
        Some(Crs::WGS84)
    );
    assert_eq!(
        filled.descriptor(&Name::local("b")).expect("b").ty().crs(),
        Some(target)
    );
}

#[test]
fn equality_is_sensitive_to_ancestry() {
    let f = factory();
    let other_root = f
        .create_complex_type(
            Name::local("LegacyRoot"),
            vec![],
            true,
            vec![],
            None,
            None,
        )
        .expect("root");

    let a = TypeBuilder::with_factory(f.clone(), "t")
        .add_scalar("x", ScalarKind::Int)
        .build_feature_type(false)
        .expect("a");
    let b = TypeBuilder::with_factory(f.clone(), "t")
        .add_scalar("x", ScalarKind::Int)
        .super_type(other_root)
        .build_feature_type(false)
        .expect("b");
    let c = TypeBuilder::with_factory(f, "t")
        .add_scalar("x", ScalarKind::Int)
        .build_feature_type(false)
        .expect("c");

    assert!(types_equal(a.root(), a.root()));
    assert!(types_equal(a.root(), c.root()));
    assert!(!types_equal(a.root(), b.root()));
}
