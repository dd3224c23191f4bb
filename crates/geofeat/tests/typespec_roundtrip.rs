// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-spec language round trips and parse failures.

use geofeat::schema::typespec::{create_type, type_spec};
use geofeat::{Name, SchemaError, TypeError};

#[test]
fn vocabulary_specs_round_trip() {
    let specs = [
        "name:String,pop:Integer",
        "geom:Point:srid=4326,name:String,pop:Integer",
        "a:Boolean,b:Long,c:Float,d:Double,e:Date",
        "track:MultiLineString,zone:MultiPolygon,items:GeometryCollection",
        "shape:Geometry,spot:MultiPoint",
        "centroid:Point,*outline:Polygon",
        "name:String:nillable,geom:LineString:nillable;srid=3857",
    ];
    for spec in specs {
        let ty = create_type("app", "t", spec).expect(spec);
        assert_eq!(type_spec(&ty), spec, "round trip of {spec}");
    }
}

#[test]
fn default_geometry_marker_parses() {
    let ty = create_type("app", "parcels", "centroid:Point,*outline:Polygon").expect("parse");
    assert_eq!(ty.default_geometry().map(Name::local_part), Some("outline"));
}

#[test]
fn first_geometry_is_default_without_marker() {
    let ty = create_type("app", "parcels", "outline:Polygon,name:String").expect("parse");
    assert_eq!(ty.default_geometry().map(Name::local_part), Some("outline"));
    // No marker needed on serialization: the first geometry is the
    // builder's own choice.
    assert_eq!(type_spec(&ty), "outline:Polygon,name:String");
}

#[test]
fn unknown_token_is_a_hard_error() {
    let err = create_type("app", "t", "payload:ByteBuffer").expect_err("must fail");
    assert!(matches!(
        err,
        SchemaError::Type(TypeError::UnknownTypeToken { .. })
    ));
}

#[test]
fn srid_hint_parses_both_forms() {
    for spec in ["g:Point:srid=4326", "g:Point:srid=EPSG:4326"] {
        let ty = create_type("app", "t", spec).expect(spec);
        let g = ty.descriptor(&Name::local("g")).expect("g");
        assert_eq!(g.ty().crs().map(|c| c.code()), Some(4326));
    }
}
