// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # geofeat - schema-driven feature data model
//!
//! A runtime feature/attribute model: self-describing records whose shape
//! is a first-class, introspectable value. Scalar, geometry-valued, and
//! arbitrarily nested complex attributes are built against descriptor
//! schemas that carry multiplicity, nillability, defaults, restrictions,
//! and a single-inheritance super-type lattice.
//!
//! ## Quick Start
//!
//! ```rust
//! use geofeat::{
//!     Feature, FeatureCollection, GeometryKind, PropertyValue, ScalarKind, TypeBuilder,
//! };
//! use geo::{Geometry, Point};
//!
//! // Describe the shape of the data at runtime.
//! let city = TypeBuilder::new("city")
//!     .add_geometry_srid("location", GeometryKind::Point, "EPSG:4326")
//!     .expect("valid SRID")
//!     .add_scalar("name", ScalarKind::String)
//!     .add_scalar("pop", ScalarKind::Int)
//!     .build_feature_type(true)
//!     .expect("simple feature type");
//!
//! // Create records against the schema.
//! let mut oslo = Feature::with_defaults(city, Some("city.1".to_string())).expect("feature");
//! oslo.set_attribute("name", PropertyValue::from("Oslo")).expect("name");
//! oslo.set_attribute("pop", PropertyValue::Int(709_037)).expect("pop");
//! oslo.set_attribute(
//!     "location",
//!     PropertyValue::Geometry(Geometry::Point(Point::new(10.75, 59.91))),
//! )
//! .expect("location");
//!
//! // Store them, indexed by id.
//! let mut collection = FeatureCollection::new();
//! assert!(collection.add(oslo));
//! assert!(!collection.bounds().is_empty());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                        FeatureCollection                         |
//! |     id-indexed store | batched listeners | lazy bounds cache     |
//! +------------------------------------------------------------------+
//! |                       Property instances                         |
//! |      Attribute | GeometryAttribute | ComplexAttribute tree       |
//! +------------------------------------------------------------------+
//! |                          Schema layer                            |
//! |  TypeBuilder -> TypeFactory -> PropertyType / PropertyDescriptor |
//! |        ops: subtype | transform | equality | defaults            |
//! +------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeBuilder`] | Accumulates descriptors into an immutable type |
//! | [`FeatureType`] | A complex root type with default geometry |
//! | [`PropertyDescriptor`] | A named, cardinality-bounded slot |
//! | [`Feature`] | An identified record bound to a feature type |
//! | [`FeatureCollection`] | In-memory store with change notification |
//!
//! ## Concurrency
//!
//! The whole model is single-threaded by design: no locks, no atomics.
//! Iteration borrows the collection, so structural mutation during
//! iteration is rejected at compile time instead of being undefined
//! behavior at runtime.

/// In-memory feature storage with listener-based change notification.
pub mod collection;
/// CRS identifiers and bounding envelopes.
pub mod geom;
/// Declarative YAML/XML schema loaders.
#[cfg(feature = "schema-loaders")]
pub mod loaders;
/// Runtime property instances (attributes, complex trees, features).
pub mod property;
/// Property types, descriptors, the builder, and type operations.
pub mod schema;

pub use collection::{CollectionEvent, CollectionEventKind, CollectionListener, FeatureCollection};
pub use geom::{Bounds, Crs};
pub use property::{
    Attribute, ComplexAttribute, Feature, GeometryAttribute, Property, PropertyValue,
    ValidationError,
};
pub use schema::{
    Binding, FeatureType, GeometryKind, Name, Occurs, PropertyDescriptor, PropertyType,
    Restriction, ScalarKind, SchemaError, TypeBuilder, TypeError, TypeFactory, TypeKind,
};
