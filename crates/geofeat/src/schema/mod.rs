// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The schema side of the model: property types, descriptors, the
//! builder, and the operations over built types.
//!
//! Types form a single-inheritance lattice of immutable `Arc`-shared
//! nodes. Everything here is constructed through an explicit
//! [`TypeFactory`]; there is no global factory state.

mod binding;
mod builder;
mod descriptor;
mod error;
mod factory;
mod feature_type;
mod name;
pub mod ops;
mod property_type;
mod restriction;
pub mod typespec;

pub use binding::{Binding, GeometryKind, ScalarKind};
pub use builder::TypeBuilder;
pub use descriptor::{Occurs, PropertyDescriptor};
pub use error::{SchemaError, TypeError};
pub use factory::TypeFactory;
pub use feature_type::FeatureType;
pub use name::Name;
pub use property_type::{PropertyType, TypeKind};
pub use restriction::Restriction;

/// Namespace of the built-in binding types and the abstract feature
/// root.
pub const CORE_NAMESPACE: &str = "geofeat";
