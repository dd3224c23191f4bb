// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial support types: coordinate reference systems and envelopes.
//!
//! Geometry values themselves are [`geo::Geometry`]; this module adds the
//! two pieces the feature model needs around them: an EPSG-coded [`Crs`]
//! and a possibly-empty [`Bounds`] envelope with union semantics.

mod bounds;
mod crs;

pub use bounds::Bounds;
pub use crs::{Crs, CrsParseError};
