// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar and geometry bindings.
//!
//! A binding names the concrete value family a type represents. The sets
//! are closed: every consumption site matches exhaustively, so adding a
//! binding is a compile-visible change rather than a runtime surprise.

use geo::Geometry;

/// Scalar value families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Long,
    Float,
    Double,
    String,
    Date,
}

impl ScalarKind {
    /// All scalar kinds, in vocabulary order.
    pub const ALL: [ScalarKind; 7] = [
        ScalarKind::String,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Double,
        ScalarKind::Float,
        ScalarKind::Bool,
        ScalarKind::Date,
    ];

    /// The canonical vocabulary token, as used by the type-spec language.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Bool => "Boolean",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::Date => "Date",
        }
    }

    /// Parse a vocabulary token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Boolean" => Some(Self::Bool),
            "Integer" => Some(Self::Int),
            "Long" => Some(Self::Long),
            "Float" => Some(Self::Float),
            "Double" => Some(Self::Double),
            "String" => Some(Self::String),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Geometry value families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    /// Any geometry; matches every concrete shape.
    Any,
}

impl GeometryKind {
    /// All geometry kinds, in vocabulary order.
    pub const ALL: [GeometryKind; 8] = [
        GeometryKind::Any,
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// The canonical vocabulary token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::Any => "Geometry",
        }
    }

    /// Parse a vocabulary token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Point" => Some(Self::Point),
            "LineString" => Some(Self::LineString),
            "Polygon" => Some(Self::Polygon),
            "MultiPoint" => Some(Self::MultiPoint),
            "MultiLineString" => Some(Self::MultiLineString),
            "MultiPolygon" => Some(Self::MultiPolygon),
            "GeometryCollection" => Some(Self::GeometryCollection),
            "Geometry" => Some(Self::Any),
            _ => None,
        }
    }

    /// Whether a concrete geometry value belongs to this family.
    pub fn accepts(&self, geometry: &Geometry<f64>) -> bool {
        match self {
            Self::Any => true,
            Self::Point => matches!(geometry, Geometry::Point(_)),
            Self::LineString => matches!(geometry, Geometry::LineString(_)),
            Self::Polygon => matches!(geometry, Geometry::Polygon(_)),
            Self::MultiPoint => matches!(geometry, Geometry::MultiPoint(_)),
            Self::MultiLineString => matches!(geometry, Geometry::MultiLineString(_)),
            Self::MultiPolygon => matches!(geometry, Geometry::MultiPolygon(_)),
            Self::GeometryCollection => matches!(geometry, Geometry::GeometryCollection(_)),
        }
    }
}

/// A binding key: the registry key of the [`TypeBuilder`] binding table
/// and the unit of the type-spec vocabulary.
///
/// [`TypeBuilder`]: crate::schema::TypeBuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Scalar(ScalarKind),
    Geometry(GeometryKind),
}

impl Binding {
    /// The canonical vocabulary token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.token(),
            Self::Geometry(kind) => kind.token(),
        }
    }

    /// Parse a vocabulary token.
    pub fn from_token(token: &str) -> Option<Self> {
        ScalarKind::from_token(token)
            .map(Self::Scalar)
            .or_else(|| GeometryKind::from_token(token).map(Self::Geometry))
    }

    /// Whether this is a geometry binding.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }
}

impl From<ScalarKind> for Binding {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<GeometryKind> for Binding {
    fn from(kind: GeometryKind) -> Self {
        Self::Geometry(kind)
    }
}
