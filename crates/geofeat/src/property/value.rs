// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values.

use chrono::{DateTime, Utc};
use geo::Geometry;

use crate::schema::{Binding, GeometryKind, ScalarKind};

/// A value held by a property instance.
///
/// One variant per scalar binding plus geometry; `Null` is the explicit
/// absent value for nillable slots.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Date(DateTime<Utc>),
    Geometry(Geometry<f64>),
}

impl PropertyValue {
    /// Whether this is the explicit null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as date.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as geometry.
    pub fn as_geometry(&self) -> Option<&Geometry<f64>> {
        match self {
            Self::Geometry(v) => Some(v),
            _ => None,
        }
    }

    /// Any numeric variant widened to f64.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(f64::from(*v)),
            Self::Long(v) => Some(*v as f64),
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this value belongs to the given binding's value family.
    ///
    /// `Null` belongs to every family; nillability is a descriptor
    /// concern, not a value concern.
    pub fn conforms_to(&self, binding: Binding) -> bool {
        match (self, binding) {
            (Self::Null, _) => true,
            (Self::Bool(_), Binding::Scalar(ScalarKind::Bool)) => true,
            (Self::Int(_), Binding::Scalar(ScalarKind::Int)) => true,
            (Self::Long(_), Binding::Scalar(ScalarKind::Long)) => true,
            (Self::Float(_), Binding::Scalar(ScalarKind::Float)) => true,
            (Self::Double(_), Binding::Scalar(ScalarKind::Double)) => true,
            (Self::String(_), Binding::Scalar(ScalarKind::String)) => true,
            (Self::Date(_), Binding::Scalar(ScalarKind::Date)) => true,
            (Self::Geometry(g), Binding::Geometry(kind)) => kind.accepts(g),
            _ => false,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Geometry(_) => "geometry",
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Geometry<f64>> for PropertyValue {
    fn from(v: Geometry<f64>) -> Self {
        Self::Geometry(v)
    }
}

/// The synthesized default for a binding: numeric zero, empty string,
/// `false`, the Unix epoch, or a degenerate geometry at the origin.
///
/// Total over every scalar and geometry kind.
pub fn binding_default(binding: Binding) -> PropertyValue {
    match binding {
        Binding::Scalar(ScalarKind::Bool) => PropertyValue::Bool(false),
        Binding::Scalar(ScalarKind::Int) => PropertyValue::Int(0),
        Binding::Scalar(ScalarKind::Long) => PropertyValue::Long(0),
        Binding::Scalar(ScalarKind::Float) => PropertyValue::Float(0.0),
        Binding::Scalar(ScalarKind::Double) => PropertyValue::Double(0.0),
        Binding::Scalar(ScalarKind::String) => PropertyValue::String(String::new()),
        Binding::Scalar(ScalarKind::Date) => PropertyValue::Date(DateTime::UNIX_EPOCH),
        Binding::Geometry(kind) => PropertyValue::Geometry(degenerate_geometry(kind)),
    }
}

/// The minimal valid geometry of each kind, built from the origin
/// coordinate.
fn degenerate_geometry(kind: GeometryKind) -> Geometry<f64> {
    use geo::{
        GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    };
    let origin = Point::new(0.0, 0.0);
    match kind {
        GeometryKind::Point | GeometryKind::Any => Geometry::Point(origin),
        GeometryKind::LineString => {
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (0.0, 0.0)]))
        }
        GeometryKind::Polygon => Geometry::Polygon(Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]),
            vec![],
        )),
        GeometryKind::MultiPoint => Geometry::MultiPoint(MultiPoint::from(vec![origin])),
        GeometryKind::MultiLineString => Geometry::MultiLineString(MultiLineString::new(vec![])),
        GeometryKind::MultiPolygon => Geometry::MultiPolygon(MultiPolygon::new(vec![])),
        GeometryKind::GeometryCollection => {
            Geometry::GeometryCollection(GeometryCollection::default())
        }
    }
}
