// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative schema loaders (feature `schema-loaders`).
//!
//! Feature type schemas can be kept in YAML or XML documents and loaded
//! into [`FeatureType`]s through the regular
//! [`TypeBuilder`](crate::schema::TypeBuilder) surface. Both formats
//! express the same model: a named type, an optional namespace and
//! default geometry, and a property list with binding, SRID,
//! nillability, and multiplicity.

pub mod xml;
pub mod yaml;

use std::fmt;
use std::sync::Arc;

use crate::geom::Crs;
use crate::schema::{
    Binding, FeatureType, Name, Occurs, PropertyDescriptor, SchemaError, TypeBuilder, TypeError,
    TypeFactory, CORE_NAMESPACE,
};

/// Errors loading a schema document.
#[derive(Debug)]
pub enum LoaderError {
    /// File access failed.
    Io(std::io::Error),
    /// YAML parse failure.
    Yaml(serde_yaml::Error),
    /// XML parse failure.
    Xml(roxmltree::Error),
    /// The document root element is not a feature type declaration.
    UnexpectedRoot(String),
    /// A required attribute is missing from an element.
    MissingAttribute {
        /// The element name.
        element: String,
        /// The missing attribute.
        attribute: String,
    },
    /// An occurrence bound that is neither a number nor `unbounded`.
    InvalidOccurs(String),
    /// Underlying type construction error.
    Type(TypeError),
    /// Underlying schema derivation error.
    Schema(SchemaError),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Schema document read failed: {}", err),
            Self::Yaml(err) => write!(f, "YAML parse failed: {}", err),
            Self::Xml(err) => write!(f, "XML parse failed: {}", err),
            Self::UnexpectedRoot(name) => {
                write!(f, "Expected featureType document, found <{}>", name)
            }
            Self::MissingAttribute { element, attribute } => {
                write!(f, "<{}> is missing attribute {:?}", element, attribute)
            }
            Self::InvalidOccurs(value) => {
                write!(f, "Invalid occurrence bound: {:?}", value)
            }
            Self::Type(err) => write!(f, "{}", err),
            Self::Schema(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Yaml(err) => Some(err),
            Self::Xml(err) => Some(err),
            Self::Type(err) => Some(err),
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

impl From<roxmltree::Error> for LoaderError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Xml(err)
    }
}

impl From<TypeError> for LoaderError {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}

impl From<SchemaError> for LoaderError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

/// One property row, format-independent.
pub(crate) struct RawProperty {
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) srid: Option<String>,
    pub(crate) nillable: bool,
    pub(crate) min_occurs: u32,
    pub(crate) max_occurs: Option<String>,
}

/// One schema document, format-independent.
pub(crate) struct RawSchema {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) default_geometry: Option<String>,
    pub(crate) properties: Vec<RawProperty>,
}

pub(crate) fn assemble(
    factory: &TypeFactory,
    raw: RawSchema,
) -> Result<FeatureType, LoaderError> {
    let mut builder = TypeBuilder::with_factory(factory.clone(), raw.name);
    if let Some(ns) = raw.namespace {
        builder = builder.namespace(ns);
    }
    if let Some(geom) = raw.default_geometry {
        builder = builder.default_geometry(Name::local(geom));
    }
    for p in raw.properties {
        builder = builder.add_descriptor(build_descriptor(factory, p)?);
    }
    Ok(builder.build_feature_type(false)?)
}

fn build_descriptor(
    factory: &TypeFactory,
    raw: RawProperty,
) -> Result<Arc<PropertyDescriptor>, LoaderError> {
    let binding = Binding::from_token(&raw.kind).ok_or(TypeError::UnknownTypeToken {
        token: raw.kind.clone(),
    })?;
    let crs = match &raw.srid {
        Some(srid) => Some(Crs::decode(srid).map_err(TypeError::from)?),
        None => None,
    };
    let ty = match binding {
        Binding::Scalar(kind) => factory.create_scalar_type(
            Name::new(CORE_NAMESPACE, kind.token()),
            kind,
            false,
            vec![],
            None,
            None,
        )?,
        Binding::Geometry(kind) => factory.create_geometry_type(
            Name::new(CORE_NAMESPACE, kind.token()),
            kind,
            crs,
            false,
            vec![],
            None,
            None,
        )?,
    };
    let max_occurs = parse_occurs(raw.max_occurs.as_deref())?;
    let descriptor = PropertyDescriptor::new(
        Name::local(raw.name),
        ty,
        raw.min_occurs,
        max_occurs,
        raw.nillable,
        None,
    )?;
    Ok(Arc::new(descriptor))
}

fn parse_occurs(value: Option<&str>) -> Result<Occurs, LoaderError> {
    match value {
        None => Ok(Occurs::Bounded(1)),
        Some("unbounded") => Ok(Occurs::Unbounded),
        Some(text) => text
            .parse::<u32>()
            .map(Occurs::Bounded)
            .map_err(|_| LoaderError::InvalidOccurs(text.to_string())),
    }
}
