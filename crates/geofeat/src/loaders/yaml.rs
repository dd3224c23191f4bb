// SPDX-License-Identifier: Apache-2.0 OR MIT

//! YAML schema loader.
//!
//! # Example document
//!
//! ```yaml
//! # roads.yaml
//! name: roads
//! namespace: app
//! default_geometry: geom
//! properties:
//!   - name: geom
//!     type: LineString
//!     srid: "EPSG:4326"
//!   - name: name
//!     type: String
//!   - name: alias
//!     type: String
//!     min_occurs: 0
//!     max_occurs: unbounded
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::schema::{FeatureType, TypeFactory};

use super::{LoaderError, RawProperty, RawSchema};

/// Root YAML document structure.
#[derive(Debug, Deserialize)]
pub struct YamlSchemaDocument {
    /// Type name.
    pub name: String,
    /// Type namespace (optional).
    #[serde(default)]
    pub namespace: Option<String>,
    /// Name of the default geometry property (optional).
    #[serde(default)]
    pub default_geometry: Option<String>,
    /// Property rows, in declaration order.
    #[serde(default)]
    pub properties: Vec<YamlProperty>,
}

/// A single property row in YAML form.
#[derive(Debug, Deserialize)]
pub struct YamlProperty {
    /// Property name.
    pub name: String,
    /// Binding token from the fixed vocabulary (default `String`).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// SRID string, e.g. `"4326"` or `"EPSG:4326"`.
    #[serde(default)]
    pub srid: Option<String>,
    /// Whether the property admits null (default true).
    #[serde(default = "default_nillable")]
    pub nillable: bool,
    /// Lower occurrence bound (default 1).
    #[serde(default = "default_min_occurs")]
    pub min_occurs: u32,
    /// Upper occurrence bound: a number or `unbounded` (default 1).
    #[serde(default)]
    pub max_occurs: Option<String>,
}

fn default_kind() -> String {
    "String".to_string()
}

fn default_nillable() -> bool {
    true
}

fn default_min_occurs() -> u32 {
    1
}

/// Parse a YAML schema document into a feature type.
pub fn from_str(factory: &TypeFactory, yaml: &str) -> Result<FeatureType, LoaderError> {
    let doc: YamlSchemaDocument = serde_yaml::from_str(yaml)?;
    super::assemble(factory, raw_schema(doc))
}

/// Load a YAML schema document from a file.
pub fn from_path(factory: &TypeFactory, path: impl AsRef<Path>) -> Result<FeatureType, LoaderError> {
    let text = fs::read_to_string(path)?;
    from_str(factory, &text)
}

fn raw_schema(doc: YamlSchemaDocument) -> RawSchema {
    RawSchema {
        name: doc.name,
        namespace: doc.namespace,
        default_geometry: doc.default_geometry,
        properties: doc
            .properties
            .into_iter()
            .map(|p| RawProperty {
                name: p.name,
                kind: p.kind,
                srid: p.srid,
                nillable: p.nillable,
                min_occurs: p.min_occurs,
                max_occurs: p.max_occurs,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Name, Occurs};

    const ROADS: &str = r#"
name: roads
namespace: app
default_geometry: geom
properties:
  - name: geom
    type: LineString
    srid: "EPSG:4326"
  - name: name
    type: String
  - name: alias
    type: String
    min_occurs: 0
    max_occurs: unbounded
"#;

    #[test]
    fn test_load_roads() {
        let factory = TypeFactory::new();
        let ty = from_str(&factory, ROADS).expect("load");
        assert_eq!(ty.name().to_string(), "app#roads");
        assert_eq!(ty.descriptors().len(), 3);
        assert_eq!(ty.default_geometry().map(Name::local_part), Some("geom"));

        let alias = ty.descriptor(&Name::local("alias")).expect("alias");
        assert_eq!(alias.min_occurs(), 0);
        assert_eq!(alias.max_occurs(), Occurs::Unbounded);
        assert!(!ty.is_simple());
    }

    #[test]
    fn test_unknown_binding_fails() {
        let factory = TypeFactory::new();
        let err = from_str(
            &factory,
            "name: t\nproperties:\n  - name: x\n    type: Blob\n",
        )
        .expect_err("must fail");
        assert!(matches!(err, LoaderError::Type(_)));
    }

    #[test]
    fn test_bad_occurs_fails() {
        let factory = TypeFactory::new();
        let err = from_str(
            &factory,
            "name: t\nproperties:\n  - name: x\n    max_occurs: lots\n",
        )
        .expect_err("must fail");
        assert!(matches!(err, LoaderError::InvalidOccurs(_)));
    }
}
