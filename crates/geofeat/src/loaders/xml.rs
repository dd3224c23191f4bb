// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XML schema loader.
//!
//! # Example document
//!
//! ```xml
//! <featureType name="roads" namespace="app" defaultGeometry="geom">
//!   <property name="geom" type="LineString" srid="EPSG:4326"/>
//!   <property name="name" type="String"/>
//!   <property name="alias" type="String" minOccurs="0" maxOccurs="unbounded"/>
//! </featureType>
//! ```

use std::fs;
use std::path::Path;

use crate::schema::{FeatureType, TypeFactory};

use super::{LoaderError, RawProperty, RawSchema};

/// Parse an XML schema document into a feature type.
pub fn from_str(factory: &TypeFactory, xml: &str) -> Result<FeatureType, LoaderError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "featureType" {
        return Err(LoaderError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    let name = require_attr(&root, "name")?;
    let mut properties = Vec::new();
    for node in root.children().filter(|n| n.is_element()) {
        if node.tag_name().name() != "property" {
            continue;
        }
        let min_occurs = match node.attribute("minOccurs") {
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| LoaderError::InvalidOccurs(text.to_string()))?,
            None => 1,
        };
        properties.push(RawProperty {
            name: require_attr(&node, "name")?,
            kind: node.attribute("type").unwrap_or("String").to_string(),
            srid: node.attribute("srid").map(str::to_string),
            nillable: node
                .attribute("nillable")
                .map(|v| v == "true")
                .unwrap_or(true),
            min_occurs,
            max_occurs: node.attribute("maxOccurs").map(str::to_string),
        });
    }

    super::assemble(
        factory,
        RawSchema {
            name,
            namespace: root.attribute("namespace").map(str::to_string),
            default_geometry: root.attribute("defaultGeometry").map(str::to_string),
            properties,
        },
    )
}

/// Load an XML schema document from a file.
pub fn from_path(factory: &TypeFactory, path: impl AsRef<Path>) -> Result<FeatureType, LoaderError> {
    let text = fs::read_to_string(path)?;
    from_str(factory, &text)
}

fn require_attr(node: &roxmltree::Node<'_, '_>, attribute: &str) -> Result<String, LoaderError> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| LoaderError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: attribute.to_string(),
        })
}
