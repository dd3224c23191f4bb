// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature instances: identified records over a feature type.

use std::sync::Arc;

use crate::geom::Bounds;
use crate::schema::ops::default_value;
use crate::schema::{FeatureType, Name, Occurs, PropertyDescriptor, TypeKind};

use super::{
    Attribute, ComplexAttribute, GeometryAttribute, Property, PropertyValue, ValidationError,
};

/// A feature: a complex attribute at the root of a record, carrying an
/// identity.
///
/// The id is the uniqueness key used by
/// [`FeatureCollection`](crate::collection::FeatureCollection); a
/// feature without one can exist standalone but cannot be stored. The id
/// is immutable once assigned.
#[derive(Debug, Clone)]
pub struct Feature {
    ty: FeatureType,
    id: Option<String>,
    root: ComplexAttribute,
}

impl Feature {
    /// Create a feature from explicit properties, validated against the
    /// type's descriptors.
    pub fn new(
        ty: FeatureType,
        id: Option<String>,
        properties: Vec<Property>,
    ) -> Result<Self, ValidationError> {
        let root = ComplexAttribute::new(self_descriptor(&ty)?, properties)?;
        Ok(Self { ty, id, root })
    }

    /// Create a feature populated with synthesized defaults: one
    /// occurrence per required descriptor, nothing for optional ones.
    pub fn with_defaults(ty: FeatureType, id: Option<String>) -> Result<Self, ValidationError> {
        let mut properties = Vec::new();
        for d in ty.descriptors() {
            if d.min_occurs() == 0 {
                continue;
            }
            for _ in 0..d.min_occurs() {
                properties.push(default_property(d)?);
            }
        }
        Self::new(ty, id, properties)
    }

    /// The feature id, if assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The feature type.
    pub fn feature_type(&self) -> &FeatureType {
        &self.ty
    }

    /// The root complex attribute.
    pub fn root(&self) -> &ComplexAttribute {
        &self.root
    }

    /// Mutable access to the root complex attribute.
    pub fn root_mut(&mut self) -> &mut ComplexAttribute {
        &mut self.root
    }

    /// The first property matching the query name.
    pub fn property(&self, name: &Name) -> Option<&Property> {
        self.root.property(name)
    }

    /// The value of the named attribute, by local name.
    ///
    /// Complex-valued properties have no scalar rendering and yield
    /// `None`; an absent property also yields `None`.
    pub fn attribute(&self, name: &str) -> Option<PropertyValue> {
        self.root.property(&Name::local(name)).and_then(Property::value)
    }

    /// Set the value of the named attribute.
    ///
    /// Scalar slots store the value directly (the validation split of
    /// [`Attribute::set_value`] applies); geometry slots accept geometry
    /// or null values only.
    pub fn set_attribute(&mut self, name: &str, value: PropertyValue) -> Result<(), ValidationError> {
        let query = Name::local(name);
        let Some(property) = self.root.property_mut(&query) else {
            return Err(ValidationError::UnknownProperty { name: query });
        };
        match property {
            Property::Attribute(a) => {
                a.set_value(value);
                Ok(())
            }
            Property::Geometry(g) => match value {
                PropertyValue::Geometry(geometry) => {
                    g.set_value(Some(geometry));
                    Ok(())
                }
                PropertyValue::Null => {
                    g.set_value(None);
                    Ok(())
                }
                other => Err(ValidationError::BindingMismatch {
                    name: query,
                    expected: "geometry".to_string(),
                    got: other.kind_name(),
                }),
            },
            Property::Complex(_) => Err(ValidationError::BindingMismatch {
                name: query,
                expected: "complex".to_string(),
                got: value.kind_name(),
            }),
        }
    }

    /// The distinguished geometry property, resolved through the type's
    /// default geometry.
    pub fn default_geometry(&self) -> Option<&GeometryAttribute> {
        let descriptor = self.ty.geometry_descriptor()?;
        self.root
            .property(descriptor.name())
            .and_then(Property::as_geometry)
    }

    /// The envelope of this feature: the union of the envelopes of every
    /// geometry-valued property's current value.
    ///
    /// Always computed fresh; the per-attribute bounds cache is not
    /// consulted.
    pub fn bounds(&self) -> Bounds {
        let mut acc = Bounds::empty();
        for child in self.root.children() {
            if let Property::Geometry(g) = child {
                acc.expand_to_include(&g.compute_bounds());
            }
        }
        acc
    }
}

/// The descriptor binding a feature type's root into its record.
fn self_descriptor(ty: &FeatureType) -> Result<Arc<PropertyDescriptor>, ValidationError> {
    let d = PropertyDescriptor::new(
        ty.name().clone(),
        ty.root().clone(),
        1,
        Occurs::Bounded(1),
        true,
        None,
    )?;
    Ok(Arc::new(d))
}

/// Materialize one default occurrence of a descriptor.
fn default_property(d: &Arc<PropertyDescriptor>) -> Result<Property, ValidationError> {
    match d.ty().kind() {
        TypeKind::Complex { descriptors } => {
            let mut children = Vec::new();
            for nested in descriptors {
                if nested.min_occurs() == 0 {
                    continue;
                }
                for _ in 0..nested.min_occurs() {
                    children.push(default_property(nested)?);
                }
            }
            Ok(Property::Complex(ComplexAttribute::new(
                d.clone(),
                children,
            )?))
        }
        TypeKind::Geometry { .. } => {
            let value = match default_value(d)? {
                PropertyValue::Geometry(g) => Some(g),
                _ => None,
            };
            Ok(Property::Geometry(GeometryAttribute::with_value(
                d.clone(),
                value,
            )))
        }
        TypeKind::Scalar { .. } => {
            let value = default_value(d)?;
            Ok(Property::Attribute(Attribute::with_value(d.clone(), value)))
        }
    }
}
