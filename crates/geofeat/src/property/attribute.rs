// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar and geometry attribute instances.

use std::sync::Arc;

use geo::Geometry;

use crate::geom::{Bounds, Crs};
use crate::schema::{Name, PropertyDescriptor};

use super::{PropertyValue, ValidationError};

/// A scalar attribute: a value bound to a descriptor, with optional
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    descriptor: Arc<PropertyDescriptor>,
    value: PropertyValue,
    id: Option<String>,
}

impl Attribute {
    /// A null-valued attribute.
    pub fn new(descriptor: Arc<PropertyDescriptor>) -> Self {
        Self {
            descriptor,
            value: PropertyValue::Null,
            id: None,
        }
    }

    /// An attribute holding `value`.
    pub fn with_value(descriptor: Arc<PropertyDescriptor>, value: PropertyValue) -> Self {
        Self {
            descriptor,
            value,
            id: None,
        }
    }

    /// Attach an identifier. Identity is immutable once a feature owns
    /// the attribute.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The bound descriptor.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    /// The slot name.
    pub fn name(&self) -> &Name {
        self.descriptor.name()
    }

    /// The current value.
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// The identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Store `value` directly.
    ///
    /// No conversion to the binding type is performed here; callers that
    /// want validation opt in through [`Attribute::check_value`] first.
    /// Silently coercing would mask type errors.
    pub fn set_value(&mut self, value: PropertyValue) {
        self.value = value;
    }

    /// Opt-in validation: nillability, binding family, and restrictions.
    pub fn check_value(&self, value: &PropertyValue) -> Result<(), ValidationError> {
        if value.is_null() {
            if self.descriptor.is_nillable() {
                return Ok(());
            }
            return Err(ValidationError::NotNillable {
                name: self.name().clone(),
            });
        }
        match self.descriptor.ty().binding() {
            Some(binding) if value.conforms_to(binding) => {}
            Some(binding) => {
                return Err(ValidationError::BindingMismatch {
                    name: self.name().clone(),
                    expected: binding.token().to_string(),
                    got: value.kind_name(),
                });
            }
            None => {
                return Err(ValidationError::BindingMismatch {
                    name: self.name().clone(),
                    expected: self.descriptor.ty().name().to_string(),
                    got: value.kind_name(),
                });
            }
        }
        if self
            .descriptor
            .ty()
            .restrictions()
            .iter()
            .any(|r| !r.check(value))
        {
            return Err(ValidationError::RestrictionViolated {
                name: self.name().clone(),
            });
        }
        Ok(())
    }
}

/// A geometry-valued attribute with a cached bounding envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryAttribute {
    descriptor: Arc<PropertyDescriptor>,
    value: Option<Geometry<f64>>,
    bounds: Option<Bounds>,
}

impl GeometryAttribute {
    /// An empty geometry attribute.
    pub fn new(descriptor: Arc<PropertyDescriptor>) -> Self {
        Self {
            descriptor,
            value: None,
            bounds: None,
        }
    }

    /// A geometry attribute holding `value`.
    pub fn with_value(descriptor: Arc<PropertyDescriptor>, value: Option<Geometry<f64>>) -> Self {
        Self {
            descriptor,
            value,
            bounds: None,
        }
    }

    /// The bound descriptor.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    /// The slot name.
    pub fn name(&self) -> &Name {
        self.descriptor.name()
    }

    /// The current geometry.
    pub fn value(&self) -> Option<&Geometry<f64>> {
        self.value.as_ref()
    }

    /// The CRS declared by the bound type.
    pub fn crs(&self) -> Option<Crs> {
        self.descriptor.ty().crs()
    }

    /// Replace the geometry.
    ///
    /// The cached envelope is NOT invalidated: consumers own the cache
    /// lifecycle and refresh it through [`GeometryAttribute::set_bounds`]
    /// when they need the envelope to follow the value.
    pub fn set_value(&mut self, value: Option<Geometry<f64>>) {
        self.value = value;
    }

    /// The bounding envelope.
    ///
    /// Returns the cached envelope when one is set; otherwise computes
    /// it from the current geometry, in the type's CRS, and caches it.
    /// After a later `set_value` the cache may be stale until
    /// [`GeometryAttribute::set_bounds`] refreshes it.
    pub fn bounds(&mut self) -> Bounds {
        if self.bounds.is_none() {
            self.bounds = Some(self.compute_bounds());
        }
        self.bounds.clone().unwrap_or_default()
    }

    /// Set or clear the cached envelope. Clearing makes the next
    /// [`GeometryAttribute::bounds`] call recompute.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// The envelope of the current value, bypassing the cache.
    pub fn compute_bounds(&self) -> Bounds {
        match &self.value {
            Some(geometry) => Bounds::of(geometry, self.crs()),
            None => Bounds::empty_with_crs(self.crs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Restriction, ScalarKind, TypeFactory};
    use geo::Point;
    use std::sync::Arc;

    fn descriptor(nillable: bool, restrictions: Vec<Restriction>) -> Arc<PropertyDescriptor> {
        let factory = TypeFactory::new();
        let ty = factory
            .create_scalar_type(
                Name::local("String"),
                ScalarKind::String,
                false,
                restrictions,
                None,
                None,
            )
            .expect("type");
        Arc::new(
            PropertyDescriptor::new(
                Name::local("label"),
                ty,
                1,
                crate::schema::Occurs::Bounded(1),
                nillable,
                None,
            )
            .expect("descriptor"),
        )
    }

    fn point_descriptor() -> Arc<PropertyDescriptor> {
        let factory = TypeFactory::new();
        let ty = factory
            .create_geometry_type(
                Name::local("Point"),
                crate::schema::GeometryKind::Point,
                Some(Crs::WGS84),
                false,
                vec![],
                None,
                None,
            )
            .expect("type");
        Arc::new(PropertyDescriptor::single(Name::local("location"), ty).expect("descriptor"))
    }

    #[test]
    fn test_set_value_stores_directly() {
        let mut attr = Attribute::new(descriptor(true, vec![]));
        // A value outside the binding family is stored as-is; validation
        // is a separate opt-in step.
        attr.set_value(PropertyValue::Int(5));
        assert_eq!(attr.value(), &PropertyValue::Int(5));
        assert!(attr.check_value(&PropertyValue::Int(5)).is_err());
    }

    #[test]
    fn test_check_value_nillability() {
        let attr = Attribute::new(descriptor(false, vec![]));
        assert!(matches!(
            attr.check_value(&PropertyValue::Null),
            Err(ValidationError::NotNillable { .. })
        ));
        let nillable = Attribute::new(descriptor(true, vec![]));
        assert!(nillable.check_value(&PropertyValue::Null).is_ok());
    }

    #[test]
    fn test_check_value_restrictions() {
        let attr = Attribute::new(descriptor(true, vec![Restriction::MaxLength(4)]));
        assert!(attr.check_value(&PropertyValue::from("abcd")).is_ok());
        assert!(matches!(
            attr.check_value(&PropertyValue::from("abcde")),
            Err(ValidationError::RestrictionViolated { .. })
        ));
    }

    #[test]
    fn test_bounds_cached_until_refreshed() {
        let mut attr = GeometryAttribute::with_value(
            point_descriptor(),
            Some(Geometry::Point(Point::new(1.0, 2.0))),
        );
        let first = attr.bounds();
        assert_eq!(first.rect().map(|r| r.min().x), Some(1.0));

        // Replacing the value leaves the cache stale until set_bounds.
        attr.set_value(Some(Geometry::Point(Point::new(9.0, 9.0))));
        let stale = attr.bounds();
        assert_eq!(stale, first);

        attr.set_bounds(None);
        let fresh = attr.bounds();
        assert_eq!(fresh.rect().map(|r| r.min().x), Some(9.0));
        assert_eq!(fresh.crs(), Some(Crs::WGS84));
    }
}
