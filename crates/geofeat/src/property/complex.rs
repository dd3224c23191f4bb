// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Complex attributes: descriptor-aligned trees of properties.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::schema::{Name, PropertyDescriptor, TypeKind};

use super::{Attribute, GeometryAttribute, PropertyValue, ValidationError};

/// A property instance: one of the three attribute shapes.
///
/// Consumption sites match exhaustively; there is no open hierarchy to
/// downcast through.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A scalar attribute.
    Attribute(Attribute),
    /// A geometry-valued attribute.
    Geometry(GeometryAttribute),
    /// A nested complex attribute.
    Complex(ComplexAttribute),
}

impl Property {
    /// The bound descriptor.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        match self {
            Self::Attribute(a) => a.descriptor(),
            Self::Geometry(g) => g.descriptor(),
            Self::Complex(c) => c.descriptor(),
        }
    }

    /// The slot name.
    pub fn name(&self) -> &Name {
        self.descriptor().name()
    }

    /// The scalar or geometry value, cloned into a [`PropertyValue`].
    /// Complex properties have no scalar rendering and yield `None`.
    pub fn value(&self) -> Option<PropertyValue> {
        match self {
            Self::Attribute(a) => Some(a.value().clone()),
            Self::Geometry(g) => Some(
                g.value()
                    .cloned()
                    .map(PropertyValue::Geometry)
                    .unwrap_or(PropertyValue::Null),
            ),
            Self::Complex(_) => None,
        }
    }

    /// Borrow as a scalar attribute.
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow as a geometry attribute.
    pub fn as_geometry(&self) -> Option<&GeometryAttribute> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }

    /// Borrow as a complex attribute.
    pub fn as_complex(&self) -> Option<&ComplexAttribute> {
        match self {
            Self::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Mutably borrow as a geometry attribute.
    pub fn as_geometry_mut(&mut self) -> Option<&mut GeometryAttribute> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }

    /// Mutably borrow as a scalar attribute.
    pub fn as_attribute_mut(&mut self) -> Option<&mut Attribute> {
        match self {
            Self::Attribute(a) => Some(a),
            _ => None,
        }
    }

    /// Mutably borrow as a complex attribute.
    pub fn as_complex_mut(&mut self) -> Option<&mut ComplexAttribute> {
        match self {
            Self::Complex(c) => Some(c),
            _ => None,
        }
    }
}

/// An ordered collection of child properties validated against the
/// declared descriptors of a complex type.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexAttribute {
    descriptor: Arc<PropertyDescriptor>,
    children: Vec<Property>,
}

impl ComplexAttribute {
    /// Create a complex attribute, validating descriptor alignment.
    ///
    /// The children must be a permutation-preserving subset of the
    /// declared descriptors (same relative order, occurrences of one
    /// descriptor adjacent), and each descriptor's occurrence count must
    /// respect its multiplicity. A declared slot may be absent only when
    /// `min_occurs == 0` or the descriptor is nillable (a default can
    /// stand in).
    pub fn new(
        descriptor: Arc<PropertyDescriptor>,
        children: Vec<Property>,
    ) -> Result<Self, ValidationError> {
        validate_children(&descriptor, &children)?;
        Ok(Self {
            descriptor,
            children,
        })
    }

    /// The bound descriptor.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    /// The slot name.
    pub fn name(&self) -> &Name {
        self.descriptor.name()
    }

    /// The children, in order.
    pub fn children(&self) -> &[Property] {
        &self.children
    }

    /// The first child matching the query name.
    ///
    /// Linear scan; a query without a namespace matches by local part
    /// alone. O(children); record-sized collections, not documents.
    pub fn property(&self, name: &Name) -> Option<&Property> {
        self.children.iter().find(|p| name.matches(p.name()))
    }

    /// Mutable variant of [`ComplexAttribute::property`].
    pub fn property_mut(&mut self, name: &Name) -> Option<&mut Property> {
        self.children.iter_mut().find(|p| name.matches(p.name()))
    }

    /// Every child matching the query name, in order.
    pub fn properties<'a>(&'a self, name: &'a Name) -> impl Iterator<Item = &'a Property> {
        self.children.iter().filter(move |p| name.matches(p.name()))
    }

    /// Swap the child collection in place.
    ///
    /// The new collection must have exactly the same size as the old one
    /// and must itself validate: this is a value swap preserving
    /// descriptor alignment, not a general collection replace.
    pub fn set_value(&mut self, children: Vec<Property>) -> Result<(), ValidationError> {
        if children.len() != self.children.len() {
            return Err(ValidationError::SizeMismatch {
                expected: self.children.len(),
                got: children.len(),
            });
        }
        validate_children(&self.descriptor, &children)?;
        self.children = children;
        Ok(())
    }

    /// Render the tree to `depth` levels.
    ///
    /// Children are walked in descriptor order; multi-valued descriptors
    /// expand positionally (`tags[0]`, `tags[1]`, ...). Sub-trees below
    /// the depth bound render as a `...` placeholder.
    pub fn format_tree(&self, depth: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name());
        self.render_children(&mut out, 1, depth);
        out
    }

    fn render_children(&self, out: &mut String, indent: usize, depth: usize) {
        let pad = "  ".repeat(indent);
        if depth == 0 {
            let _ = writeln!(out, "{}...", pad);
            return;
        }
        for declared in self.descriptor.ty().descriptors() {
            let occurrences: Vec<&Property> = self
                .children
                .iter()
                .filter(|p| p.name() == declared.name())
                .collect();
            let positional = occurrences.len() > 1;
            for (i, child) in occurrences.into_iter().enumerate() {
                let label = if positional {
                    format!("{}[{}]", child.name().local_part(), i)
                } else {
                    child.name().local_part().to_string()
                };
                match child {
                    Property::Attribute(a) => {
                        let _ = writeln!(out, "{}{} = {:?}", pad, label, a.value());
                    }
                    Property::Geometry(g) => match g.value() {
                        Some(geom) => {
                            let _ = writeln!(out, "{}{} = <{}>", pad, label, geometry_tag(geom));
                        }
                        None => {
                            let _ = writeln!(out, "{}{} = <empty>", pad, label);
                        }
                    },
                    Property::Complex(c) => {
                        let _ = writeln!(out, "{}{}", pad, label);
                        c.render_children(out, indent + 1, depth - 1);
                    }
                }
            }
        }
    }
}

fn geometry_tag(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

/// Alignment validation: order, membership, and multiplicity.
fn validate_children(
    descriptor: &Arc<PropertyDescriptor>,
    children: &[Property],
) -> Result<(), ValidationError> {
    let declared = match descriptor.ty().kind() {
        TypeKind::Complex { descriptors } => descriptors,
        // A non-complex descriptor admits no children at all.
        _ => {
            return match children.first() {
                None => Ok(()),
                Some(child) => Err(ValidationError::UnknownProperty {
                    name: child.name().clone(),
                }),
            };
        }
    };

    // Order and membership: children must follow declared order, with
    // occurrences of one descriptor adjacent.
    let mut cursor = 0usize;
    for child in children {
        let name = child.name();
        if cursor < declared.len() && declared[cursor].name() == name {
            continue;
        }
        match declared[cursor.min(declared.len())..]
            .iter()
            .position(|d| d.name() == name)
        {
            Some(offset) => cursor += offset,
            None => {
                if declared[..cursor].iter().any(|d| d.name() == name) {
                    return Err(ValidationError::OutOfOrder { name: name.clone() });
                }
                return Err(ValidationError::UnknownProperty { name: name.clone() });
            }
        }
    }

    // Multiplicity: per-descriptor occurrence counts.
    for d in declared {
        let count = children.iter().filter(|p| p.name() == d.name()).count();
        if !d.max_occurs().admits(count) {
            return Err(ValidationError::Multiplicity {
                name: d.name().clone(),
                count,
                min: d.min_occurs(),
                max: d.max_occurs(),
            });
        }
        if count < d.min_occurs() as usize {
            // An empty slot is tolerable when a default can stand in.
            let absent_ok = count == 0 && d.is_nillable();
            if !absent_ok {
                return Err(ValidationError::Multiplicity {
                    name: d.name().clone(),
                    count,
                    min: d.min_occurs(),
                    max: d.max_occurs(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Occurs, PropertyType, ScalarKind, TypeFactory};

    struct Fixture {
        root: Arc<PropertyDescriptor>,
        a: Arc<PropertyDescriptor>,
        b: Arc<PropertyDescriptor>,
    }

    /// `{a: 1..1, b: 0..*}` with configurable nillability of `a`.
    fn fixture(a_nillable: bool) -> Fixture {
        let factory = TypeFactory::new();
        let string_ty = factory
            .create_scalar_type(
                Name::local("String"),
                ScalarKind::String,
                false,
                vec![],
                None,
                None,
            )
            .expect("scalar");
        let a = Arc::new(
            PropertyDescriptor::new(
                Name::local("a"),
                string_ty.clone(),
                1,
                Occurs::Bounded(1),
                a_nillable,
                if a_nillable {
                    Some(PropertyValue::from("fallback"))
                } else {
                    None
                },
            )
            .expect("a"),
        );
        let b = Arc::new(
            PropertyDescriptor::new(
                Name::local("b"),
                string_ty,
                0,
                Occurs::Unbounded,
                true,
                None,
            )
            .expect("b"),
        );
        let complex_ty = factory
            .create_complex_type(
                Name::local("pair"),
                vec![a.clone(), b.clone()],
                false,
                vec![],
                None,
                None,
            )
            .expect("complex");
        let root = Arc::new(
            PropertyDescriptor::new(
                Name::local("root"),
                complex_ty,
                1,
                Occurs::Bounded(1),
                true,
                None,
            )
            .expect("root"),
        );
        Fixture { root, a, b }
    }

    fn attr(d: &Arc<PropertyDescriptor>, v: &str) -> Property {
        Property::Attribute(Attribute::with_value(d.clone(), PropertyValue::from(v)))
    }

    fn field(ty: &Arc<PropertyType>, name: &str) -> Arc<PropertyDescriptor> {
        ty.descriptor(&Name::local(name)).expect("declared").clone()
    }

    #[test]
    fn test_two_b_no_a_fails_when_a_required() {
        let fx = fixture(false);
        let children = vec![attr(&fx.b, "b1"), attr(&fx.b, "b2")];
        let err = ComplexAttribute::new(fx.root, children).expect_err("must fail");
        assert!(matches!(err, ValidationError::Multiplicity { .. }));
    }

    #[test]
    fn test_two_b_no_a_succeeds_when_a_nillable_with_default() {
        let fx = fixture(true);
        let children = vec![attr(&fx.b, "b1"), attr(&fx.b, "b2")];
        let complex = ComplexAttribute::new(fx.root, children).expect("valid");
        assert_eq!(complex.children().len(), 2);
    }

    #[test]
    fn test_out_of_order_children_rejected() {
        let fx = fixture(false);
        let children = vec![attr(&fx.b, "b1"), attr(&fx.a, "a1")];
        let err = ComplexAttribute::new(fx.root, children).expect_err("must fail");
        assert!(matches!(err, ValidationError::OutOfOrder { .. }));
    }

    #[test]
    fn test_undeclared_child_rejected() {
        let fx = fixture(false);
        let factory = TypeFactory::new();
        let stray_ty = factory
            .create_scalar_type(
                Name::local("String"),
                ScalarKind::String,
                false,
                vec![],
                None,
                None,
            )
            .expect("scalar");
        let stray = Arc::new(
            PropertyDescriptor::single(Name::local("stray"), stray_ty).expect("descriptor"),
        );
        let children = vec![attr(&fx.a, "a1"), attr(&stray, "oops")];
        let err = ComplexAttribute::new(fx.root, children).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownProperty { .. }));
    }

    #[test]
    fn test_set_value_requires_equal_size() {
        let fx = fixture(false);
        let mut complex = ComplexAttribute::new(
            fx.root.clone(),
            vec![attr(&fx.a, "a1"), attr(&fx.b, "b1")],
        )
        .expect("valid");

        let err = complex
            .set_value(vec![attr(&fx.a, "a2")])
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::SizeMismatch {
                expected: 2,
                got: 1
            }
        ));

        complex
            .set_value(vec![attr(&fx.a, "a2"), attr(&fx.b, "b2")])
            .expect("same-size swap");
        let a = complex.property(&Name::local("a")).expect("a");
        assert_eq!(a.value(), Some(PropertyValue::from("a2")));
    }

    #[test]
    fn test_lookup_by_local_name() {
        let fx = fixture(false);
        let complex = ComplexAttribute::new(
            fx.root,
            vec![attr(&fx.a, "a1"), attr(&fx.b, "b1"), attr(&fx.b, "b2")],
        )
        .expect("valid");

        assert!(complex.property(&Name::local("a")).is_some());
        assert_eq!(complex.properties(&Name::local("b")).count(), 2);
        assert!(complex.property(&Name::local("zzz")).is_none());
    }

    #[test]
    fn test_format_tree_truncates_at_depth() {
        let factory = TypeFactory::new();
        let string_ty = factory
            .create_scalar_type(
                Name::local("String"),
                ScalarKind::String,
                false,
                vec![],
                None,
                None,
            )
            .expect("scalar");
        let street = Arc::new(
            PropertyDescriptor::single(Name::local("street"), string_ty).expect("street"),
        );
        let address_ty = factory
            .create_complex_type(
                Name::local("address"),
                vec![street.clone()],
                false,
                vec![],
                None,
                None,
            )
            .expect("address");
        let address = Arc::new(
            PropertyDescriptor::new(
                Name::local("address"),
                address_ty,
                1,
                Occurs::Bounded(1),
                true,
                None,
            )
            .expect("address descriptor"),
        );
        let person_ty = factory
            .create_complex_type(
                Name::local("person"),
                vec![address.clone()],
                false,
                vec![],
                None,
                None,
            )
            .expect("person");
        let person = Arc::new(
            PropertyDescriptor::new(
                Name::local("person"),
                person_ty.clone(),
                1,
                Occurs::Bounded(1),
                true,
                None,
            )
            .expect("person descriptor"),
        );

        let inner = ComplexAttribute::new(
            field(&person_ty, "address"),
            vec![attr(&street, "Main St")],
        )
        .expect("inner");
        let outer =
            ComplexAttribute::new(person, vec![Property::Complex(inner)]).expect("outer");

        let deep = outer.format_tree(3);
        assert!(deep.contains("Main St"));

        let shallow = outer.format_tree(1);
        assert!(shallow.contains("address"));
        assert!(!shallow.contains("Main St"));
        assert!(shallow.contains("..."));
    }

    #[test]
    fn test_format_tree_positional_expansion() {
        let fx = fixture(false);
        let complex = ComplexAttribute::new(
            fx.root,
            vec![attr(&fx.a, "a1"), attr(&fx.b, "b1"), attr(&fx.b, "b2")],
        )
        .expect("valid");
        let text = complex.format_tree(2);
        assert!(text.contains("b[0]"));
        assert!(text.contains("b[1]"));
        assert!(text.contains("a = "));
    }
}
