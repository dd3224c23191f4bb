// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Possibly-empty axis-aligned envelopes.

use geo::{BoundingRect, Coord, Geometry, Rect};

use super::Crs;

/// An axis-aligned bounding envelope, possibly empty, with an optional CRS.
///
/// The empty state is a first-class value: unioning anything with an empty
/// `Bounds` yields the other operand, and the envelope of a feature with
/// no geometry-valued properties is empty rather than degenerate.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    rect: Option<Rect<f64>>,
    crs: Option<Crs>,
}

impl Bounds {
    /// The empty envelope with no CRS.
    pub fn empty() -> Self {
        Self {
            rect: None,
            crs: None,
        }
    }

    /// The empty envelope tagged with a CRS.
    pub fn empty_with_crs(crs: Option<Crs>) -> Self {
        Self { rect: None, crs }
    }

    /// Wrap an existing rectangle.
    pub fn from_rect(rect: Rect<f64>, crs: Option<Crs>) -> Self {
        Self {
            rect: Some(rect),
            crs,
        }
    }

    /// The envelope of a geometry value, in the given CRS.
    ///
    /// Geometries with no extent (an empty multi-part, for example) yield
    /// the empty envelope.
    pub fn of(geometry: &Geometry<f64>, crs: Option<Crs>) -> Self {
        Self {
            rect: geometry.bounding_rect(),
            crs,
        }
    }

    /// Whether this envelope covers nothing.
    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// The underlying rectangle, when non-empty.
    pub fn rect(&self) -> Option<&Rect<f64>> {
        self.rect.as_ref()
    }

    /// The CRS tag, if any.
    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    /// Grow this envelope to also cover `other`.
    ///
    /// An empty operand contributes nothing. The CRS tag of the first
    /// non-empty contribution wins.
    pub fn expand_to_include(&mut self, other: &Bounds) {
        let Some(theirs) = other.rect else { return };
        match self.rect {
            None => {
                self.rect = Some(theirs);
                if self.crs.is_none() {
                    self.crs = other.crs;
                }
            }
            Some(ours) => {
                let min = Coord {
                    x: ours.min().x.min(theirs.min().x),
                    y: ours.min().y.min(theirs.min().y),
                };
                let max = Coord {
                    x: ours.max().x.max(theirs.max().x),
                    y: ours.max().y.max(theirs.max().y),
                };
                self.rect = Some(Rect::new(min, max));
            }
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    #[test]
    fn test_empty_union_identity() {
        let mut acc = Bounds::empty();
        let point = Geometry::Point(Point::new(2.0, 3.0));
        acc.expand_to_include(&Bounds::of(&point, Some(Crs::WGS84)));
        let rect = acc.rect().expect("non-empty");
        assert_eq!(rect.min().x, 2.0);
        assert_eq!(rect.max().y, 3.0);
        assert_eq!(acc.crs(), Some(Crs::WGS84));
    }

    #[test]
    fn test_union_grows() {
        let a = Bounds::of(&Geometry::Point(Point::new(0.0, 0.0)), None);
        let b = Bounds::of(&Geometry::Point(Point::new(10.0, -5.0)), None);
        let mut acc = a;
        acc.expand_to_include(&b);
        let rect = acc.rect().expect("non-empty");
        assert_eq!(rect.min().y, -5.0);
        assert_eq!(rect.max().x, 10.0);
    }

    #[test]
    fn test_expand_with_empty_is_noop() {
        let mut acc = Bounds::of(&Geometry::Point(Point::new(1.0, 1.0)), None);
        let before = acc.clone();
        acc.expand_to_include(&Bounds::empty());
        assert_eq!(acc, before);
    }
}
