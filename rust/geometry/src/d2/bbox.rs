// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::Vector;

/// Axis aligned bounding box
///
/// [`BBox::EMPTY`] has `min = +∞`, `max = -∞`, so extending it with any
/// point yields exactly that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Vector,
    pub max: Vector,
}

impl Default for BBox {
    fn default() -> Self {
        BBox::EMPTY
    }
}

impl BBox {
    pub const EMPTY: BBox = BBox {
        min: Vector::POSITIVE_INFINITY,
        max: Vector::NEGATIVE_INFINITY,
    };

    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    pub fn from_point(v: &Vector) -> Self {
        Self { min: *v, max: *v }
    }

    /// Bounding box of `vectors`; rings skip their first vertex (it is
    /// repeated at the end).
    pub fn from_vectors(vectors: &[Vector], is_ring: bool) -> Self {
        let skip = usize::from(is_ring);
        vectors
            .iter()
            .skip(skip)
            .fold(BBox::EMPTY, |bbox, v| bbox.extend(v))
    }

    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    #[must_use]
    pub fn extend(&self, v: &Vector) -> BBox {
        BBox::new(self.min.min(v), self.max.max(v))
    }

    #[must_use]
    pub fn combine(&self, other: &BBox) -> BBox {
        BBox::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Grow (or shrink for negative `d`) on every side.
    #[must_use]
    pub fn buffer(&self, d: f64) -> BBox {
        let offset = Vector::new(d, d);
        BBox::new(self.min - offset, self.max + offset)
    }

    pub fn centre(&self) -> Vector {
        self.min.mid(&self.max)
    }

    pub fn range(&self) -> Vector {
        self.max - self.min
    }

    /// Interiors intersect
    pub fn does_overlap(&self, other: &BBox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn does_overlap_or_touch(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// `other` lies inside or on the border
    pub fn encloses(&self, other: &BBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// `v` lies strictly inside
    pub fn encloses_point(&self, v: &Vector) -> bool {
        self.min.x < v.x && self.min.y < v.y && self.max.x > v.x && self.max.y > v.y
    }

    pub fn encloses_or_touches_point(&self, v: &Vector) -> bool {
        self.min.x <= v.x && self.min.y <= v.y && self.max.x >= v.x && self.max.y >= v.y
    }

    /// No common point, not even on the border
    pub fn is_distinct(&self, other: &BBox) -> bool {
        !self.does_overlap_or_touch(other)
    }

    pub fn is_distinct_point(&self, v: &Vector) -> bool {
        !self.encloses_or_touches_point(v)
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> BBox {
        BBox::new(Vector::new(min, min), Vector::new(max, max))
    }

    #[test]
    fn test_empty_extend() {
        assert!(BBox::EMPTY.is_empty());
        let p = Vector::new(1.0, 2.0);
        assert_eq!(BBox::EMPTY.extend(&p), BBox::from_point(&p));
    }

    #[test]
    fn test_ring_skips_first_vertex() {
        let ring = [
            Vector::new(-5.0, -5.0),
            Vector::new(1.0, 1.0),
            Vector::new(2.0, 2.0),
        ];
        assert_eq!(BBox::from_vectors(&ring, true), square(1.0, 2.0));
        assert_eq!(BBox::from_vectors(&ring, false), square(-5.0, 2.0));
    }

    #[test]
    fn test_overlap_and_touch() {
        let a = square(0.0, 1.0);
        let b = square(1.0, 2.0);
        assert!(!a.does_overlap(&b));
        assert!(a.does_overlap_or_touch(&b));
        assert!(a.does_overlap(&square(0.5, 2.0)));
        assert!(a.is_distinct(&square(1.5, 2.0)));
    }

    #[test]
    fn test_encloses() {
        let a = square(0.0, 4.0);
        assert!(a.encloses(&a));
        assert!(a.encloses(&square(1.0, 2.0)));
        assert!(!a.encloses(&square(1.0, 5.0)));
        assert!(!a.encloses_point(&Vector::new(0.0, 1.0)));
        assert!(a.encloses_or_touches_point(&Vector::new(0.0, 1.0)));
        assert_eq!(a.buffer(1.0), square(-1.0, 5.0));
        assert_eq!(a.centre(), Vector::new(2.0, 2.0));
    }
}
