// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::Vector;

/// Axis aligned bounding box in space, [`BBox::EMPTY`] until extended
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

    pub fn from_vectors<'a>(vectors: impl IntoIterator<Item = &'a Vector>) -> Self {
        vectors
            .into_iter()
            .fold(BBox::EMPTY, |bbox, v| bbox.extend(v))
    }

    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }

    #[must_use]
    pub fn extend(&self, v: &Vector) -> BBox {
        BBox::new(self.min.min(v), self.max.max(v))
    }

    #[must_use]
    pub fn combine(&self, other: &BBox) -> BBox {
        BBox::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    #[must_use]
    pub fn buffer(&self, d: f64) -> BBox {
        let offset = Vector::new(d, d, d);
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
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn does_overlap_or_touch(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// `other` lies inside or on the border
    pub fn encloses(&self, other: &BBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    /// `v` lies strictly inside
    pub fn encloses_point(&self, v: &Vector) -> bool {
        self.min.x < v.x
            && self.min.y < v.y
            && self.min.z < v.z
            && self.max.x > v.x
            && self.max.y > v.y
            && self.max.z > v.z
    }

    pub fn is_distinct(&self, other: &BBox) -> bool {
        !self.does_overlap_or_touch(other)
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.min, self.max)
    }
}
