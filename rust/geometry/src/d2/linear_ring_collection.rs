// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::{BBox, LineString};

/// Rings sorted by winding: counter-clockwise exteriors and clockwise
/// interiors, waiting to be assembled into a polygon
#[derive(Debug, Clone, Default)]
pub struct LinearRingCollection {
    exteriors: Vec<LineString>,
    interiors: Vec<LineString>,
    bbox: BBox,
}

impl LinearRingCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `rings`, silently dropping everything that is no ring.
    pub fn from_rings(rings: impl IntoIterator<Item = LineString>) -> Self {
        let mut collection = Self::new();
        for ring in rings {
            collection.add(ring);
        }
        collection
    }

    /// Returns `false` (and drops the ring) when it has no area.
    pub fn add(&mut self, ring: LineString) -> bool {
        if ring.area() > 0.0 {
            self.bbox = self.bbox.combine(ring.bbox());
            self.exteriors.push(ring);
            true
        } else if ring.area() < 0.0 {
            self.interiors.push(ring);
            true
        } else {
            false
        }
    }

    pub fn exteriors(&self) -> &[LineString] {
        &self.exteriors
    }

    pub fn interiors(&self) -> &[LineString] {
        &self.interiors
    }

    /// Bounding box of the exterior rings
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    pub fn is_empty(&self) -> bool {
        self.exteriors.is_empty() && self.interiors.is_empty()
    }
}

impl fmt::Display for LinearRingCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ring) in self.exteriors.iter().chain(&self.interiors).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", ring)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d2::Vector;

    #[test]
    fn test_classifies_by_winding() {
        let ccw = LineString::new_ring([
            Vector::new(0.0, 0.0),
            Vector::new(2.0, 0.0),
            Vector::new(2.0, 2.0),
        ]);
        let cw = ccw.reverse();
        let line = LineString::new([Vector::new(0.0, 0.0), Vector::new(5.0, 5.0)], true);

        let mut rings = LinearRingCollection::new();
        assert!(rings.add(ccw));
        assert!(rings.add(cw));
        assert!(!rings.add(line));
        assert_eq!(rings.exteriors().len(), 1);
        assert_eq!(rings.interiors().len(), 1);
        assert_eq!(rings.bbox().max, Vector::new(2.0, 2.0));
    }
}
