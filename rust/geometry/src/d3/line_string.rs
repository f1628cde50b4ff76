// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::EPS;
use std::fmt;

use super::{BBox, PlaneLike, Vector};
use crate::d2;
use crate::error::{Error, Result};
use crate::wkt;

/// Polyline in space; closed when the last vertex repeats the first
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    vertices: Vec<Vector>,
    bbox: BBox,
    is_closed: bool,
}

impl LineString {
    pub fn new(vertices: impl IntoIterator<Item = Vector>) -> Self {
        let vertices: Vec<Vector> = vertices.into_iter().collect();
        let bbox = BBox::from_vectors(&vertices);
        let is_closed = vertices.len() > 2
            && match (vertices.first(), vertices.last()) {
                (Some(first), Some(last)) => first.approx_equals(last, EPS),
                _ => false,
            };
        Self {
            vertices,
            bbox,
            is_closed,
        }
    }

    /// Lift a 2-D line string from the plane system of `plane`.
    pub fn from_plane<P: PlaneLike + ?Sized>(plane: &P, line: &d2::LineString) -> Self {
        Self::new(line.vertices().iter().map(|v| plane.from_plane_system(v)))
    }

    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    #[must_use]
    pub fn reverse(&self) -> LineString {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            bbox: self.bbox,
            is_closed: self.is_closed,
        }
    }

    /// `LINESTRING Z(x y z,...)`
    pub fn to_wkt_string(&self) -> String {
        format!("LINESTRING Z{}", self)
    }

    /// Parse `(x y z,...)`; at least two vertices.
    pub fn parse(input: &str) -> Result<LineString> {
        Self::from_coords(wkt::parse_ring::<3>(input)?)
    }

    /// Parse `LINESTRING Z(x y z,...)`; at least two vertices.
    pub fn parse_wkt(input: &str) -> Result<LineString> {
        Self::from_coords(wkt::parse_line_string::<3>(input)?)
    }

    fn from_coords(coords: Vec<[f64; 3]>) -> Result<LineString> {
        if coords.len() < 2 {
            return Err(Error::InvalidGeometry(format!(
                "line string needs at least 2 vertices, got {}",
                coords.len()
            )));
        }
        Ok(LineString::new(coords.into_iter().map(Vector::from)))
    }
}

impl fmt::Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wkt::fmt_list(f, &self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_and_round_trip() {
        let ls = LineString::new([
            Vector::new(0.0, 0.0, 1.0),
            Vector::new(1.0, 0.0, 1.0),
            Vector::new(1.0, 1.0, 1.5),
            Vector::new(0.0, 0.0, 1.0),
        ]);
        assert!(ls.is_closed());
        assert_eq!(ls.to_wkt_string(), "LINESTRING Z(0 0 1,1 0 1,1 1 1.5,0 0 1)");
        assert_eq!(LineString::parse_wkt(&ls.to_wkt_string()).unwrap(), ls);
        assert_eq!(LineString::parse(&ls.to_string()).unwrap(), ls);
        assert_eq!(ls.reverse().vertices()[1], Vector::new(1.0, 1.0, 1.5));
        assert!(LineString::parse("(1 2 3)").is_err());
        assert!(LineString::parse("(1 2,3 4)").is_err());
    }
}
