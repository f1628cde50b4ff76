// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::TRIGTOL;
use smallvec::SmallVec;
use std::fmt;

use super::{BBox, Vector};
use crate::d3::{self, PlaneLike};
use crate::error::{Error, Result};
use crate::wkt;

/// Inline capacity covers rectangles and most room outlines
pub type Vertices = SmallVec<[Vector; 8]>;

/// Open or closed polyline
///
/// A closed line string with non-zero signed area is a linear ring:
/// positive area ⇔ counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    vertices: Vertices,
    bbox: BBox,
    is_closed: bool,
    area: f64,
}

/// Shoelace area of a closed ring with at least four vertices
/// (three distinct corners); everything else is zero.
fn signed_area(v: &[Vector], is_closed: bool) -> f64 {
    let n = v.len();
    if !is_closed || n <= 3 {
        return 0.0;
    }
    let mut area = v[0].x * (v[1].y - v[n - 2].y);
    let mut next = v[0];
    for i in (1..=n - 2).rev() {
        area += v[i].x * (next.y - v[i - 1].y);
        next = v[i];
    }
    area *= 0.5;
    if !area.is_finite() || area.abs() < TRIGTOL {
        0.0
    } else {
        area
    }
}

fn is_closed(v: &[Vector]) -> bool {
    v.len() > 2 && v.first() == v.last()
}

impl LineString {
    /// Build from vertices; `is_linear_ring` requests the area computation.
    pub fn new(vertices: impl IntoIterator<Item = Vector>, is_linear_ring: bool) -> Self {
        let vertices: Vertices = vertices.into_iter().collect();
        let bbox = BBox::from_vectors(&vertices, false);
        let closed = is_closed(&vertices);
        let area = if is_linear_ring {
            signed_area(&vertices, closed)
        } else {
            0.0
        };
        Self {
            vertices,
            bbox,
            is_closed: closed,
            area,
        }
    }

    /// Build a ring from its distinct corners, repeating the first vertex
    /// at the end.
    pub fn new_ring(corners: impl IntoIterator<Item = Vector>) -> Self {
        let mut vertices: Vertices = corners.into_iter().collect();
        if let Some(first) = vertices.first().copied() {
            vertices.push(first);
        }
        let bbox = BBox::from_vectors(&vertices, true);
        let closed = is_closed(&vertices);
        let area = signed_area(&vertices, closed);
        Self {
            vertices,
            bbox,
            is_closed: closed,
            area,
        }
    }

    pub fn empty() -> Self {
        Self {
            vertices: Vertices::new(),
            bbox: BBox::EMPTY,
            is_closed: false,
            area: 0.0,
        }
    }

    /// Project a 3-D ring into the plane system of `plane`.
    ///
    /// Returns the 2-D ring (area computed) and the signed out-of-plane
    /// distance of every vertex.
    pub fn from_plane<P: PlaneLike + ?Sized>(plane: &P, ring: &[d3::Vector]) -> (Self, Vec<f64>) {
        let (vertices, dists): (Vec<Vector>, Vec<f64>) =
            ring.iter().map(|v| plane.to_plane_system(v)).unzip();
        (LineString::new(vertices, true), dists)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Signed area, positive for counter-clockwise rings
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn is_linear_ring(&self) -> bool {
        self.area != 0.0
    }

    /// Same vertices in opposite order; the area changes sign.
    #[must_use]
    pub fn reverse(&self) -> LineString {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            bbox: self.bbox,
            is_closed: self.is_closed,
            area: -self.area,
        }
    }

    /// Segments `(v[i], v[i+1])`
    pub fn segments(&self) -> impl Iterator<Item = (&Vector, &Vector)> {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Even-odd crossing test against this ring
    pub fn crosses_ray_odd(&self, p: &Vector) -> bool {
        let mut inside = false;
        for (a, b) in self.segments() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// `LINESTRING(x y,...)`
    pub fn to_wkt_string(&self) -> String {
        format!("LINESTRING{}", self)
    }

    /// Parse `(x y,x y,...)`; at least two vertices.
    pub fn parse(input: &str, is_linear_ring: bool) -> Result<LineString> {
        Self::from_coords(wkt::parse_ring::<2>(input)?, is_linear_ring)
    }

    /// Parse `LINESTRING(x y,...)`; at least two vertices.
    pub fn parse_wkt(input: &str, is_linear_ring: bool) -> Result<LineString> {
        Self::from_coords(wkt::parse_line_string::<2>(input)?, is_linear_ring)
    }

    pub(crate) fn from_coords(coords: Vec<[f64; 2]>, is_linear_ring: bool) -> Result<LineString> {
        if coords.len() < 2 {
            return Err(Error::InvalidGeometry(format!(
                "line string needs at least 2 vertices, got {}",
                coords.len()
            )));
        }
        Ok(LineString::new(coords.into_iter().map(Vector::from), is_linear_ring))
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

    fn rect() -> LineString {
        LineString::new(
            [
                Vector::new(0.0, 0.0),
                Vector::new(4.0, 0.0),
                Vector::new(4.0, 3.0),
                Vector::new(0.0, 3.0),
                Vector::new(0.0, 0.0),
            ],
            true,
        )
    }

    #[test]
    fn test_rectangle_ring_area() {
        let ring = rect();
        assert!(ring.is_closed());
        assert_eq!(ring.area(), 12.0);
        assert!(ring.is_linear_ring());
        assert_eq!(ring.reverse().area(), -12.0);
    }

    #[test]
    fn test_new_ring_closes() {
        let ring = LineString::new_ring([
            Vector::new(0.0, 0.0),
            Vector::new(0.0, 3.0),
            Vector::new(4.0, 3.0),
            Vector::new(4.0, 0.0),
        ]);
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.area(), -12.0);
    }

    #[test]
    fn test_degenerate_rings_have_no_area() {
        let open = LineString::new([Vector::new(0.0, 0.0), Vector::new(4.0, 0.0), Vector::new(4.0, 3.0)], true);
        assert!(!open.is_closed());
        assert_eq!(open.area(), 0.0);

        let flat = LineString::new_ring([Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(2.0, 0.0)]);
        assert!(flat.is_closed());
        assert!(!flat.is_linear_ring());

        let two = LineString::new_ring([Vector::new(0.0, 0.0), Vector::new(1.0, 1.0)]);
        assert_eq!(two.area(), 0.0);

        let not_requested = LineString::new(rect().vertices().iter().copied(), false);
        assert!(not_requested.is_closed());
        assert_eq!(not_requested.area(), 0.0);
    }

    #[test]
    fn test_wkt_round_trip() {
        let ring = rect();
        assert_eq!(ring.to_wkt_string(), "LINESTRING(0 0,4 0,4 3,0 3,0 0)");
        assert_eq!(LineString::parse_wkt(&ring.to_wkt_string(), true).unwrap(), ring);
        assert_eq!(LineString::parse(&ring.to_string(), true).unwrap(), ring);
        assert!(LineString::parse("(1 2)", false).is_err());
    }

    #[test]
    fn test_crossing_parity() {
        let ring = rect();
        assert!(ring.crosses_ray_odd(&Vector::new(1.0, 1.0)));
        assert!(!ring.crosses_ray_odd(&Vector::new(5.0, 1.0)));
    }
}
