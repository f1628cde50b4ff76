// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Polygon Assembly
//!
//! Rings collected from independent sources (BIM room boundaries, point
//! cloud patches) rarely form a valid polygon as they are. This module
//! unions the exterior rings and subtracts the interior rings with the
//! i_overlay crate, then hands the single resulting shape to
//! [`Polygon::create`] for validation.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::d2::{LineString, LinearRingCollection, Polygon, Vector};
use crate::d3::{self, PlaneLike};

/// i_overlay contour: open path of `[x, y]` points
pub type Path = Vec<[f64; 2]>;

/// i_overlay shape: outer contour followed by its holes
pub type Shape = Vec<Path>;

/// Convert a closed ring to an i_overlay path (closing vertex dropped)
pub fn ring_to_path(ring: &LineString) -> Path {
    let vertices = ring.vertices();
    let n = if ring.is_closed() {
        vertices.len() - 1
    } else {
        vertices.len()
    };
    vertices[..n].iter().map(|v| v.to_array()).collect()
}

/// Convert an i_overlay path back to a closed ring
pub fn path_to_ring(path: &[[f64; 2]]) -> LineString {
    LineString::new_ring(path.iter().map(|&p| Vector::from(p)))
}

/// Union of all `rings`; `None` when there is nothing to union
pub fn union_exteriors(rings: &[LineString]) -> Option<Vec<Shape>> {
    let (first, rest) = rings.split_first()?;
    let subject: Vec<Path> = vec![ring_to_path(first)];
    let clip: Vec<Path> = rest.iter().map(ring_to_path).collect();
    Some(subject.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd))
}

/// Subtract `holes` from a single shape
pub fn subtract_holes(shape: &Shape, holes: &[LineString]) -> Vec<Shape> {
    let clip: Vec<Path> = holes.iter().map(ring_to_path).collect();
    shape.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd)
}

/// The only shape of an overlay result
fn single_shape(mut shapes: Vec<Shape>) -> Option<Shape> {
    if shapes.len() == 1 {
        shapes.pop()
    } else {
        None
    }
}

/// Convert an overlay shape into a validated polygon
fn shape_to_polygon(shape: &Shape) -> Option<Polygon> {
    let (outer, holes) = shape.split_first()?;
    Polygon::create(path_to_ring(outer), holes.iter().map(|h| path_to_ring(h)))
}

impl LinearRingCollection {
    /// Assemble all rings into one polygon.
    ///
    /// The exteriors are unioned and the interiors subtracted; both steps
    /// must leave exactly one connected shape. `None` otherwise, or when
    /// the result fails polygon validation.
    pub fn to_polygon(&self) -> Option<Polygon> {
        let shape = single_shape(union_exteriors(self.exteriors())?)?;
        if self.interiors().is_empty() {
            return shape_to_polygon(&shape);
        }
        let holes: Vec<LineString> = self.interiors().iter().map(LineString::reverse).collect();
        let shape = single_shape(subtract_holes(&shape, &holes))?;
        shape_to_polygon(&shape)
    }
}

/// Build a polygon in `plane` from arbitrary 3-D rings.
///
/// Every ring is projected into the plane system and sorted by winding.
/// Returns the polygon, the bounding box of the exterior rings in space
/// and the largest out-of-plane distance of any vertex.
pub fn polygon_from_rings_3d<P: PlaneLike + ?Sized>(
    plane: &P,
    rings: &[Vec<d3::Vector>],
) -> Option<(Polygon, d3::BBox, f64)> {
    let mut collection = LinearRingCollection::new();
    let mut bbox = d3::BBox::EMPTY;
    let mut max_dist: f64 = 0.0;

    for ring3d in rings {
        let (ring, dists) = LineString::from_plane(plane, ring3d);
        max_dist = dists.iter().fold(max_dist, |m, d| m.max(d.abs()));
        if ring.area() > 0.0 {
            bbox = ring3d.iter().fold(bbox, |b, v| b.extend(v));
        }
        collection.add(ring);
    }

    if collection.exteriors().is_empty() {
        return None;
    }
    let polygon = collection.to_polygon()?;
    Some((polygon, bbox, max_dist))
}

/// Union of two polygons, `None` unless the result is a single shape
pub fn polygon_union(a: &Polygon, b: &Polygon) -> Option<Polygon> {
    overlay_polygons(a, b, OverlayRule::Union)
}

/// `a` minus `b`, `None` unless the result is a single shape
pub fn polygon_difference(a: &Polygon, b: &Polygon) -> Option<Polygon> {
    overlay_polygons(a, b, OverlayRule::Difference)
}

fn overlay_polygons(a: &Polygon, b: &Polygon, rule: OverlayRule) -> Option<Polygon> {
    let subject: Vec<Path> = a.rings().iter().map(ring_to_path).collect();
    let clip: Vec<Path> = b.rings().iter().map(ring_to_path).collect();
    let shape = single_shape(subject.overlay(&clip, rule, FillRule::EvenOdd))?;
    shape_to_polygon(&shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d3::{Direction, Plane};
    use approx::assert_abs_diff_eq;

    fn square(x: f64, y: f64, size: f64) -> LineString {
        LineString::new_ring([
            Vector::new(x, y),
            Vector::new(x + size, y),
            Vector::new(x + size, y + size),
            Vector::new(x, y + size),
        ])
    }

    #[test]
    fn test_path_conversion() {
        let ring = square(0.0, 0.0, 1.0);
        let path = ring_to_path(&ring);
        assert_eq!(path.len(), 4);
        assert_eq!(path[2], [1.0, 1.0]);
        let back = path_to_ring(&path);
        assert_eq!(back.len(), 5);
        assert_abs_diff_eq!(back.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let rings = LinearRingCollection::from_rings([square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)]);
        let polygon = rings.to_polygon().unwrap();
        assert_abs_diff_eq!(polygon.area(), 7.0, epsilon = 1e-9);
        assert!(polygon.holes().is_empty());
    }

    #[test]
    fn test_disjoint_squares_fail() {
        let rings = LinearRingCollection::from_rings([square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)]);
        assert!(rings.to_polygon().is_none());
    }

    #[test]
    fn test_hole_is_subtracted() {
        let rings = LinearRingCollection::from_rings([square(0.0, 0.0, 4.0), square(1.0, 1.0, 1.0).reverse()]);
        let polygon = rings.to_polygon().unwrap();
        assert_abs_diff_eq!(polygon.area(), 15.0, epsilon = 1e-9);
        assert_eq!(polygon.holes().len(), 1);
    }

    #[test]
    fn test_hole_cutting_through_splits() {
        // a strip through the whole square leaves two pieces
        let strip = LineString::new_ring([
            Vector::new(-1.0, 1.0),
            Vector::new(-1.0, 2.0),
            Vector::new(5.0, 2.0),
            Vector::new(5.0, 1.0),
        ]);
        let rings = LinearRingCollection::from_rings([square(0.0, 0.0, 4.0), strip]);
        assert!(rings.to_polygon().is_none());
    }

    #[test]
    fn test_polygon_union_and_difference() {
        let a = Polygon::from_ring(square(0.0, 0.0, 2.0)).unwrap();
        let b = Polygon::from_ring(square(1.0, 0.0, 2.0)).unwrap();
        assert_abs_diff_eq!(polygon_union(&a, &b).unwrap().area(), 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(polygon_difference(&a, &b).unwrap().area(), 2.0, epsilon = 1e-9);
        let far = Polygon::from_ring(square(10.0, 0.0, 1.0)).unwrap();
        assert!(polygon_union(&a, &far).is_none());
    }

    #[test]
    fn test_rings_3d() {
        let plane = Plane::new(d3::Vector::new(0.0, 0.0, 1.0), Direction::UNIT_Z, Some(Direction::UNIT_X));
        let lift = |ring: &LineString, dz: f64| -> Vec<d3::Vector> {
            ring.vertices().iter().map(|v| d3::Vector::new(v.x, v.y, 1.0 + dz)).collect()
        };
        let rings = vec![
            lift(&square(0.0, 0.0, 3.0), 0.0),
            lift(&square(2.0, 0.0, 3.0), 0.002),
            lift(&square(1.0, 1.0, 0.5).reverse(), 0.0),
        ];
        let (polygon, bbox, max_dist) = polygon_from_rings_3d(&plane, &rings).unwrap();
        assert_abs_diff_eq!(polygon.area(), 15.0 - 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(max_dist, 0.002, epsilon = 1e-12);
        assert_abs_diff_eq!(bbox.max.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bbox.max.z, 1.002, epsilon = 1e-12);

        let only_hole = vec![lift(&square(1.0, 1.0, 0.5).reverse(), 0.0)];
        assert!(polygon_from_rings_3d(&plane, &only_hole).is_none());
    }
}
