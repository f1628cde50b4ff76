// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::TRIGTOL;
use nalgebra::SymmetricEigen;

use super::{Axis, CoordinateSystem, Direction, RotMatrix, Vector};
use crate::d2;
use crate::stochastic::SpdMatrix3;

/// Common interface of plain and stochastic planes
///
/// A plane is an oriented coordinate system: `normal` is its z axis,
/// `plane_x`/`plane_y` span the local 2-D system and `d = -position·normal`.
pub trait PlaneLike {
    fn position(&self) -> Vector;

    fn normal(&self) -> Direction;

    fn plane_x(&self) -> Direction;

    fn plane_y(&self) -> Direction;

    fn d(&self) -> f64;

    /// World point → (in-plane coordinates, signed distance)
    fn to_plane_system(&self, v: &Vector) -> (d2::Vector, f64);

    /// In-plane coordinates → world point
    fn from_plane_system(&self, v: &d2::Vector) -> Vector;

    /// Plain plane with the same geometry
    fn get_plane(&self) -> Plane;

    fn system(&self) -> CoordinateSystem {
        CoordinateSystem::new(
            self.position(),
            RotMatrix::from_axes_unchecked(self.plane_x(), self.plane_y(), self.normal()),
        )
    }

    /// Signed distance of `v`
    fn dist(&self, v: &Vector) -> f64 {
        self.normal().dot_vector(&(*v - self.position()))
    }

    /// Normals agree within `max_cos_one` (as `|1 - cos|`) and the origin
    /// distances within `max_dist`.
    fn approx_equals(&self, other: &dyn PlaneLike, max_dist: f64, max_cos_one: f64) -> bool {
        (1.0 - self.normal().dot(&other.normal())).abs() <= max_cos_one
            && (self.d() - other.d()).abs() <= max_dist
    }
}

/// Oriented plane with a local 2-D coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    system: CoordinateSystem,
    d: f64,
}

impl Plane {
    /// Plane through `position` with `normal`; the local x axis follows
    /// `plane_x` where given.
    pub fn new(position: Vector, normal: Direction, plane_x: Option<Direction>) -> Self {
        let hint = plane_x.map(|d| d.to_vector());
        Self::from_system(CoordinateSystem::from_reference(
            position,
            normal,
            Axis::Z,
            hint.as_ref(),
        ))
    }

    pub fn from_system(system: CoordinateSystem) -> Self {
        let d = system.d();
        Self { system, d }
    }

    /// Plane through three points, oriented counter-clockwise.
    ///
    /// Positioned at `a` or at the centroid; `None` for collinear points.
    pub fn from_points(a: &Vector, b: &Vector, c: &Vector, a_as_position: bool) -> Option<Plane> {
        let ab = *b - *a;
        let normal = Direction::from_vector(&ab.cross(&(*c - *a)));
        if normal.is_nan() {
            return None;
        }
        let position = if a_as_position {
            *a
        } else {
            Vector::mean3(a, b, c)
        };
        Some(Plane::new(position, normal, Some(Direction::from_vector(&ab))))
    }

    /// Fit a plane to `points`.
    ///
    /// - one point: horizontal plane through it
    /// - two points: plane containing the line, x axis along it
    /// - three points: plane through them
    /// - rings: Newell normal, positioned at the first vertex
    /// - point sets: least squares through the centroid (smallest
    ///   eigenvector of the covariance is the normal, the largest the x axis)
    ///
    /// `None` for empty input or degenerate geometry.
    pub fn create(points: &[Vector], is_ring: bool) -> Option<Plane> {
        let len = if is_ring {
            points.len().saturating_sub(1)
        } else {
            points.len()
        };
        match len {
            0 => None,
            1 => Some(Plane::from_system(CoordinateSystem::new(points[0], RotMatrix::IDENTITY))),
            2 => {
                let dir = Direction::from_vector(&(points[1] - points[0]));
                if dir.is_nan() {
                    return None;
                }
                Some(Plane::new(points[0], dir.perp(), Some(dir)))
            }
            3 => Plane::from_points(&points[0], &points[1], &points[2], is_ring),
            _ => {
                let mean = Vector::mean_of(points, is_ring);
                let reduced: Vec<Vector> = points[..len].iter().map(|p| *p - mean).collect();
                if is_ring {
                    Self::fit_ring(points, &reduced)
                } else {
                    Self::fit_points(mean, &reduced)
                }
            }
        }
    }

    fn fit_ring(points: &[Vector], reduced: &[Vector]) -> Option<Plane> {
        let n = reduced.len();
        let newell = (0..n)
            .map(|i| reduced[i].cross(&reduced[(i + 1) % n]))
            .fold(Vector::ZERO, |acc, c| acc + c);
        let normal = Direction::from_vector(&newell);
        let plane_x = Direction::from_vector(&(points[1] - points[0]));
        if normal.is_nan() {
            return None;
        }
        Some(Plane::new(points[0], normal, Some(plane_x)))
    }

    fn fit_points(mean: Vector, reduced: &[Vector]) -> Option<Plane> {
        let cov = reduced
            .iter()
            .fold(SpdMatrix3::ZERO, |acc, r| acc.add(&r.outer()));
        let eigen = SymmetricEigen::new(cov.to_matrix3());
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
        let column = |i: usize| {
            let c = eigen.eigenvectors.column(i);
            Direction::new(c[0], c[1], c[2])
        };
        let plane_x = column(order[0]);
        let normal = column(order[2]);
        if normal.is_nan() || plane_x.is_nan() {
            return None;
        }
        Some(Plane::new(mean, normal, Some(plane_x)))
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.system
    }

    /// `(cos of the normal angle, |Δd|)`
    pub fn difference(&self, other: &dyn PlaneLike) -> (f64, f64) {
        (self.normal().diff_cos(&other.normal()), (self.d - other.d()).abs())
    }

    /// Same plane with opposite orientation
    pub fn turn(&self) -> Plane {
        Plane::new(self.position(), self.normal().turn(), Some(self.plane_x()))
    }

    /// Intersection with the ray `origin + t·dir`, returning the point and
    /// `t`; `None` when the ray is parallel to the plane.
    pub fn intersect_ray(&self, origin: &Vector, dir: &Direction) -> Option<(Vector, f64)> {
        intersect_ray(self, origin, dir)
    }
}

pub(crate) fn intersect_ray<P: PlaneLike + ?Sized>(
    plane: &P,
    origin: &Vector,
    dir: &Direction,
) -> Option<(Vector, f64)> {
    let cos = plane.normal().dot(dir);
    if cos.abs() < TRIGTOL {
        return None;
    }
    let t = -plane.dist(origin) / cos;
    Some((*origin + dir.scale(t), t))
}

impl PlaneLike for Plane {
    fn position(&self) -> Vector {
        self.system.position()
    }

    fn normal(&self) -> Direction {
        self.system.normal()
    }

    fn plane_x(&self) -> Direction {
        self.system.plane_x()
    }

    fn plane_y(&self) -> Direction {
        self.system.plane_y()
    }

    fn d(&self) -> f64 {
        self.d
    }

    fn to_plane_system(&self, v: &Vector) -> (d2::Vector, f64) {
        self.system.to_plane_system(v)
    }

    fn from_plane_system(&self, v: &d2::Vector) -> Vector {
        self.system.from_plane_system(v)
    }

    fn get_plane(&self) -> Plane {
        *self
    }

    fn system(&self) -> CoordinateSystem {
        self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tilted_points() -> Vec<Vector> {
        // z = 0.5 x - 0.25 y + 2
        let f = |x: f64, y: f64| Vector::new(x, y, 0.5 * x - 0.25 * y + 2.0);
        vec![f(0.0, 0.0), f(4.0, 0.0), f(4.0, 3.0), f(0.0, 3.0), f(2.0, 1.0), f(1.0, 2.5)]
    }

    fn expected_normal() -> Direction {
        Direction::new(-0.5, 0.25, 1.0)
    }

    #[test]
    fn test_fit_point_set() {
        let pts = tilted_points();
        let plane = Plane::create(&pts, false).unwrap();
        assert_abs_diff_eq!(plane.normal().dot(&expected_normal()).abs(), 1.0, epsilon = 1e-12);
        for p in &pts {
            assert_abs_diff_eq!(plane.dist(p), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fit_ring_keeps_winding() {
        let mut ring: Vec<Vector> = tilted_points()[..4].to_vec();
        ring.push(ring[0]);
        let plane = Plane::create(&ring, true).unwrap();
        // counter-clockwise seen from above
        assert_abs_diff_eq!(plane.normal().dot(&expected_normal()), 1.0, epsilon = 1e-12);
        assert_eq!(plane.position(), ring[0]);
        let (v, z) = plane.to_plane_system(&ring[1]);
        assert!(v.x > 0.0);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_small_inputs() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 2.0, 3.0);
        assert!(Plane::create(&[], false).is_none());
        assert_eq!(Plane::create(&[a], false).unwrap().position(), a);
        let line = Plane::create(&[a, b], false).unwrap();
        assert_abs_diff_eq!(line.dist(&b), 0.0, epsilon = 1e-12);
        assert_eq!(line.plane_x(), Direction::UNIT_X);
        assert!(Plane::create(&[a, a], false).is_none());
        assert!(Plane::from_points(&a, &b, &(b + (b - a)), true).is_none());
    }

    #[test]
    fn test_turn_and_difference() {
        let plane = Plane::new(Vector::new(0.0, 0.0, 2.0), Direction::UNIT_Z, None);
        let turned = plane.turn();
        assert_eq!(turned.normal(), Direction::NEG_UNIT_Z);
        assert_eq!(turned.d(), 2.0);
        let (cos, dd) = plane.difference(&turned);
        assert_eq!(cos, -1.0);
        assert_eq!(dd, 4.0);
    }

    #[test]
    fn test_intersect_ray() {
        let plane = Plane::new(Vector::new(0.0, 0.0, 2.0), Direction::UNIT_Z, None);
        let (p, t) = plane
            .intersect_ray(&Vector::new(1.0, 1.0, 0.0), &Direction::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(p, Vector::new(1.0, 1.0, 2.0));
        assert_eq!(t, 2.0);
        assert!(plane.intersect_ray(&Vector::ZERO, &Direction::UNIT_X).is_none());
    }

    #[test]
    fn test_approx_equals() {
        let a = Plane::new(Vector::new(0.0, 0.0, 1.0), Direction::UNIT_Z, None);
        let b = Plane::new(Vector::new(3.0, 0.0, 1.0 + 1e-5), Direction::new(1e-12, 0.0, 1.0), None);
        assert!(a.approx_equals(&b, 0.0005, TRIGTOL));
        assert!(!a.approx_equals(&b.turn(), 0.0005, TRIGTOL));
    }
}
