// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical planes that planar faces refer to by id.

use bimscan_geometry::d3::{CoordinateSystem, Direction, Plane, PlaneLike, Vector};
use bimscan_geometry::{SpdMatrix6, StochasticPlane};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::csv::{self, CsvBatch};
use crate::error::Result;

const SOURCE: &str = "ReferencePlane";

/// Geometry behind a reference plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferencePlaneKind {
    Plane(Plane),
    Stochastic(StochasticPlane),
}

impl ReferencePlaneKind {
    pub fn as_plane_like(&self) -> &dyn PlaneLike {
        match self {
            ReferencePlaneKind::Plane(p) => p,
            ReferencePlaneKind::Stochastic(p) => p,
        }
    }

    pub fn as_plane(&self) -> Option<&Plane> {
        match self {
            ReferencePlaneKind::Plane(p) => Some(p),
            ReferencePlaneKind::Stochastic(_) => None,
        }
    }
}

/// Plane with a string identity
///
/// Equality and hashing use the id only.
#[derive(Debug, Clone)]
pub struct ReferencePlane {
    id: String,
    plane: ReferencePlaneKind,
}

fn hash_vector(v: &Vector) -> u64 {
    let mut h = FxHasher::default();
    v.x.to_bits().hash(&mut h);
    v.y.to_bits().hash(&mut h);
    v.z.to_bits().hash(&mut h);
    h.finish()
}

/// Digest of the full plane geometry
fn geometry_hash(plane: &dyn PlaneLike) -> u64 {
    hash_vector(&plane.position())
        ^ hash_vector(&plane.normal().to_vector()).wrapping_mul(3)
        ^ hash_vector(&plane.plane_x().to_vector()).wrapping_mul(5)
}

/// Round to `digits` decimals, ties to even.
fn round_to(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round_ties_even() / scale;
    // no "-0.000"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `0 {axis} {sign} {distance} {hash}` for a normal and origin distance
/// (both expressed in the same system).
///
/// The distance is rounded with ties to even and printed in its shortest
/// form, so `3.25` rather than `3.250`.
fn derive_id(normal: &Direction, d: f64, digits: usize, hash: u64) -> String {
    let (nx, ny, nz) = (normal.x().abs(), normal.y().abs(), normal.z().abs());
    let axis = if nx > ny {
        if nx > nz {
            'X'
        } else {
            'Z'
        }
    } else if ny > nz {
        'Y'
    } else {
        'Z'
    };
    let sign = if d < 0.0 { '+' } else { '-' };
    format!("0 {} {} {} {:016x}", axis, sign, round_to(-d, digits), hash)
}

impl ReferencePlane {
    pub const CSV_HEADER: &'static str = "Id;Position;Normal;PlaneX;";
    pub const FIELD_COUNT: usize = 4;
    pub const FIELD_COUNT_CXX: usize = 5;

    /// Wrap a plane under an explicit id.
    pub fn with_id(id: impl Into<String>, plane: ReferencePlaneKind) -> Self {
        Self {
            id: id.into(),
            plane,
        }
    }

    /// Wrap a plane under its derived id.
    ///
    /// The id carries the dominant normal axis, the side of the origin, the
    /// origin distance rounded to `digits` decimals and a geometry hash.
    pub fn from_plane(plane: Plane, digits: usize) -> Self {
        Self::derive(ReferencePlaneKind::Plane(plane), digits)
    }

    pub fn from_stochastic(plane: StochasticPlane, digits: usize) -> Self {
        Self::derive(ReferencePlaneKind::Stochastic(plane), digits)
    }

    fn derive(plane: ReferencePlaneKind, digits: usize) -> Self {
        let p = plane.as_plane_like();
        let id = derive_id(&p.normal(), p.d(), digits, geometry_hash(p));
        Self { id, plane }
    }

    /// As [`ReferencePlane::from_plane`] with axis and distance taken
    /// relative to a local coordinate system.
    pub fn from_plane_in_system(plane: ReferencePlaneKind, system: &CoordinateSystem, digits: usize) -> Self {
        let p = plane.as_plane_like();
        let normal = system.to_system_direction(&p.normal());
        let d = -normal.dot_vector(&system.to_system(&p.position()));
        let id = derive_id(&normal, d, digits, geometry_hash(p));
        Self { id, plane }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plane(&self) -> &ReferencePlaneKind {
        &self.plane
    }

    pub fn plane_like(&self) -> &dyn PlaneLike {
        self.plane.as_plane_like()
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self.plane, ReferencePlaneKind::Stochastic(_))
    }

    /// Same id, or normals and origin distances within tolerance.
    pub fn approx_equals(&self, other: &ReferencePlane, max_dist: f64, max_cos_one: f64) -> bool {
        self.id == other.id
            || self
                .plane_like()
                .approx_equals(other.plane_like(), max_dist, max_cos_one)
    }

    /// `Id;POINT Z(position);normal;planeX[;cxx]`
    pub fn to_csv_line(&self) -> String {
        let p = self.plane_like();
        let mut line = format!(
            "{};{};{};{}",
            self.id,
            p.position().to_wkt_string(),
            p.normal(),
            p.plane_x()
        );
        if let ReferencePlaneKind::Stochastic(sp) = &self.plane {
            line.push(csv::SEPARATOR);
            line.push_str(&sp.cxx().to_array_string());
        }
        line
    }

    /// Parse a CSV record; a readable fifth field makes it stochastic.
    pub fn parse_csv_line(line: &str) -> Result<ReferencePlane> {
        let line = csv::non_empty(line, SOURCE)?;
        let fields = csv::fields(line);
        if fields.len() < Self::FIELD_COUNT {
            return Err(csv::unreadable(SOURCE, line));
        }
        let position = Vector::parse_wkt(fields[1]).map_err(|_| csv::unreadable(SOURCE, line))?;
        let normal = Direction::parse(fields[2]).map_err(|_| csv::unreadable(SOURCE, line))?;
        let plane_x = Direction::parse(fields[3]).map_err(|_| csv::unreadable(SOURCE, line))?;

        let cxx = fields
            .get(Self::FIELD_COUNT)
            .and_then(|f| SpdMatrix6::parse_array(f).ok());
        let plane = match cxx {
            Some(cxx) => ReferencePlaneKind::Stochastic(StochasticPlane::new(position, normal, Some(plane_x), cxx)),
            None => ReferencePlaneKind::Plane(Plane::new(position, normal, Some(plane_x))),
        };
        Ok(ReferencePlane::with_id(fields[0], plane))
    }

    /// Read a plane file.
    ///
    /// Ids are unique in the result: a repeated id replaces the earlier
    /// plane but keeps its position.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<CsvBatch<ReferencePlane>> {
        let batch = csv::read_file(path.as_ref(), SOURCE, Self::parse_csv_line)?;
        Ok(CsvBatch {
            items: dedup_by_id(batch.items),
            errors: batch.errors,
        })
    }

    /// Write a plane file, each id once.
    pub fn write_csv<'a>(path: impl AsRef<Path>, planes: impl IntoIterator<Item = &'a ReferencePlane>) -> Result<usize> {
        let mut seen = rustc_hash::FxHashSet::default();
        let lines = planes
            .into_iter()
            .filter(|rp| seen.insert(rp.id.clone()))
            .map(ReferencePlane::to_csv_line);
        csv::write_file(path.as_ref(), Self::CSV_HEADER, lines)
    }
}

pub(crate) fn dedup_by_id(planes: Vec<ReferencePlane>) -> Vec<ReferencePlane> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut unique: Vec<ReferencePlane> = Vec::with_capacity(planes.len());
    for rp in planes {
        match index.get(&rp.id) {
            Some(&i) => unique[i] = rp,
            None => {
                index.insert(rp.id.clone(), unique.len());
                unique.push(rp);
            }
        }
    }
    unique
}

impl PartialEq for ReferencePlane {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ReferencePlane {}

impl Hash for ReferencePlane {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bimscan_core::consts::TRIGTOL;

    fn floor_plane(z: f64) -> Plane {
        Plane::new(Vector::new(1.0, 2.0, z), Direction::UNIT_Z, Some(Direction::UNIT_X))
    }

    #[test]
    fn test_derived_id() {
        let rp = ReferencePlane::from_plane(floor_plane(3.25), 3);
        let parts: Vec<&str> = rp.id().split(' ').collect();
        assert_eq!(&parts[..4], &["0", "Z", "+", "3.25"]);
        assert_eq!(parts[4].len(), 16);
        // same geometry, same id
        assert_eq!(rp, ReferencePlane::from_plane(floor_plane(3.25), 3));

        let below = ReferencePlane::from_plane(floor_plane(-1.5), 2);
        assert!(below.id().starts_with("0 Z - -1.5 "));
        let wall = Plane::new(Vector::new(0.0, 4.0, 0.0), Direction::NEG_UNIT_Y, None);
        assert!(ReferencePlane::from_plane(wall, 1).id().starts_with("0 Y - -4 "));
    }

    #[test]
    fn test_distance_rounds_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(-0.0004, 3).to_string(), "0");
        let id = derive_id(&Direction::UNIT_Z, -0.125, 2, 0);
        assert_eq!(id, "0 Z + 0.12 0000000000000000");
    }

    #[test]
    fn test_id_in_local_system() {
        let plane = floor_plane(3.0);
        let system = CoordinateSystem::new(Vector::new(0.0, 0.0, 1.0), Default::default());
        let rp = ReferencePlane::from_plane_in_system(ReferencePlaneKind::Plane(plane), &system, 3);
        assert!(rp.id().starts_with("0 Z + 2 "));
    }

    #[test]
    fn test_approx_equals() {
        let a = ReferencePlane::from_plane(floor_plane(3.0), 3);
        let b = ReferencePlane::from_plane(floor_plane(3.00001), 3);
        let c = ReferencePlane::from_plane(floor_plane(3.1), 3);
        assert_ne!(a, b);
        assert!(a.approx_equals(&b, 0.0005, TRIGTOL));
        assert!(!a.approx_equals(&c, 0.0005, TRIGTOL));
        let renamed = ReferencePlane::with_id(a.id(), *c.plane());
        assert!(a.approx_equals(&renamed, 0.0005, TRIGTOL));
    }

    #[test]
    fn test_csv_round_trip() {
        let rp = ReferencePlane::from_plane(
            Plane::new(Vector::new(0.5, -2.0, 3.0), Direction::new(0.3, -0.2, 0.9), None),
            3,
        );
        let line = rp.to_csv_line();
        assert_eq!(csv::fields(&line).len(), ReferencePlane::FIELD_COUNT);
        let back = ReferencePlane::parse_csv_line(&line).unwrap();
        assert_eq!(back, rp);
        assert!(!back.is_stochastic());
        assert!(back.approx_equals(&rp, 1e-12, 1e-12));
        let (p, q) = (back.plane_like(), rp.plane_like());
        assert_eq!(p.position(), q.position());
        assert!((p.plane_x().dot(&q.plane_x()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stochastic_csv_round_trip() {
        let sp = StochasticPlane::new(Vector::new(0.0, 0.0, 2.0), Direction::UNIT_Z, None, SpdMatrix6::UNIT);
        let rp = ReferencePlane::from_stochastic(sp, 3);
        let line = rp.to_csv_line();
        assert_eq!(csv::fields(&line).len(), ReferencePlane::FIELD_COUNT_CXX);
        let back = ReferencePlane::parse_csv_line(&line).unwrap();
        assert!(back.is_stochastic());
        match back.plane() {
            ReferencePlaneKind::Stochastic(p) => assert_eq!(*p.cxx(), SpdMatrix6::UNIT),
            ReferencePlaneKind::Plane(_) => unreachable!(),
        }
    }

    #[test]
    fn test_unreadable_lines() {
        assert!(ReferencePlane::parse_csv_line("").is_err());
        assert!(ReferencePlane::parse_csv_line("a;POINT Z(0 0 0);0 0 1").is_err());
        assert!(ReferencePlane::parse_csv_line("a;POINT(0 0);0 0 1;1 0 0").is_err());
        // unreadable covariance falls back to a plain plane
        let rp = ReferencePlane::parse_csv_line("a;POINT Z(0 0 0);0 0 1;1 0 0;").unwrap();
        assert!(!rp.is_stochastic());
    }

    #[test]
    fn test_dedup_keeps_first_position() {
        let a = ReferencePlane::with_id("a", ReferencePlaneKind::Plane(floor_plane(1.0)));
        let b = ReferencePlane::with_id("b", ReferencePlaneKind::Plane(floor_plane(2.0)));
        let a2 = ReferencePlane::with_id("a", ReferencePlaneKind::Plane(floor_plane(3.0)));
        let unique = dedup_by_id(vec![a, b, a2]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].id(), "a");
        assert_eq!(unique[0].plane_like().d(), -3.0);
    }
}
