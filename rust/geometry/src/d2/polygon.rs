// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::{BBox, LineString, Vector};
use crate::d3::PlaneLike;
use crate::error::{Error, Result};
use crate::wkt;

/// Polygon with a counter-clockwise exterior ring and clockwise holes
///
/// Every constructed polygon satisfies: exterior area > 0, each hole area
/// < 0, each hole inside the exterior's bounding box, holes do not overlap,
/// and `area = exterior - Σ|hole|` > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<LineString>,
    area: f64,
}

/// Segments `ab` and `cd` cross at a point interior to both
fn segments_cross(a: &Vector, b: &Vector, c: &Vector, d: &Vector) -> bool {
    let opposite = |p: f64, q: f64| (p > 0.0 && q < 0.0) || (p < 0.0 && q > 0.0);
    opposite(a.det3(b, c), a.det3(b, d)) && opposite(c.det3(d, a), c.det3(d, b))
}

fn rings_cross(a: &LineString, b: &LineString) -> bool {
    a.segments().any(|(p, q)| {
        b.segments().any(|(r, s)| segments_cross(p, q, r, s))
    })
}

/// Holes overlap when they are identical, a vertex of one lies strictly
/// inside the other or their edges cross.
fn holes_overlap(holes: &[LineString]) -> bool {
    for (i, a) in holes.iter().enumerate() {
        for b in &holes[i + 1..] {
            if !a.bbox().does_overlap_or_touch(b.bbox()) {
                continue;
            }
            if a.vertices() == b.vertices() {
                return true;
            }
            let inside = |ring: &LineString, other: &LineString| {
                other.vertices().iter().any(|p| ring.contains_strictly(p))
            };
            if inside(a, b) || inside(b, a) || rings_cross(a, b) {
                return true;
            }
        }
    }
    false
}

impl LineString {
    /// `p` lies on one of the segments
    pub fn touches(&self, p: &Vector) -> bool {
        self.segments().any(|(a, b)| {
            a.det3(b, p) == 0.0
                && p.x >= a.x.min(b.x)
                && p.x <= a.x.max(b.x)
                && p.y >= a.y.min(b.y)
                && p.y <= a.y.max(b.y)
        })
    }

    /// `p` lies inside the ring and not on its border
    pub fn contains_strictly(&self, p: &Vector) -> bool {
        self.bbox().encloses_point(p) && !self.touches(p) && self.crosses_ray_odd(p)
    }
}

impl Polygon {
    /// Polygon from a single ring of either orientation
    pub fn from_ring(exterior: LineString) -> Option<Polygon> {
        Self::create(exterior, Vec::new())
    }

    /// Assemble a polygon from an exterior ring and candidate holes.
    ///
    /// Rings are reoriented to their role; holes without area are skipped.
    /// Returns `None` when the exterior is no ring, a hole leaves the
    /// exterior's bounding box, holes overlap or the area is not positive.
    pub fn create(exterior: LineString, holes: impl IntoIterator<Item = LineString>) -> Option<Polygon> {
        if !exterior.is_linear_ring() {
            return None;
        }
        let exterior = if exterior.area() < 0.0 {
            exterior.reverse()
        } else {
            exterior
        };
        let bbox = *exterior.bbox();
        let mut area = exterior.area();
        let mut rings = vec![exterior];

        for hole in holes {
            if !hole.is_linear_ring() {
                continue;
            }
            if !bbox.encloses(hole.bbox()) {
                return None;
            }
            area -= hole.area().abs();
            rings.push(if hole.area() > 0.0 { hole.reverse() } else { hole });
        }

        if !(area > 0.0) || holes_overlap(&rings[1..]) {
            return None;
        }
        Some(Polygon { rings, area })
    }

    /// Assemble a polygon whose first ring is the exterior.
    ///
    /// The exterior's orientation decides: holes must wind the opposite way.
    /// A clockwise exterior flips every ring.
    pub fn create_from_rings(rings: impl IntoIterator<Item = LineString>) -> Option<Polygon> {
        let mut rings = rings.into_iter();
        let exterior = rings.next()?;
        if !exterior.is_linear_ring() {
            return None;
        }
        let reverse = exterior.area() < 0.0;
        let bbox = *exterior.bbox();
        let mut area = exterior.area();
        let mut out = vec![if reverse { exterior.reverse() } else { exterior }];

        for hole in rings {
            if hole.area() == 0.0 {
                continue;
            }
            if (hole.area() > 0.0) != reverse || !bbox.encloses(hole.bbox()) {
                return None;
            }
            area += hole.area();
            out.push(if reverse { hole.reverse() } else { hole });
        }

        let area = if reverse { -area } else { area };
        if !(area > 0.0) || holes_overlap(&out[1..]) {
            return None;
        }
        Some(Polygon { rings: out, area })
    }

    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    pub fn exterior(&self) -> &LineString {
        &self.rings[0]
    }

    pub fn holes(&self) -> &[LineString] {
        &self.rings[1..]
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn bbox(&self) -> &BBox {
        self.rings[0].bbox()
    }

    /// Even-odd test over all rings
    pub fn contains_point(&self, p: &Vector) -> bool {
        self.rings
            .iter()
            .filter(|r| r.crosses_ray_odd(p))
            .count()
            % 2
            == 1
    }

    /// Re-express the polygon, given in the plane system of `old`, in the
    /// plane system of `new`.
    pub fn change_plane<A, B>(&self, old: &A, new: &B) -> Option<Polygon>
    where
        A: PlaneLike + ?Sized,
        B: PlaneLike + ?Sized,
    {
        let rings: Vec<LineString> = self
            .rings
            .iter()
            .map(|ring| {
                LineString::new(
                    ring.vertices()
                        .iter()
                        .map(|v| new.to_plane_system(&old.from_plane_system(v)).0),
                    true,
                )
            })
            .collect();
        Polygon::create_from_rings(rings)
    }

    /// `POLYGON((x y,...),(...))`
    pub fn to_wkt_string(&self) -> String {
        format!("POLYGON{}", self)
    }

    /// Parse `((x y,...),(...))`.
    pub fn parse(input: &str) -> Result<Polygon> {
        Self::from_coords(wkt::parse_rings::<2>(input)?, input)
    }

    /// Parse `POLYGON((x y,...),(...))`.
    pub fn parse_wkt(input: &str) -> Result<Polygon> {
        Self::from_coords(wkt::parse_polygon::<2>(input)?, input)
    }

    fn from_coords(rings: Vec<Vec<[f64; 2]>>, input: &str) -> Result<Polygon> {
        let rings = rings
            .into_iter()
            .map(|r| LineString::from_coords(r, true))
            .collect::<Result<Vec<_>>>()?;
        Polygon::create_from_rings(rings)
            .ok_or_else(|| Error::InvalidGeometry(format!("not a valid polygon: {}", input)))
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wkt::fmt_list(f, &self.rings)
    }
}
