// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::{BBox, LineString, Plane, PlaneLike, Vector};
use crate::d2;
use crate::error::{Error, Result};
use crate::wkt;

/// Planar polygon in space: a plane plus a polygon in its 2-D system
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    plane: Plane,
    polygon: d2::Polygon,
}

fn max_abs(dists: &[f64]) -> f64 {
    dists.iter().fold(0.0, |m, d| m.max(d.abs()))
}

impl Polygon {
    /// Build from 3-D rings, the first being the exterior.
    ///
    /// The plane is fitted to the exterior ring (so it is counter-clockwise
    /// in the plane system); holes must wind the other way. Returns the
    /// polygon and the largest out-of-plane distance of any vertex.
    pub fn create(rings: &[Vec<Vector>]) -> Option<(Polygon, f64)> {
        let exterior = rings.first()?;
        let plane = Plane::create(exterior, true)?;
        let (ring, dists) = d2::LineString::from_plane(&plane, exterior);
        if !ring.is_linear_ring() {
            return None;
        }
        let flip = ring.area() < 0.0;
        let mut max_dist = max_abs(&dists);
        let mut rings2d = vec![if flip { ring.reverse() } else { ring }];

        for hole in &rings[1..] {
            let (ring, dists) = d2::LineString::from_plane(&plane, hole);
            let ring = if flip { ring.reverse() } else { ring };
            if ring.area() > 0.0 {
                return None;
            }
            max_dist = max_dist.max(max_abs(&dists));
            rings2d.push(ring);
        }

        let polygon = d2::Polygon::create_from_rings(rings2d)?;
        Some((Polygon { plane, polygon }, max_dist))
    }

    /// Build from 3-D rings projected into a given plane.
    pub fn create_on_plane(plane: Plane, rings: &[Vec<Vector>]) -> Option<(Polygon, f64)> {
        let mut max_dist: f64 = 0.0;
        let rings2d: Vec<d2::LineString> = rings
            .iter()
            .map(|r| {
                let (ring, dists) = d2::LineString::from_plane(&plane, r);
                max_dist = max_dist.max(max_abs(&dists));
                ring
            })
            .collect();
        let polygon = d2::Polygon::create_from_rings(rings2d)?;
        Some((Polygon { plane, polygon }, max_dist))
    }

    /// Wrap a polygon given in the plane system of `plane`.
    pub fn from_parts(plane: Plane, polygon: d2::Polygon) -> Self {
        Self { plane, polygon }
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn polygon2d(&self) -> &d2::Polygon {
        &self.polygon
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Rings lifted back into space (exterior first)
    pub fn rings(&self) -> Vec<LineString> {
        self.polygon
            .rings()
            .iter()
            .map(|r| LineString::from_plane(&self.plane, r))
            .collect()
    }

    /// Bounding box of the exterior ring in space
    pub fn bbox(&self) -> BBox {
        BBox::from_vectors(
            &self
                .polygon
                .exterior()
                .vertices()
                .iter()
                .map(|v| self.plane.from_plane_system(v))
                .collect::<Vec<_>>(),
        )
    }

    /// `POLYGON Z((x y z,...),(...))`
    pub fn to_wkt_string(&self) -> String {
        format!("POLYGON Z{}", self)
    }

    /// Parse `POLYGON Z((...),(...))`, fitting the plane to the exterior.
    ///
    /// Returns the polygon and the largest out-of-plane distance.
    pub fn parse_wkt(input: &str) -> Result<(Polygon, f64)> {
        let rings: Vec<Vec<Vector>> = wkt::parse_polygon::<3>(input)?
            .into_iter()
            .map(|r| r.into_iter().map(Vector::from).collect())
            .collect();
        Polygon::create(&rings)
            .ok_or_else(|| Error::InvalidGeometry(format!("not a valid planar polygon: {}", input)))
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wkt::fmt_list(f, &self.rings())
    }
}
