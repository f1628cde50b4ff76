// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar faces: a 2-D polygon in the system of a reference plane.

use bimscan_geometry::d2;
use bimscan_geometry::d3::{self, PlaneLike};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::csv::{self, CsvBatch};
use crate::error::Result;
use crate::id::Id;
use crate::reference_plane::ReferencePlane;

const SOURCE: &str = "PlanarFace";

/// Face of a building object lying in a reference plane
///
/// The plane is referenced by id; the corners and the bounding box are in
/// world coordinates and follow the polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarFace {
    id: Id,
    reference_plane_id: String,
    btm_lft: d3::Vector,
    btm_rgt: d3::Vector,
    top_rgt: d3::Vector,
    top_lft: d3::Vector,
    bbox: d3::BBox,
    polygon: d2::Polygon,
}

/// Face read from the short form, with the plane fitted to its polygon
#[derive(Debug, Clone)]
pub struct DerivedFace {
    pub face: PlanarFace,
    pub reference_plane: ReferencePlane,
    /// Largest distance of a polygon vertex from the fitted plane
    pub max_plane_dist: f64,
}

struct Extent {
    corners: [d3::Vector; 4],
    bbox: d3::BBox,
}

/// Corners from the 2-D bounding box, bbox from the lifted exterior.
fn extent(plane: &dyn PlaneLike, polygon: &d2::Polygon) -> Extent {
    let b = polygon.bbox();
    // the right corners are (min.x, max.y) and (max.x, min.y)
    let corners = [
        plane.from_plane_system(&b.min),
        plane.from_plane_system(&d2::Vector::new(b.min.x, b.max.y)),
        plane.from_plane_system(&b.max),
        plane.from_plane_system(&d2::Vector::new(b.max.x, b.min.y)),
    ];
    let bbox = d3::BBox::from_vectors(
        &polygon
            .exterior()
            .vertices()
            .iter()
            .map(|v| plane.from_plane_system(v))
            .collect::<Vec<_>>(),
    );
    Extent { corners, bbox }
}

impl PlanarFace {
    pub const CSV_HEADER: &'static str =
        "StateId;ObjectGuid;FaceId;PlaneId;BtmLft;BtmRgt;TopRgt;TopLft;BBoxMin;BBoxMax;Polygon";
    pub const CSV_HEADER_SHORT: &'static str = "StateId;ObjectGuid;FaceId;Polygon";
    pub const FIELD_COUNT: usize = 11;
    pub const FIELD_COUNT_SHORT: usize = 4;

    /// Face with `polygon` given in the system of `reference_plane`.
    pub fn new(id: Id, reference_plane: &ReferencePlane, polygon: d2::Polygon) -> Self {
        let Extent { corners, bbox } = extent(reference_plane.plane_like(), &polygon);
        let [btm_lft, btm_rgt, top_rgt, top_lft] = corners;
        Self {
            id,
            reference_plane_id: reference_plane.id().to_string(),
            btm_lft,
            btm_rgt,
            top_rgt,
            top_lft,
            bbox,
            polygon,
        }
    }

    /// Face with every derived value given, as read from the long form.
    pub fn from_parts(
        id: Id,
        reference_plane_id: impl Into<String>,
        corners: [d3::Vector; 4],
        bbox: d3::BBox,
        polygon: d2::Polygon,
    ) -> Self {
        let [btm_lft, btm_rgt, top_rgt, top_lft] = corners;
        Self {
            id,
            reference_plane_id: reference_plane_id.into(),
            btm_lft,
            btm_rgt,
            top_rgt,
            top_lft,
            bbox,
            polygon,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn reference_plane_id(&self) -> &str {
        &self.reference_plane_id
    }

    /// `[btm_lft, btm_rgt, top_rgt, top_lft]`
    pub fn corners(&self) -> [d3::Vector; 4] {
        [self.btm_lft, self.btm_rgt, self.top_rgt, self.top_lft]
    }

    pub fn bbox(&self) -> &d3::BBox {
        &self.bbox
    }

    pub fn polygon(&self) -> &d2::Polygon {
        &self.polygon
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Move the face from `old` to `new`, keeping its world geometry.
    ///
    /// `false` when the face does not lie in `old`, or when the polygon is
    /// no longer valid in the system of `new`.
    pub fn change_reference_plane(&mut self, old: &ReferencePlane, new: &ReferencePlane) -> bool {
        if old.id() != self.reference_plane_id {
            return false;
        }
        if old.id() == new.id() {
            return true;
        }
        let polygon = match self.polygon.change_plane(old.plane_like(), new.plane_like()) {
            Some(p) => p,
            None => return false,
        };
        *self = PlanarFace::new(self.id.clone(), new, polygon);
        true
    }

    /// The polygon lifted into `plane`
    pub fn polygon_3d(&self, plane: &ReferencePlane) -> d3::Polygon {
        d3::Polygon::from_parts(plane.plane_like().get_plane(), self.polygon.clone())
    }

    /// Long form record
    pub fn to_csv_line(&self) -> String {
        format!(
            "{};{};{};{};{};{};{};{};{}",
            self.id,
            self.reference_plane_id,
            self.btm_lft.to_wkt_string(),
            self.btm_rgt.to_wkt_string(),
            self.top_rgt.to_wkt_string(),
            self.top_lft.to_wkt_string(),
            self.bbox.min.to_wkt_string(),
            self.bbox.max.to_wkt_string(),
            self.polygon.to_wkt_string()
        )
    }

    /// Short form record with the polygon in world coordinates
    pub fn to_csv_line_short(&self, plane: &ReferencePlane) -> String {
        format!("{};{}", self.id, self.polygon_3d(plane).to_wkt_string())
    }

    pub fn parse_csv_line(line: &str) -> Result<PlanarFace> {
        let line = csv::non_empty(line, SOURCE)?;
        let f = csv::fields(line);
        if f.len() != Self::FIELD_COUNT {
            return Err(csv::unreadable(SOURCE, line));
        }
        let point = |s: &str| d3::Vector::parse_wkt(s).map_err(|_| csv::unreadable(SOURCE, line));
        let corners = [point(f[4])?, point(f[5])?, point(f[6])?, point(f[7])?];
        let bbox = d3::BBox::new(point(f[8])?, point(f[9])?);
        let polygon = d2::Polygon::parse_wkt(f[10]).map_err(|_| csv::unreadable(SOURCE, line))?;
        Ok(PlanarFace::from_parts(Id::new(f[0], f[1], f[2]), f[3], corners, bbox, polygon))
    }

    /// Parse a short form record, fitting the plane to the polygon and
    /// deriving its id with `digits` decimals.
    pub fn parse_csv_line_short(line: &str, digits: usize) -> Result<DerivedFace> {
        let line = csv::non_empty(line, SOURCE)?;
        let f = csv::fields(line);
        if f.len() != Self::FIELD_COUNT_SHORT {
            return Err(csv::unreadable(SOURCE, line));
        }
        let (polygon, max_plane_dist) =
            d3::Polygon::parse_wkt(f[3]).map_err(|_| csv::unreadable(SOURCE, line))?;
        let reference_plane = ReferencePlane::from_plane(*polygon.plane(), digits);
        let face = PlanarFace::new(Id::new(f[0], f[1], f[2]), &reference_plane, polygon.polygon2d().clone());
        Ok(DerivedFace {
            face,
            reference_plane,
            max_plane_dist,
        })
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<CsvBatch<PlanarFace>> {
        csv::read_file(path.as_ref(), SOURCE, Self::parse_csv_line)
    }

    pub fn read_csv_short(path: impl AsRef<Path>, digits: usize) -> Result<CsvBatch<DerivedFace>> {
        csv::read_file(path.as_ref(), SOURCE, |line| Self::parse_csv_line_short(line, digits))
    }

    pub fn write_csv<'a>(path: impl AsRef<Path>, faces: impl IntoIterator<Item = &'a PlanarFace>) -> Result<usize> {
        csv::write_file(
            path.as_ref(),
            Self::CSV_HEADER,
            faces.into_iter().map(PlanarFace::to_csv_line),
        )
    }

    /// Write faces as Wavefront OBJ in world coordinates.
    ///
    /// Each face starts with a `# id` comment, followed by its vertices
    /// and one `f` line per ring. Returns the number of vertices written.
    pub fn write_obj<W: Write>(out: &mut W, groups: &[(ReferencePlane, Vec<PlanarFace>)]) -> Result<usize> {
        let mut next_index = 1usize;
        for (plane, faces) in groups {
            let plane = plane.plane_like();
            for face in faces {
                writeln!(out, "# {}", face.id)?;
                let mut face_lines = Vec::with_capacity(face.polygon.rings().len());
                for ring in face.polygon.rings() {
                    let vertices = ring.vertices();
                    let mut indices = Vec::with_capacity(vertices.len().saturating_sub(1));
                    for v in vertices.iter().skip(1) {
                        writeln!(out, "{}", plane.from_plane_system(v).to_obj_string())?;
                        indices.push(next_index.to_string());
                        next_index += 1;
                    }
                    face_lines.push(format!("f {}", indices.join(" ")));
                }
                for line in face_lines {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Ok(next_index - 1)
    }

    pub fn write_obj_file(path: impl AsRef<Path>, groups: &[(ReferencePlane, Vec<PlanarFace>)]) -> Result<usize> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        let vertices = Self::write_obj(&mut out, groups)?;
        out.flush()?;
        tracing::info!(path = %path.display(), vertices, "Wrote OBJ");
        Ok(vertices)
    }
}
