// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deduplication of near-identical reference planes.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::MergeConfig;
use crate::error::Result;
use crate::planar_face::PlanarFace;
use crate::reference_plane::ReferencePlane;

/// Summary of a merge run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    pub input_planes: usize,
    pub output_planes: usize,
    pub merged_planes: usize,
    pub remapped_faces: usize,
    pub orphan_faces: usize,
    /// Faces whose plane id is not among the input planes
    pub orphans: Vec<String>,
}

impl MergeReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Canonical planes with their faces, in order of first face appearance
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub groups: Vec<(ReferencePlane, Vec<PlanarFace>)>,
    pub report: MergeReport,
}

impl MergeOutcome {
    pub fn planes(&self) -> impl Iterator<Item = &ReferencePlane> {
        self.groups.iter().map(|(plane, _)| plane)
    }

    pub fn faces(&self) -> impl Iterator<Item = &PlanarFace> {
        self.groups.iter().flat_map(|(_, faces)| faces)
    }
}

/// Map every plain plane to the earliest canonical plane it matches.
///
/// Only targets that are not themselves remapped are considered, so the
/// map is flat and a second run finds nothing. Stochastic planes are
/// never compared.
fn canonical_map(planes: &[ReferencePlane], config: &MergeConfig) -> FxHashMap<String, usize> {
    let mut id_map: FxHashMap<String, usize> = FxHashMap::default();
    let mut canonical: Vec<usize> = Vec::new();
    for (j, plane) in planes.iter().enumerate() {
        if plane.is_stochastic() {
            continue;
        }
        let target = canonical
            .iter()
            .copied()
            .find(|&i| planes[i].approx_equals(plane, config.max_dist, config.max_cos_one));
        match target {
            Some(i) => {
                id_map.insert(plane.id().to_string(), i);
            }
            None => canonical.push(j),
        }
    }
    id_map
}

/// Group faces under their planes, in order of first appearance.
///
/// Faces referring to an unknown plane are returned separately.
pub fn group_by_plane(
    planes: &[ReferencePlane],
    faces: Vec<PlanarFace>,
) -> (Vec<(ReferencePlane, Vec<PlanarFace>)>, Vec<PlanarFace>) {
    let index: FxHashMap<&str, usize> = planes.iter().enumerate().map(|(i, p)| (p.id(), i)).collect();
    let mut slots: FxHashMap<usize, usize> = FxHashMap::default();
    let mut groups: Vec<(ReferencePlane, Vec<PlanarFace>)> = Vec::new();
    let mut orphans = Vec::new();
    for face in faces {
        let Some(&plane_index) = index.get(face.reference_plane_id()) else {
            orphans.push(face);
            continue;
        };
        let slot = *slots.entry(plane_index).or_insert_with(|| {
            groups.push((planes[plane_index].clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(face);
    }
    (groups, orphans)
}

/// Merge near-duplicate planes and move their faces to the survivor.
///
/// When planes `i < j` match, `i` survives. The faces of every merged
/// plane are re-expressed in the survivor's system.
///
/// # Panics
///
/// If a face cannot be moved to a plane already found equal to its own.
pub fn combine_and_map(planes: &[ReferencePlane], mut faces: Vec<PlanarFace>, config: &MergeConfig) -> MergeOutcome {
    let planes = crate::reference_plane::dedup_by_id(planes.to_vec());
    let id_map = canonical_map(&planes, config);
    let by_id: FxHashMap<&str, &ReferencePlane> = planes.iter().map(|p| (p.id(), p)).collect();

    let remapped_faces: usize = faces
        .par_iter_mut()
        .map(|face| {
            let Some(&target) = id_map.get(face.reference_plane_id()) else {
                return 0;
            };
            let old = by_id[face.reference_plane_id()];
            let new = &planes[target];
            if !face.change_reference_plane(old, new) {
                panic!(
                    "face {} cannot move from plane {} to plane {}",
                    face.id(),
                    old.id(),
                    new.id()
                );
            }
            1
        })
        .sum();

    let survivors: Vec<ReferencePlane> = planes
        .iter()
        .filter(|p| !id_map.contains_key(p.id()))
        .cloned()
        .collect();
    let (groups, orphans) = group_by_plane(&survivors, faces);

    let report = MergeReport {
        input_planes: planes.len(),
        output_planes: survivors.len(),
        merged_planes: id_map.len(),
        remapped_faces,
        orphan_faces: orphans.len(),
        orphans: orphans.iter().map(|f| f.id().to_string()).collect(),
    };
    for face in &orphans {
        tracing::warn!(face = %face.id(), plane = face.reference_plane_id(), "Face refers to an unknown plane");
    }
    tracing::info!(
        planes = report.input_planes,
        merged = report.merged_planes,
        remapped_faces = report.remapped_faces,
        groups = groups.len(),
        "Combined reference planes"
    );

    MergeOutcome { groups, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;
    use crate::reference_plane::ReferencePlaneKind;
    use bimscan_geometry::d2;
    use bimscan_geometry::d3::{Direction, Plane, Vector};
    use bimscan_geometry::{SpdMatrix6, StochasticPlane};

    fn floor(id: &str, z: f64) -> ReferencePlane {
        ReferencePlane::with_id(
            id,
            ReferencePlaneKind::Plane(Plane::new(Vector::new(0.0, 0.0, z), Direction::UNIT_Z, None)),
        )
    }

    fn unit_square(id: &str, plane: &ReferencePlane) -> PlanarFace {
        let ring = d2::LineString::new_ring([
            d2::Vector::new(0.0, 0.0),
            d2::Vector::new(1.0, 0.0),
            d2::Vector::new(1.0, 1.0),
            d2::Vector::new(0.0, 1.0),
        ]);
        PlanarFace::new(Id::new("s", "o", id), plane, d2::Polygon::from_ring(ring).unwrap())
    }

    #[test]
    fn test_earlier_plane_survives() {
        let planes = vec![floor("a", 3.0), floor("b", 3.0001), floor("c", 5.0)];
        let faces = vec![
            unit_square("1", &planes[1]),
            unit_square("2", &planes[0]),
            unit_square("3", &planes[2]),
        ];
        let outcome = combine_and_map(&planes, faces, &MergeConfig::default());
        let ids: Vec<&str> = outcome.planes().map(ReferencePlane::id).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(outcome.groups[0].1.len(), 2);
        assert!(outcome.faces().all(|f| f.reference_plane_id() != "b"));
        assert_eq!(outcome.report.merged_planes, 1);
        assert_eq!(outcome.report.remapped_faces, 1);
        assert_eq!(outcome.report.output_planes, 2);
    }

    #[test]
    fn test_chain_maps_to_first_canonical() {
        // b matches a, c matches b but not a
        let planes = vec![floor("a", 0.0), floor("b", 0.0004), floor("c", 0.0008)];
        let id_map = canonical_map(&planes, &MergeConfig::default());
        assert_eq!(id_map.get("b"), Some(&0));
        assert_eq!(id_map.get("c"), None);
    }

    #[test]
    fn test_stochastic_planes_are_kept() {
        let sp = StochasticPlane::new(Vector::new(0.0, 0.0, 3.0), Direction::UNIT_Z, None, SpdMatrix6::UNIT);
        let planes = vec![
            floor("a", 3.0),
            ReferencePlane::with_id("s", ReferencePlaneKind::Stochastic(sp)),
        ];
        let faces = vec![unit_square("1", &planes[1])];
        let outcome = combine_and_map(&planes, faces, &MergeConfig::default());
        assert_eq!(outcome.report.merged_planes, 0);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].0.id(), "s");
    }

    #[test]
    fn test_orphans_are_reported() {
        let planes = vec![floor("a", 0.0)];
        let stray = floor("x", 1.0);
        let faces = vec![unit_square("1", &planes[0]), unit_square("2", &stray)];
        let outcome = combine_and_map(&planes, faces, &MergeConfig::default());
        assert_eq!(outcome.report.orphan_faces, 1);
        assert_eq!(outcome.report.orphans, vec!["s;o;2".to_string()]);
        assert_eq!(outcome.faces().count(), 1);

        let json = outcome.report.to_json().unwrap();
        let back: MergeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome.report);
    }
}
