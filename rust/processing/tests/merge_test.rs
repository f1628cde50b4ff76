// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference plane merging and file interchange

use approx::assert_abs_diff_eq;
use bimscan_core::consts::TRIGTOL;
use bimscan_geometry::d2;
use bimscan_geometry::d3::{Direction, Plane, PlaneLike, Vector};
use bimscan_processing::{combine_and_map, Id, MergeConfig, PlanarFace, ReferencePlane, ReferencePlaneKind};
use proptest::prelude::*;
use std::path::PathBuf;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> d2::Polygon {
    d2::Polygon::from_ring(d2::LineString::new_ring([
        d2::Vector::new(x0, y0),
        d2::Vector::new(x1, y0),
        d2::Vector::new(x1, y1),
        d2::Vector::new(x0, y1),
    ]))
    .unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bimscan-{}-{}", std::process::id(), name))
}

/// Slab top at z = 3 seen twice, plus a wall
fn survey() -> (Vec<ReferencePlane>, Vec<PlanarFace>) {
    let first = ReferencePlane::from_plane(
        Plane::new(Vector::new(0.0, 0.0, 3.0), Direction::UNIT_Z, Some(Direction::UNIT_X)),
        3,
    );
    let second = ReferencePlane::from_plane(
        Plane::new(
            Vector::new(2.0, 1.0, 3.00001),
            Direction::new(0.0, 1e-12, 1.0),
            Some(Direction::UNIT_X),
        ),
        3,
    );
    let wall = ReferencePlane::from_plane(
        Plane::new(Vector::new(0.0, 0.0, 0.0), Direction::NEG_UNIT_Y, Some(Direction::UNIT_X)),
        3,
    );
    let faces = vec![
        PlanarFace::new(Id::new("p1", "slab", "top_1"), &first, rect(0.0, 0.0, 4.0, 5.0)),
        PlanarFace::new(Id::new("p1", "slab", "top_2"), &second, rect(2.0, -1.0, 6.0, 4.0)),
        PlanarFace::new(Id::new("p1", "wall", "side"), &wall, rect(0.0, 0.0, 4.0, 3.0)),
    ];
    (vec![first, second, wall], faces)
}

#[test]
fn test_near_duplicates_merge_into_first_plane() {
    let (planes, faces) = survey();
    assert_ne!(planes[0], planes[1]);
    assert!(planes[0].approx_equals(&planes[1], 0.0005, TRIGTOL));

    let config = MergeConfig::default();
    let outcome = combine_and_map(&planes, faces, &config);
    assert_eq!(outcome.report.input_planes, 3);
    assert_eq!(outcome.report.merged_planes, 1);
    assert_eq!(outcome.report.remapped_faces, 1);
    assert_eq!(outcome.groups.len(), 2);

    let (slab, slab_faces) = &outcome.groups[0];
    assert_eq!(slab, &planes[0]);
    assert_eq!(slab_faces.len(), 2);
    assert!(slab_faces.iter().all(|f| f.reference_plane_id() == planes[0].id()));

    // the moved face keeps its place in the world
    let moved = &slab_faces[1];
    assert_abs_diff_eq!(moved.area(), 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moved.bbox().min.x, 4.0, epsilon = 1e-6);
    assert_abs_diff_eq!(moved.bbox().min.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(moved.bbox().max.z, 3.0, epsilon = 1e-4);
}

#[test]
fn test_merge_is_a_fixed_point() {
    let (planes, faces) = survey();
    let config = MergeConfig::default();
    let once = combine_and_map(&planes, faces, &config);

    let planes: Vec<ReferencePlane> = once.planes().cloned().collect();
    let faces: Vec<PlanarFace> = once.faces().cloned().collect();
    let twice = combine_and_map(&planes, faces, &config);
    assert_eq!(twice.report.merged_planes, 0);
    assert_eq!(twice.report.remapped_faces, 0);
    assert_eq!(twice.faces().cloned().collect::<Vec<_>>(), once.faces().cloned().collect::<Vec<_>>());
}

#[test]
fn test_csv_files_round_trip() {
    let (planes, faces) = survey();
    let planes_path = temp_path("planes.csv");
    let faces_path = temp_path("faces.csv");

    assert_eq!(ReferencePlane::write_csv(&planes_path, &planes).unwrap(), 3);
    assert_eq!(PlanarFace::write_csv(&faces_path, &faces).unwrap(), 3);

    let planes_back = ReferencePlane::read_csv(&planes_path).unwrap();
    let faces_back = PlanarFace::read_csv(&faces_path).unwrap();
    assert!(planes_back.is_clean());
    assert!(faces_back.is_clean());
    assert_eq!(planes_back.items, planes);
    assert_eq!(faces_back.items, faces);
    for (a, b) in planes_back.items.iter().zip(&planes) {
        assert!(a.plane_like().approx_equals(b.plane_like(), 1e-12, 1e-12));
    }

    std::fs::remove_file(planes_path).ok();
    std::fs::remove_file(faces_path).ok();
}

#[test]
fn test_unreadable_lines_are_listed() {
    let path = temp_path("broken.csv");
    let (planes, faces) = survey();
    let mut content = format!("{}\n", PlanarFace::CSV_HEADER);
    content.push_str(&faces[0].to_csv_line_short(&planes[0]));
    content.push('\n');
    content.push_str("p1;slab;x;POLYGON Z((0 0 0,1 1 1))\n");
    std::fs::write(&path, content).unwrap();

    let batch = PlanarFace::read_csv_short(&path, 3).unwrap();
    assert_eq!(batch.items.len(), 1);
    assert_eq!(batch.errors.len(), 1);
    assert!(batch.errors[0].starts_with("Line 3 has Error: "));
    assert!(batch.items[0].reference_plane.approx_equals(&planes[0], 1e-9, 1e-9));

    std::fs::write(&path, format!("{}\n", PlanarFace::CSV_HEADER)).unwrap();
    assert!(PlanarFace::read_csv_short(&path, 3).is_err());
    std::fs::remove_file(path).ok();
}

#[test]
fn test_obj_file() {
    let (planes, faces) = survey();
    let outcome = combine_and_map(&planes, faces, &MergeConfig::default());
    let path = temp_path("faces.obj");
    let vertices = PlanarFace::write_obj_file(&path, &outcome.groups).unwrap();
    assert_eq!(vertices, 12);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("# ")).count(), 3);
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 3);
    assert!(text.lines().any(|l| l == "f 9 10 11 12"));
    std::fs::remove_file(path).ok();
}

/// Horizontal planes on storeys one metre apart, each seen with a small
/// height error, and a unit square on every plane
fn storeys(levels: &[(u8, f64)]) -> (Vec<ReferencePlane>, Vec<PlanarFace>) {
    let planes: Vec<ReferencePlane> = levels
        .iter()
        .enumerate()
        .map(|(i, &(level, error))| {
            let position = Vector::new(0.0, 0.0, f64::from(level) + error);
            ReferencePlane::with_id(
                format!("plane_{}", i),
                ReferencePlaneKind::Plane(Plane::new(position, Direction::UNIT_Z, Some(Direction::UNIT_X))),
            )
        })
        .collect();
    let faces = planes
        .iter()
        .enumerate()
        .map(|(i, plane)| PlanarFace::new(Id::new("s", "storey", &i.to_string()), plane, rect(0.0, 0.0, 1.0, 1.0)))
        .collect();
    (planes, faces)
}

proptest! {
    #[test]
    fn prop_reference_plane_csv_round_trip(
        px in -1000.0..1000.0f64, py in -1000.0..1000.0f64, pz in -1000.0..1000.0f64,
        nx in -1.0..1.0f64, ny in -1.0..1.0f64, nz in 0.1..1.0f64,
    ) {
        let plane = ReferencePlane::from_plane(
            Plane::new(Vector::new(px, py, pz), Direction::new(nx, ny, nz), None),
            3,
        );
        let back = ReferencePlane::parse_csv_line(&plane.to_csv_line()).unwrap();
        prop_assert_eq!(back.id(), plane.id());
        prop_assert!(!back.is_stochastic());
        prop_assert_eq!(back.plane_like().position(), plane.plane_like().position());
        prop_assert!((back.plane_like().normal().dot(&plane.plane_like().normal()) - 1.0).abs() < 1e-12);
        prop_assert!((back.plane_like().plane_x().dot(&plane.plane_like().plane_x()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_merge_is_a_fixed_point(
        levels in prop::collection::vec((0u8..6, 0.0..0.0004f64), 1..16),
    ) {
        let (planes, faces) = storeys(&levels);
        let config = MergeConfig::default();
        let once = combine_and_map(&planes, faces, &config);
        prop_assert_eq!(once.report.merged_planes + once.report.output_planes, planes.len());
        prop_assert_eq!(once.faces().count(), planes.len());

        let merged: Vec<ReferencePlane> = once.planes().cloned().collect();
        let faces: Vec<PlanarFace> = once.faces().cloned().collect();
        let twice = combine_and_map(&merged, faces, &config);
        prop_assert_eq!(twice.report.merged_planes, 0);
        prop_assert_eq!(twice.report.remapped_faces, 0);
        prop_assert_eq!(twice.planes().count(), merged.len());
        prop_assert_eq!(
            twice.faces().cloned().collect::<Vec<_>>(),
            once.faces().cloned().collect::<Vec<_>>()
        );
    }
}
