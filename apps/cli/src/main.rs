// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIMSCAN command line tool.
//!
//! # Commands
//!
//! - `merge` - fold near-duplicate reference planes and rewrite the faces
//! - `obj` - export planar faces as Wavefront OBJ
//! - `check` - parse a face file and list the unreadable lines

use anyhow::{bail, Context, Result};
use bimscan_processing::{
    combine_and_map, group_by_plane, CsvBatch, MergeConfig, PlanarFace, PlanarFaceStochastic, ReferencePlane,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bimscan", version)]
#[command(about = "Reference plane merging and planar face export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge near-duplicate reference planes
    Merge {
        #[arg(long)]
        planes: PathBuf,
        #[arg(long)]
        faces: PathBuf,
        #[arg(long)]
        out_planes: PathBuf,
        #[arg(long)]
        out_faces: PathBuf,
        /// Also write the merged faces as OBJ
        #[arg(long)]
        obj: Option<PathBuf>,
        /// Write the merge report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        /// Override BIMSCAN_MAX_DIST
        #[arg(long)]
        max_dist: Option<f64>,
    },
    /// Export planar faces as Wavefront OBJ
    Obj {
        #[arg(long)]
        planes: PathBuf,
        #[arg(long)]
        faces: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Parse a face file and list unreadable lines
    Check {
        #[arg(long)]
        faces: PathBuf,
        /// Faces in the short form, planes derived from the polygons
        #[arg(long, conflicts_with = "stochastic")]
        short: bool,
        /// Face covariance records
        #[arg(long)]
        stochastic: bool,
    },
}

fn main() -> Result<()> {
    let config = Config::from_env();
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bimscan=debug".into());
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let cli = Cli::parse();
    match cli.command {
        Command::Merge {
            planes,
            faces,
            out_planes,
            out_faces,
            obj,
            report,
            max_dist,
        } => {
            let mut merge = config.merge;
            if let Some(max_dist) = max_dist {
                merge.max_dist = max_dist;
            }
            let paths = MergePaths {
                planes,
                faces,
                out_planes,
                out_faces,
                obj,
                report,
            };
            merge_files(&paths, &merge)
        }
        Command::Obj { planes, faces, out } => export_obj(&planes, &faces, &out),
        Command::Check {
            faces,
            short,
            stochastic,
        } => check(&faces, short, stochastic, config.merge.id_digits),
    }
}

struct MergePaths {
    planes: PathBuf,
    faces: PathBuf,
    out_planes: PathBuf,
    out_faces: PathBuf,
    obj: Option<PathBuf>,
    report: Option<PathBuf>,
}

fn report_errors<T>(path: &Path, batch: &CsvBatch<T>) {
    for error in &batch.errors {
        tracing::warn!(path = %path.display(), "{}", error);
    }
}

fn read_inputs(planes: &Path, faces: &Path) -> Result<(Vec<ReferencePlane>, Vec<PlanarFace>)> {
    let plane_batch =
        ReferencePlane::read_csv(planes).with_context(|| format!("reading {}", planes.display()))?;
    report_errors(planes, &plane_batch);
    let face_batch = PlanarFace::read_csv(faces).with_context(|| format!("reading {}", faces.display()))?;
    report_errors(faces, &face_batch);
    Ok((plane_batch.items, face_batch.items))
}

fn merge_files(paths: &MergePaths, config: &MergeConfig) -> Result<()> {
    tracing::info!(
        max_dist = config.max_dist,
        max_cos_one = config.max_cos_one,
        "Starting merge"
    );
    let (planes, faces) = read_inputs(&paths.planes, &paths.faces)?;
    let outcome = combine_and_map(&planes, faces, config);

    ReferencePlane::write_csv(&paths.out_planes, outcome.planes())?;
    PlanarFace::write_csv(&paths.out_faces, outcome.faces())?;
    if let Some(obj) = &paths.obj {
        PlanarFace::write_obj_file(obj, &outcome.groups)?;
    }
    if let Some(report) = &paths.report {
        std::fs::write(report, outcome.report.to_json()?)
            .with_context(|| format!("writing {}", report.display()))?;
    }

    tracing::info!(
        output_planes = outcome.report.output_planes,
        orphan_faces = outcome.report.orphan_faces,
        "Merge finished"
    );
    Ok(())
}

fn export_obj(planes: &Path, faces: &Path, out: &Path) -> Result<()> {
    let (planes, faces) = read_inputs(planes, faces)?;
    let (groups, orphans) = group_by_plane(&planes, faces);
    for face in &orphans {
        tracing::warn!(face = %face.id(), plane = face.reference_plane_id(), "Face refers to an unknown plane");
    }
    PlanarFace::write_obj_file(out, &groups)?;
    Ok(())
}

fn check(path: &Path, short: bool, stochastic: bool, digits: usize) -> Result<()> {
    let (records, errors) = if short {
        let batch = PlanarFace::read_csv_short(path, digits)?;
        let worst = batch
            .items
            .iter()
            .map(|derived| derived.max_plane_dist)
            .fold(0.0, f64::max);
        tracing::info!(max_plane_dist = worst, "Fitted planes");
        (batch.items.len(), batch.errors)
    } else if stochastic {
        let batch = PlanarFaceStochastic::read_csv(path)?;
        (batch.items.len(), batch.errors)
    } else {
        let batch = PlanarFace::read_csv(path)?;
        (batch.items.len(), batch.errors)
    };

    println!("{}: {} readable records", path.display(), records);
    for error in &errors {
        println!("{}", error);
    }
    if !errors.is_empty() {
        bail!("{} unreadable lines in {}", errors.len(), path.display());
    }
    Ok(())
}
