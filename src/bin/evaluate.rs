//! Offline accuracy report for the pose classifier.
//!
//! Reads an `(N, 138)` f32 feature matrix and an `(N,)` integer label vector
//! from `.npy` files and prints overall and per-class accuracy as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ndarray::{Array1, Array2};
use ndarray_npy::read_npy;
use tracing::info;

use prana::pose_classification::PoseClassifier;
use prana::Config;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    features: PathBuf,

    labels: PathBuf,
}

fn main() -> Result<()> {
    prana::logging::init();
    let args = Args::parse();

    let config = Config::resolve(args.config.as_deref())?;

    let features: Array2<f32> = read_npy(&args.features)
        .with_context(|| format!("failed to read {}", args.features.display()))?;
    let labels: Array1<i64> = read_npy(&args.labels)
        .with_context(|| format!("failed to read {}", args.labels.display()))?;

    if features.nrows() != labels.len() {
        bail!(
            "{} feature rows but {} labels",
            features.nrows(),
            labels.len()
        );
    }

    let expected = labels
        .iter()
        .map(|&label| usize::try_from(label).with_context(|| format!("negative label {label}")))
        .collect::<Result<Vec<_>>>()?;
    let rows: Vec<Vec<f32>> = features.outer_iter().map(|row| row.to_vec()).collect();

    let classifier = PoseClassifier::load(
        &config.models.classifier,
        &config.models.label_map,
        config.detector.intra_threads,
    )?;
    info!(samples = rows.len(), "evaluating classifier");

    let report = classifier.evaluate(&rows, &expected);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
