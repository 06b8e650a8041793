//! Runs the pose pipeline on a single image file and prints the outcome as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use prana::pose_landmarks::overlay::draw_landmarks;
use prana::{Config, PosePipeline};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    /// target pose the feedback is given for
    #[arg(long, default_value = "tree_pose")]
    pose: String,

    /// show the pose introduction instead of corrections
    #[arg(long)]
    first_time: bool,

    /// write a copy of the image with the detected skeleton drawn on it
    #[arg(long, value_name = "OUT")]
    annotate: Option<PathBuf>,

    image: PathBuf,
}

fn main() -> Result<()> {
    prana::logging::init();
    let args = Args::parse();

    let config = Config::resolve(args.config.as_deref())?;
    let pipeline = PosePipeline::from_config(&config).context("failed to load pose models")?;

    let image = image::open(&args.image)
        .with_context(|| format!("failed to open {}", args.image.display()))?;

    let (outcome, landmarks) =
        pipeline.run_pipeline_with_landmarks(&image, &args.pose, args.first_time)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let Some(out) = &args.annotate {
        let mut canvas = image.to_rgb8();
        match &landmarks {
            Some(landmarks) => draw_landmarks(&mut canvas, landmarks, 0.5),
            None => tracing::warn!("no pose to draw, writing the frame unchanged"),
        }
        canvas
            .save(out)
            .with_context(|| format!("failed to write {}", out.display()))?;
    }

    Ok(())
}
