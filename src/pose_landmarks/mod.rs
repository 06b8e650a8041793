pub mod joints;
pub mod model_blazepose;
pub mod overlay;

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use joints::BodyJoint;

use crate::error::{PoseError, PoseResult};
use crate::preprocess::{normalize_frame, PreprocessConfig};

pub const POSE_LANDMARK_COUNT: usize = BodyJoint::COUNT;
pub const VALUES_PER_LANDMARK: usize = 4;

/// One body keypoint. `x` and `y` are normalized to the image plane but may
/// fall outside `[0, 1]` when the joint is out of frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }
}

/// A complete, ordered set of body landmarks for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> PoseResult<Self> {
        if points.len() != POSE_LANDMARK_COUNT {
            return Err(PoseError::LandmarkCount {
                expected: POSE_LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn get(&self, joint: BodyJoint) -> &Landmark {
        // length is fixed at construction so every joint index is present
        &self.points[joint.index()]
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[x0, y0, z0, v0, x1, ...]` in landmark order.
    pub fn flatten(&self) -> Vec<f32> {
        self.points
            .iter()
            .flat_map(|p| [p.x, p.y, p.z, p.visibility])
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite,
    Full,
    #[default]
    Heavy,
}

impl ModelComplexity {
    pub fn model_file_name(self) -> &'static str {
        match self {
            ModelComplexity::Lite => "pose_landmark_lite.onnx",
            ModelComplexity::Full => "pose_landmark_full.onnx",
            ModelComplexity::Heavy => "pose_landmark_heavy.onnx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub static_image_mode: bool,
    pub model_complexity: ModelComplexity,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub intra_threads: i16,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            static_image_mode: true,
            model_complexity: ModelComplexity::Heavy,
            min_detection_confidence: 0.3,
            min_tracking_confidence: 0.3,
            intra_threads: 4,
        }
    }
}

// a body keypoint detector, fed with an already normalized frame
pub trait PoseLandmarksModel: Send + Sync {
    fn run(&self, image: &RgbImage) -> PoseResult<Option<LandmarkSet>>;
}

/// Normalizes frames and hands them to a keypoint detector.
pub struct LandmarkExtractor {
    preprocess: PreprocessConfig,
    model: Box<dyn PoseLandmarksModel>,
}

impl LandmarkExtractor {
    pub fn new(preprocess: PreprocessConfig, model: Box<dyn PoseLandmarksModel>) -> Self {
        Self { preprocess, model }
    }

    pub fn extract(&self, image: &DynamicImage) -> PoseResult<Option<LandmarkSet>> {
        let frame = normalize_frame(image, &self.preprocess);
        let landmarks = self.model.run(&frame)?;

        match &landmarks {
            Some(set) => {
                let nose = set.get(BodyJoint::Nose);
                info!(
                    nose_x = nose.x,
                    nose_y = nose.y,
                    nose_visibility = nose.visibility,
                    "pose landmarks detected"
                );
            }
            None => debug!(
                width = image.width(),
                height = image.height(),
                "no pose landmarks detected"
            ),
        }

        Ok(landmarks)
    }
}
