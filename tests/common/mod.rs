#![allow(dead_code)]

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use parking_lot::Mutex;

use prana::feedback::{FeedbackEngine, FixedPicker};
use prana::pose_classification::{LabelMap, PoseClassificationModel, PoseClassifier};
use prana::pose_landmarks::joints::BodyJoint;
use prana::pose_landmarks::{Landmark, LandmarkExtractor, LandmarkSet, PoseLandmarksModel};
use prana::preprocess::PreprocessConfig;
use prana::{PoseResult, PosePipeline};

/// Returns the same detection for every frame.
pub struct FixedDetector(pub Option<LandmarkSet>);

impl PoseLandmarksModel for FixedDetector {
    fn run(&self, _image: &RgbImage) -> PoseResult<Option<LandmarkSet>> {
        Ok(self.0.clone())
    }
}

/// Replays detections in order, then reports no pose.
pub struct ScriptedDetector(pub Mutex<VecDeque<Option<LandmarkSet>>>);

impl ScriptedDetector {
    pub fn new(detections: impl IntoIterator<Item = Option<LandmarkSet>>) -> Self {
        Self(Mutex::new(detections.into_iter().collect()))
    }
}

impl PoseLandmarksModel for ScriptedDetector {
    fn run(&self, _image: &RgbImage) -> PoseResult<Option<LandmarkSet>> {
        Ok(self.0.lock().pop_front().flatten())
    }
}

/// Always scores class `winner` highest.
pub struct FixedClassifier {
    pub input_dim: usize,
    pub winner: usize,
}

impl PoseClassificationModel for FixedClassifier {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn probabilities(&self, _features: &[f32]) -> PoseResult<Vec<f32>> {
        let mut scores = vec![0.05; 2];
        scores[self.winner] = 0.95;
        Ok(scores)
    }
}

pub fn labels() -> LabelMap {
    LabelMap::new(BTreeMap::from([
        (0, "warrior_pose".to_string()),
        (1, "tree_pose".to_string()),
    ]))
    .unwrap()
}

/// Standing on the right leg, left foot raised, palms joined overhead.
pub fn balanced_tree() -> LandmarkSet {
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0, 1.0); 33];
    let placements = [
        (BodyJoint::Nose, 0.5, 0.2),
        (BodyJoint::LeftShoulder, 0.42, 0.3),
        (BodyJoint::RightShoulder, 0.58, 0.3),
        (BodyJoint::LeftElbow, 0.46, 0.2),
        (BodyJoint::RightElbow, 0.54, 0.2),
        (BodyJoint::LeftWrist, 0.49, 0.1),
        (BodyJoint::RightWrist, 0.51, 0.1),
        (BodyJoint::LeftHip, 0.45, 0.55),
        (BodyJoint::RightHip, 0.55, 0.55),
        (BodyJoint::LeftKnee, 0.45, 0.65),
        (BodyJoint::LeftAnkle, 0.45, 0.75),
        (BodyJoint::RightKnee, 0.55, 0.72),
        (BodyJoint::RightAnkle, 0.55, 0.9),
    ];
    for (joint, x, y) in placements {
        points[joint.index()] = Landmark::new(x, y, 0.0, 1.0);
    }
    LandmarkSet::new(points).unwrap()
}

pub fn pipeline(detection: Option<LandmarkSet>, input_dim: usize, winner: usize) -> PosePipeline {
    pipeline_with(Box::new(FixedDetector(detection)), input_dim, winner)
}

pub fn pipeline_with(
    detector: Box<dyn PoseLandmarksModel>,
    input_dim: usize,
    winner: usize,
) -> PosePipeline {
    let extractor = LandmarkExtractor::new(PreprocessConfig::default(), detector);
    let classifier = PoseClassifier::new(Box::new(FixedClassifier { input_dim, winner }), labels());
    PosePipeline::new(
        extractor,
        classifier,
        FeedbackEngine::with_default_poses(Box::new(FixedPicker(0))),
    )
}

pub fn frame() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, image::Rgb([90, 90, 90])))
}

pub fn frame_base64() -> String {
    let mut bytes = Cursor::new(Vec::new());
    frame().write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
    STANDARD.encode(bytes.into_inner())
}
