use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbImage;
use ndarray::{Array, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, ExecutionProvider, GraphOptimizationLevel, Session, SessionBuilder, Value};
use tracing::info;

use crate::error::{LoadError, PoseError, PoseResult};
use crate::pose_landmarks::{
    DetectorConfig, Landmark, LandmarkSet, PoseLandmarksModel, POSE_LANDMARK_COUNT,
};
use crate::utils::sigmoid;

const INPUT_SIZE: u32 = 256;
// 33 body points followed by 6 auxiliary roi points, each x, y, z, visibility, presence
const RAW_VALUES_PER_POINT: usize = 5;
const RAW_POINT_COUNT: usize = 39;

/// BlazePose GHUM landmark network run on the whole frame.
pub struct BlazePoseLandmarksModel {
    pub environment: Arc<Environment>,
    pub session: Arc<Session>,
    config: DetectorConfig,
}

impl BlazePoseLandmarksModel {
    pub fn new(model_path: &Path, config: DetectorConfig) -> Result<Self, LoadError> {
        if !config.static_image_mode {
            return Err(LoadError::model(
                model_path,
                "only static image mode is supported, every frame is detected independently",
            ));
        }
        if !model_path.is_file() {
            return Err(LoadError::model(model_path, "file not found"));
        }

        let environment = Environment::builder()
            .with_name("pose_landmarks")
            .with_execution_providers([ExecutionProvider::CPU(Default::default())])
            .build()?
            .into_arc();

        let session = SessionBuilder::new(&environment)?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .with_model_from_file(model_path)?;

        if session.outputs.len() < 2 {
            return Err(LoadError::model(
                model_path,
                format!(
                    "expected landmark and presence outputs, found {}",
                    session.outputs.len()
                ),
            ));
        }

        info!(
            path = %model_path.display(),
            complexity = ?config.model_complexity,
            "loaded pose landmark model"
        );

        Ok(Self {
            environment,
            session: Arc::new(session),
            config,
        })
    }
}

/// Keeps the 33 body points of a raw `39 x 5` landmark tensor, scaling pixel
/// coordinates back to `0..1` and turning the visibility logit into a score.
pub fn decode_landmarks(raw: &[f32]) -> PoseResult<LandmarkSet> {
    if raw.len() < RAW_POINT_COUNT * RAW_VALUES_PER_POINT {
        return Err(PoseError::inference(format!(
            "landmark tensor holds {} values, expected {}",
            raw.len(),
            RAW_POINT_COUNT * RAW_VALUES_PER_POINT
        )));
    }

    let scale = INPUT_SIZE as f32;
    let points = raw
        .chunks_exact(RAW_VALUES_PER_POINT)
        .take(POSE_LANDMARK_COUNT)
        .map(|p| Landmark::new(p[0] / scale, p[1] / scale, p[2] / scale, sigmoid(p[3])))
        .collect();

    LandmarkSet::new(points)
}

pub fn pose_present(presence_logit: f32, min_detection_confidence: f32) -> bool {
    sigmoid(presence_logit) >= min_detection_confidence
}

impl PoseLandmarksModel for BlazePoseLandmarksModel {
    fn run(&self, image: &RgbImage) -> PoseResult<Option<LandmarkSet>> {
        let input = image::imageops::resize(image, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        let input_: Vec<f32> = input
            .pixels()
            .flat_map(|p| p.0)
            .map(|p| p as f32 / 255.0)
            .collect();

        let side = INPUT_SIZE as usize;
        let array: CowArray<_, _> = Array::from_shape_vec((1, side, side, 3), input_)?
            .into_dyn()
            .into();

        let inputs = vec![Value::from_array(self.session.allocator(), &array)?];
        let outputs: Vec<Value> = self.session.run(inputs)?;

        let (Some(landmarks), Some(presence)) = (outputs.first(), outputs.get(1)) else {
            return Err(PoseError::inference("landmark model returned too few outputs"));
        };

        let presence: OrtOwnedTensor<f32, _> = presence.try_extract()?;
        let presence = presence
            .view()
            .iter()
            .next()
            .copied()
            .ok_or_else(|| PoseError::inference("empty pose presence tensor"))?;

        if !pose_present(presence, self.config.min_detection_confidence) {
            return Ok(None);
        }

        let raw: OrtOwnedTensor<f32, _> = landmarks.try_extract()?;
        let raw: Vec<f32> = raw.view().iter().copied().collect();

        decode_landmarks(&raw).map(Some)
    }
}
