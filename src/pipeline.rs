use image::DynamicImage;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{LoadError, PoseResult};
use crate::features::{build_feature_vector, FEATURE_VECTOR_LEN};
use crate::feedback::{FeedbackEngine, RandomPicker, TreePoseEvaluator};
use crate::pose_classification::PoseClassifier;
use crate::pose_landmarks::model_blazepose::BlazePoseLandmarksModel;
use crate::pose_landmarks::{LandmarkExtractor, LandmarkSet};

pub const NO_POSE_LABEL: &str = "no_pose_detected";
pub const NO_POSE_FEEDBACK: &str = "No human pose detected.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub pose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub feedback: Vec<String>,
}

impl PipelineOutcome {
    fn no_pose() -> Self {
        Self {
            pose: NO_POSE_LABEL.to_owned(),
            confidence: None,
            feedback: vec![NO_POSE_FEEDBACK.to_owned()],
        }
    }
}

/// Frame to feedback: landmarks, features, classification, coaching.
///
/// Built once at startup and shared read-only between requests.
pub struct PosePipeline {
    extractor: LandmarkExtractor,
    classifier: PoseClassifier,
    feedback: FeedbackEngine,
}

impl PosePipeline {
    pub fn new(
        extractor: LandmarkExtractor,
        classifier: PoseClassifier,
        feedback: FeedbackEngine,
    ) -> Self {
        if classifier.input_dim() != FEATURE_VECTOR_LEN {
            warn!(
                classifier = classifier.input_dim(),
                features = FEATURE_VECTOR_LEN,
                "classifier width does not match the feature vector, every frame will fail"
            );
        }
        Self {
            extractor,
            classifier,
            feedback,
        }
    }

    /// Loads every model artifact named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        let landmark_path = config.landmark_model_path();
        let landmarks = BlazePoseLandmarksModel::new(&landmark_path, config.detector.clone())?;
        let extractor = LandmarkExtractor::new(config.preprocess.clone(), Box::new(landmarks));

        let classifier = PoseClassifier::load(
            &config.models.classifier,
            &config.models.label_map,
            config.detector.intra_threads,
        )?;

        let mut feedback = FeedbackEngine::new(Box::new(RandomPicker));
        feedback.register(Box::new(TreePoseEvaluator::new(config.tree_pose.clone())));

        Ok(Self::new(extractor, classifier, feedback))
    }

    pub fn classifier(&self) -> &PoseClassifier {
        &self.classifier
    }

    pub fn feedback_engine(&self) -> &FeedbackEngine {
        &self.feedback
    }

    pub fn run_pipeline(
        &self,
        image: &DynamicImage,
        target_pose: &str,
        is_first_interaction: bool,
    ) -> PoseResult<PipelineOutcome> {
        self.run_pipeline_with_landmarks(image, target_pose, is_first_interaction)
            .map(|(outcome, _)| outcome)
    }

    /// Like [`Self::run_pipeline`], also handing back the detected landmarks.
    pub fn run_pipeline_with_landmarks(
        &self,
        image: &DynamicImage,
        target_pose: &str,
        is_first_interaction: bool,
    ) -> PoseResult<(PipelineOutcome, Option<LandmarkSet>)> {
        let Some(landmarks) = self.extractor.extract(image)? else {
            return Ok((PipelineOutcome::no_pose(), None));
        };

        let features = build_feature_vector(&landmarks)?;
        let prediction = self.classifier.predict(&features)?;

        let feedback = self.feedback.feedback(
            &prediction.label,
            &landmarks,
            target_pose,
            is_first_interaction,
        );

        info!(
            predicted = %prediction.label,
            confidence = prediction.confidence,
            target_pose,
            items = feedback.len(),
            "frame evaluated"
        );

        let outcome = PipelineOutcome {
            pose: prediction.label,
            confidence: Some(prediction.confidence),
            feedback,
        };
        Ok((outcome, Some(landmarks)))
    }
}
