use std::path::PathBuf;

use thiserror::Error;

pub type PoseResult<T> = Result<T, PoseError>;

/// Errors raised while processing a single frame.
#[derive(Debug, Error)]
pub enum PoseError {
    #[error("landmark set must hold {expected} points, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("cannot compute {joint} angle: landmark {index} is missing")]
    AngleComputation { joint: &'static str, index: usize },

    #[error("feature vector has {actual} values but the classifier expects {expected}")]
    FeatureDimensionMismatch { expected: usize, actual: usize },

    #[error("classifier selected class {0} which is not in the label map")]
    UnknownClass(usize),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error(transparent)]
    Ort(#[from] ort::OrtError),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

impl PoseError {
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}

/// Errors raised while loading model artifacts at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("label map {path} is not valid: {source}")]
    LabelMap {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("label map key {0:?} is not a class index")]
    LabelKey(String),

    #[error("label map holds no classes")]
    EmptyLabelMap,

    #[error("model {path} is unusable: {reason}")]
    Model { path: PathBuf, reason: String },

    #[error(transparent)]
    Ort(#[from] ort::OrtError),
}

impl LoadError {
    pub fn model(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Model {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
