pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod feedback;
pub mod logging;
pub mod pipeline;
pub mod pose_classification;
pub mod pose_landmarks;
pub mod preprocess;
pub mod utils;
pub mod wellness;

pub use config::Config;
pub use error::{LoadError, PoseError, PoseResult};
pub use pipeline::{PipelineOutcome, PosePipeline};
