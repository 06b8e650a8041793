use std::path::Path;
use std::sync::Arc;

use ndarray::{Array, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, ExecutionProvider, Session, SessionBuilder, Value};

use crate::error::{LoadError, PoseError, PoseResult};
use crate::pose_classification::PoseClassificationModel;

/// Dense classifier exported to ONNX, taking a `(1, input_dim)` float tensor
/// and returning softmax probabilities.
pub struct OnnxPoseClassificationModel {
    pub environment: Arc<Environment>,
    pub session: Arc<Session>,
    input_dim: usize,
}

impl OnnxPoseClassificationModel {
    pub fn new(model_path: &Path, intra_threads: i16) -> Result<Self, LoadError> {
        if !model_path.is_file() {
            return Err(LoadError::model(model_path, "file not found"));
        }

        let environment = Environment::builder()
            .with_name("pose_classifier")
            .with_execution_providers([ExecutionProvider::CPU(Default::default())])
            .build()?
            .into_arc();

        let session = SessionBuilder::new(&environment)?
            .with_intra_threads(intra_threads)?
            .with_model_from_file(model_path)?;

        // the batch axis may be dynamic, the feature axis may not
        let input_dim = session
            .inputs
            .first()
            .and_then(|input| input.dimensions().last().flatten())
            .ok_or_else(|| LoadError::model(model_path, "input feature width is not fixed"))?;

        Ok(Self {
            environment,
            session: Arc::new(session),
            input_dim,
        })
    }
}

impl PoseClassificationModel for OnnxPoseClassificationModel {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn probabilities(&self, features: &[f32]) -> PoseResult<Vec<f32>> {
        let array: CowArray<_, _> = Array::from_shape_vec((1, features.len()), features.to_vec())?
            .into_dyn()
            .into();

        let inputs = vec![Value::from_array(self.session.allocator(), &array)?];
        let outputs: Vec<Value> = self.session.run(inputs)?;

        let scores = outputs
            .first()
            .ok_or_else(|| PoseError::inference("classifier produced no output"))?;
        let scores: OrtOwnedTensor<f32, _> = scores.try_extract()?;
        let scores = scores.view().iter().copied().collect();
        Ok(scores)
    }
}
