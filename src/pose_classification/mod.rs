pub mod model_onnx;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LoadError, PoseError, PoseResult};
use crate::utils::argmax;

use self::model_onnx::OnnxPoseClassificationModel;

/// A pretrained classifier mapping a feature vector to class probabilities.
pub trait PoseClassificationModel: Send + Sync {
    /// Width of the feature vector the model was trained on.
    fn input_dim(&self) -> usize;

    /// One probability per class, in class index order.
    fn probabilities(&self, features: &[f32]) -> PoseResult<Vec<f32>>;
}

/// Class index to pose label, read from a JSON object such as
/// `{"0": "tree_pose", "1": "warrior_pose"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    labels: BTreeMap<usize, String>,
}

impl LabelMap {
    pub fn new(labels: BTreeMap<usize, String>) -> Result<Self, LoadError> {
        if labels.is_empty() {
            return Err(LoadError::EmptyLabelMap);
        }
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&text).map_err(|source| LoadError::LabelMap {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, String>) -> Result<Self, LoadError> {
        let labels = raw
            .into_iter()
            .map(|(key, label)| {
                key.trim()
                    .parse::<usize>()
                    .map(|index| (index, label))
                    .map_err(|_| LoadError::LabelKey(key))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Self::new(labels)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(|(i, l)| (*i, l.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub class_index: usize,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAccuracy {
    pub label: String,
    pub samples: usize,
    pub correct: usize,
    pub accuracy: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub overall_accuracy: f32,
    pub per_class_accuracy: BTreeMap<usize, ClassAccuracy>,
    pub evaluated: usize,
    /// samples the classifier could not score at all
    pub failed: usize,
}

pub struct PoseClassifier {
    model: Box<dyn PoseClassificationModel>,
    labels: LabelMap,
}

impl PoseClassifier {
    pub fn new(model: Box<dyn PoseClassificationModel>, labels: LabelMap) -> Self {
        Self { model, labels }
    }

    /// Loads the ONNX classifier and its label map.
    pub fn load(model_path: &Path, label_map_path: &Path, intra_threads: i16) -> Result<Self, LoadError> {
        let model = OnnxPoseClassificationModel::new(model_path, intra_threads)?;
        let labels = LabelMap::load(label_map_path)?;
        info!(
            classes = labels.len(),
            input_dim = model.input_dim(),
            "loaded pose classifier"
        );
        Ok(Self::new(Box::new(model), labels))
    }

    pub fn input_dim(&self) -> usize {
        self.model.input_dim()
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn predict(&self, features: &[f32]) -> PoseResult<Prediction> {
        let expected = self.model.input_dim();
        if features.len() != expected {
            return Err(PoseError::FeatureDimensionMismatch {
                expected,
                actual: features.len(),
            });
        }

        let probabilities = self.model.probabilities(features)?;
        let class_index = argmax(&probabilities)
            .ok_or_else(|| PoseError::inference("classifier returned no scores"))?;
        let label = self
            .labels
            .get(class_index)
            .ok_or(PoseError::UnknownClass(class_index))?;

        let prediction = Prediction {
            label: label.to_owned(),
            class_index,
            confidence: probabilities[class_index],
        };
        debug!(label = %prediction.label, confidence = prediction.confidence, "pose classified");
        Ok(prediction)
    }

    pub fn predict_batch(&self, batch: &[Vec<f32>]) -> Vec<PoseResult<Prediction>> {
        batch.par_iter().map(|features| self.predict(features)).collect()
    }

    /// Scores the classifier against known class indices.
    pub fn evaluate(&self, features: &[Vec<f32>], expected: &[usize]) -> EvaluationReport {
        let predictions = self.predict_batch(features);

        let mut per_class: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
        let mut correct = 0;
        let mut failed = 0;

        for (prediction, &truth) in predictions.iter().zip(expected) {
            let entry = per_class.entry(truth).or_default();
            entry.0 += 1;
            match prediction {
                Ok(p) if p.class_index == truth => {
                    entry.1 += 1;
                    correct += 1;
                }
                Ok(_) => {}
                Err(_) => failed += 1,
            }
        }

        let evaluated = predictions.len().min(expected.len());
        let per_class_accuracy = per_class
            .into_iter()
            .map(|(index, (samples, hits))| {
                let label = self
                    .labels
                    .get(index)
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("class_{index}"));
                let accuracy = ClassAccuracy {
                    label,
                    samples,
                    correct: hits,
                    accuracy: ratio(hits, samples),
                };
                (index, accuracy)
            })
            .collect();

        EvaluationReport {
            overall_accuracy: ratio(correct, evaluated),
            per_class_accuracy,
            evaluated,
            failed,
        }
    }
}

fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}
