use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback::TreePoseThresholds;
use crate::pose_landmarks::DetectorConfig;
use crate::preprocess::PreprocessConfig;

pub const DEFAULT_CONFIG_FILE: &str = "prana.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub models: ModelPaths,
    pub detector: DetectorConfig,
    pub preprocess: PreprocessConfig,
    pub tree_pose: TreePoseThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub inference_timeout_secs: u64,
    pub max_body_bytes: usize,
    /// (user, pose) pairs remembered as introduced before the oldest is dropped
    pub max_tracked_users: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            inference_timeout_secs: 10,
            max_body_bytes: 16 * 1024 * 1024,
            max_tracked_users: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    /// directory holding `pose_landmark_{lite,full,heavy}.onnx`
    pub landmark_dir: PathBuf,
    pub classifier: PathBuf,
    pub label_map: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            landmark_dir: PathBuf::from("models"),
            classifier: PathBuf::from("models/yoga_pose_classifier.onnx"),
            label_map: PathBuf::from("models/yoga_poses_classes.json"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Loads `path` when given, else `prana.toml` in the working directory
    /// when present, else the built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn landmark_model_path(&self) -> PathBuf {
        self.models
            .landmark_dir
            .join(self.detector.model_complexity.model_file_name())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose_landmarks::ModelComplexity;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert!(config.detector.static_image_mode);
        assert_eq!(config.detector.model_complexity, ModelComplexity::Heavy);
        assert_eq!(config.detector.min_detection_confidence, 0.3);
        assert_eq!(config.preprocess.canonical_width, 640);
        assert_eq!(
            config.landmark_model_path(),
            PathBuf::from("models/pose_landmark_heavy.onnx")
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prana.toml");
        fs::write(
            &path,
            r#"
[server]
port = 8080

[detector]
model_complexity = "lite"

[tree_pose]
max_lean = 0.2
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.inference_timeout_secs, 10);
        assert_eq!(config.detector.model_complexity, ModelComplexity::Lite);
        assert_eq!(config.tree_pose.max_lean, 0.2);
        assert_eq!(config.tree_pose.palms_distance, 0.08);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prana.toml");
        let mut config = Config::default();
        config.models.classifier = PathBuf::from("/srv/models/classifier.onnx");
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn example_file_matches_defaults() {
        let example: Config = toml::from_str(include_str!("../prana.example.toml")).unwrap();
        assert_eq!(example, Config::default());
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[server]\nport = 9000\n").unwrap();
        assert_eq!(Config::resolve(Some(&path)).unwrap().server.port, 9000);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/prana.toml")).is_err());
    }
}
