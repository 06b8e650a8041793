pub mod tree_pose;

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pose_landmarks::LandmarkSet;

pub use tree_pose::{TreePoseEvaluator, TreePoseThresholds};

/// Poses the coaching engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YogaPose {
    TreePose,
}

impl YogaPose {
    pub const ALL: [YogaPose; 1] = [YogaPose::TreePose];

    /// Matches a pose name case-insensitively, ignoring `_`, `-` and spaces,
    /// so `Tree_Pose`, `treepose` and `tree pose` are the same pose.
    pub fn parse(name: &str) -> Option<Self> {
        let key = normalize(name);
        Self::ALL.into_iter().find(|pose| normalize(pose.label()) == key)
    }

    /// Label as it appears in the classifier's label map.
    pub fn label(self) -> &'static str {
        match self {
            YogaPose::TreePose => "tree_pose",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            YogaPose::TreePose => "tree pose",
        }
    }
}

impl fmt::Display for YogaPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pose-specific coaching rules. A new pose gets a [`YogaPose`] variant and an
/// evaluator registered with [`FeedbackEngine::register`].
pub trait PoseEvaluator: Send + Sync {
    fn pose(&self) -> YogaPose;

    /// Step-by-step instructions shown the first time a user attempts the pose.
    fn introduction(&self) -> Vec<String>;

    /// Geometric corrections for a detected body, in rule order. Empty when
    /// the pose is held correctly.
    fn corrections(&self, landmarks: &LandmarkSet) -> Vec<String>;

    /// Encouragements to pick from when no correction applies.
    fn encouragements(&self) -> &[&'static str];

    fn move_into(&self) -> String {
        format!("Please move into the {}.", self.pose().display_name())
    }
}

/// Chooses which encouragement to show.
pub trait ReinforcementPicker: Send + Sync {
    /// Returns an index below `len`; `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl ReinforcementPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same position, wrapping around short pools.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl ReinforcementPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub struct FeedbackEngine {
    evaluators: HashMap<YogaPose, Box<dyn PoseEvaluator>>,
    picker: Box<dyn ReinforcementPicker>,
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self::with_default_poses(Box::new(RandomPicker))
    }
}

impl FeedbackEngine {
    /// An engine with no poses registered.
    pub fn new(picker: Box<dyn ReinforcementPicker>) -> Self {
        Self {
            evaluators: HashMap::new(),
            picker,
        }
    }

    pub fn with_default_poses(picker: Box<dyn ReinforcementPicker>) -> Self {
        let mut engine = Self::new(picker);
        engine.register(Box::new(TreePoseEvaluator::default()));
        engine
    }

    /// Adds an evaluator, replacing any previous one for the same pose.
    pub fn register(&mut self, evaluator: Box<dyn PoseEvaluator>) {
        self.evaluators.insert(evaluator.pose(), evaluator);
    }

    pub fn supports(&self, pose: YogaPose) -> bool {
        self.evaluators.contains_key(&pose)
    }

    pub fn feedback(
        &self,
        predicted_label: &str,
        landmarks: &LandmarkSet,
        target_pose: &str,
        is_first_interaction: bool,
    ) -> Vec<String> {
        let Some(evaluator) = YogaPose::parse(target_pose).and_then(|p| self.evaluators.get(&p))
        else {
            return vec![format!("No feedback logic for {target_pose}.")];
        };

        if is_first_interaction {
            return evaluator.introduction();
        }

        if YogaPose::parse(predicted_label) != Some(evaluator.pose()) {
            debug!(predicted_label, target = %evaluator.pose(), "predicted pose differs from target");
            return vec![evaluator.move_into()];
        }

        let corrections = evaluator.corrections(landmarks);
        if !corrections.is_empty() {
            return corrections;
        }

        let pool = evaluator.encouragements();
        if pool.is_empty() {
            return Vec::new();
        }
        let choice = self.picker.pick(pool.len()).min(pool.len() - 1);
        vec![pool[choice].to_owned()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose_landmarks::Landmark;

    #[test]
    fn pose_names_are_normalized() {
        for name in ["tree_pose", "Tree_Pose", "treepose", "tree pose", "TREE-POSE"] {
            assert_eq!(YogaPose::parse(name), Some(YogaPose::TreePose), "{name}");
        }
        assert_eq!(YogaPose::parse("warrior_pose"), None);
        assert_eq!(YogaPose::parse(""), None);
    }

    #[test]
    fn fixed_picker_wraps() {
        assert_eq!(FixedPicker(1).pick(3), 1);
        assert_eq!(FixedPicker(4).pick(3), 1);
    }

    #[test]
    fn random_picker_stays_in_range() {
        for _ in 0..100 {
            assert!(RandomPicker.pick(3) < 3);
        }
    }

    // a gentler tree pose variant that never corrects
    struct BeginnerTreePose;

    impl PoseEvaluator for BeginnerTreePose {
        fn pose(&self) -> YogaPose {
            YogaPose::TreePose
        }

        fn introduction(&self) -> Vec<String> {
            vec!["Rest your foot on your ankle.".into()]
        }

        fn corrections(&self, _landmarks: &LandmarkSet) -> Vec<String> {
            Vec::new()
        }

        fn encouragements(&self) -> &[&'static str] {
            &["Steady and calm."]
        }
    }

    #[test]
    fn empty_engine_has_no_feedback_logic() {
        let set = LandmarkSet::new(vec![Landmark::default(); 33]).unwrap();
        let engine = FeedbackEngine::new(Box::new(FixedPicker(0)));
        assert!(!engine.supports(YogaPose::TreePose));
        assert_eq!(
            engine.feedback("tree_pose", &set, "tree_pose", false),
            vec!["No feedback logic for tree_pose.".to_string()]
        );
    }

    #[test]
    fn registering_replaces_evaluator_for_pose() {
        let set = LandmarkSet::new(vec![Landmark::default(); 33]).unwrap();
        let mut engine = FeedbackEngine::with_default_poses(Box::new(FixedPicker(0)));
        assert_eq!(engine.feedback("tree_pose", &set, "tree_pose", true).len(), 4);

        engine.register(Box::new(BeginnerTreePose));
        assert!(engine.supports(YogaPose::TreePose));
        assert_eq!(
            engine.feedback("tree_pose", &set, "tree_pose", true),
            vec!["Rest your foot on your ankle.".to_string()]
        );
        assert_eq!(
            engine.feedback("tree_pose", &set, "tree_pose", false),
            vec!["Steady and calm.".to_string()]
        );
    }
}
