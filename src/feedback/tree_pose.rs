use serde::{Deserialize, Serialize};

use crate::features::joint_angle;
use crate::feedback::{PoseEvaluator, YogaPose};
use crate::pose_landmarks::{BodyJoint, LandmarkSet};

const INTRODUCTION: [&str; 4] = [
    "Stand tall with feet together.",
    "Lift one foot and place it on the inner thigh of your opposite leg.",
    "Raise your arms overhead and bring your palms together in prayer position.",
    "Keep your body straight and balanced.",
];

const ENCOURAGEMENTS: [&str; 3] = [
    "Nice work, you are steady in tree pose.",
    "Great balance, hold your pose.",
    "Perfect alignment, keep breathing calmly.",
];

/// Distances are in normalized image units, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreePoseThresholds {
    /// max L1 distance between wrists for palms to count as joined
    pub palms_distance: f32,
    pub min_arm_angle: f32,
    pub min_standing_knee_angle: f32,
    /// min vertical gap between ankles for a foot to count as lifted
    pub min_foot_lift: f32,
    pub max_hip_tilt: f32,
    pub max_lean: f32,
}

impl Default for TreePoseThresholds {
    fn default() -> Self {
        Self {
            palms_distance: 0.08,
            min_arm_angle: 150.0,
            min_standing_knee_angle: 160.0,
            min_foot_lift: 0.07,
            max_hip_tilt: 0.12,
            max_lean: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreePoseEvaluator {
    pub thresholds: TreePoseThresholds,
}

impl TreePoseEvaluator {
    pub fn new(thresholds: TreePoseThresholds) -> Self {
        Self { thresholds }
    }
}

impl PoseEvaluator for TreePoseEvaluator {
    fn pose(&self) -> YogaPose {
        YogaPose::TreePose
    }

    fn introduction(&self) -> Vec<String> {
        INTRODUCTION.iter().map(|s| s.to_string()).collect()
    }

    fn encouragements(&self) -> &[&'static str] {
        &ENCOURAGEMENTS
    }

    fn corrections(&self, landmarks: &LandmarkSet) -> Vec<String> {
        use BodyJoint::*;

        let t = &self.thresholds;
        let p = |joint: BodyJoint| landmarks.get(joint);
        let angle = |a, b, c| joint_angle(p(a), p(b), p(c));

        let mut feedback = Vec::new();

        let wrist_distance =
            (p(LeftWrist).x - p(RightWrist).x).abs() + (p(LeftWrist).y - p(RightWrist).y).abs();
        if wrist_distance > t.palms_distance {
            feedback.push("Bring your palms together in prayer position.");
        }

        // image y grows downwards, so raised wrists sit above the nose with a smaller y
        let wrists_low = p(LeftWrist).y > p(Nose).y || p(RightWrist).y > p(Nose).y;
        let left_arm = angle(LeftShoulder, LeftElbow, LeftWrist);
        let right_arm = angle(RightShoulder, RightElbow, RightWrist);
        if wrists_low || left_arm < t.min_arm_angle || right_arm < t.min_arm_angle {
            feedback.push("Raise your arms straight above your head.");
        }

        let left_knee = angle(LeftHip, LeftKnee, LeftAnkle);
        let right_knee = angle(RightHip, RightKnee, RightAnkle);
        if left_knee.min(right_knee) < t.min_standing_knee_angle {
            feedback.push("Keep your standing leg straight.");
        }

        if (p(LeftAnkle).y - p(RightAnkle).y).abs() < t.min_foot_lift {
            feedback.push("Lift one foot and place it on your thigh.");
        }

        if (p(LeftHip).y - p(RightHip).y).abs() > t.max_hip_tilt {
            feedback.push("Balance your hips and keep them level.");
        }

        let hip_center_x = (p(LeftHip).x + p(RightHip).x) / 2.0;
        if (p(Nose).x - hip_center_x).abs() > t.max_lean {
            feedback.push("Keep your body upright and avoid leaning sideways.");
        }

        feedback.into_iter().map(String::from).collect()
    }
}
