//! Hybrid feature vector: every landmark flattened, followed by six joint angles.

use nalgebra::Vector2;

use crate::error::{PoseError, PoseResult};
use crate::pose_landmarks::{BodyJoint, Landmark, LandmarkSet, POSE_LANDMARK_COUNT};

const ANGLE_EPSILON: f64 = 1e-6;

/// An angle measured at `vertex` between the rays towards `a` and `c`.
#[derive(Debug, Clone, Copy)]
pub struct JointAngle {
    pub name: &'static str,
    pub a: BodyJoint,
    pub vertex: BodyJoint,
    pub c: BodyJoint,
}

pub const JOINT_ANGLES: [JointAngle; 6] = [
    JointAngle {
        name: "left_elbow",
        a: BodyJoint::LeftShoulder,
        vertex: BodyJoint::LeftElbow,
        c: BodyJoint::LeftWrist,
    },
    JointAngle {
        name: "right_elbow",
        a: BodyJoint::RightShoulder,
        vertex: BodyJoint::RightElbow,
        c: BodyJoint::RightWrist,
    },
    JointAngle {
        name: "left_knee",
        a: BodyJoint::LeftHip,
        vertex: BodyJoint::LeftKnee,
        c: BodyJoint::LeftAnkle,
    },
    JointAngle {
        name: "right_knee",
        a: BodyJoint::RightHip,
        vertex: BodyJoint::RightKnee,
        c: BodyJoint::RightAnkle,
    },
    JointAngle {
        name: "left_hip",
        a: BodyJoint::LeftShoulder,
        vertex: BodyJoint::LeftHip,
        c: BodyJoint::LeftKnee,
    },
    JointAngle {
        name: "right_hip",
        a: BodyJoint::RightShoulder,
        vertex: BodyJoint::RightHip,
        c: BodyJoint::RightKnee,
    },
];

pub const FEATURE_VECTOR_LEN: usize = 4 * POSE_LANDMARK_COUNT + JOINT_ANGLES.len();

/// Planar angle in degrees at `b`, ignoring depth. Degenerate rays give 90.
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let ba = Vector2::new(a.x as f64 - b.x as f64, a.y as f64 - b.y as f64);
    let bc = Vector2::new(c.x as f64 - b.x as f64, c.y as f64 - b.y as f64);

    let cosine = ba.dot(&bc) / (ba.norm() * bc.norm() + ANGLE_EPSILON);
    cosine.clamp(-1.0, 1.0).acos().to_degrees() as f32
}

pub fn build_feature_vector(landmarks: &LandmarkSet) -> PoseResult<Vec<f32>> {
    build_feature_vector_from_slice(landmarks.points())
}

/// Same layout as [`build_feature_vector`] for an unchecked slice, e.g. rows
/// read back from a dataset. Fails when an angle needs a point the slice lacks.
pub fn build_feature_vector_from_slice(points: &[Landmark]) -> PoseResult<Vec<f32>> {
    let angles = joint_angles(points)?;

    let mut features = Vec::with_capacity(4 * points.len() + angles.len());
    for p in points {
        features.extend_from_slice(&[p.x, p.y, p.z, p.visibility]);
    }
    features.extend_from_slice(&angles);
    Ok(features)
}

pub fn joint_angles(points: &[Landmark]) -> PoseResult<[f32; 6]> {
    let mut angles = [0.0; 6];
    for (slot, angle) in angles.iter_mut().zip(JOINT_ANGLES.iter()) {
        let lookup = |joint: BodyJoint| {
            points.get(joint.index()).ok_or(PoseError::AngleComputation {
                joint: angle.name,
                index: joint.index(),
            })
        };
        *slot = joint_angle(lookup(angle.a)?, lookup(angle.vertex)?, lookup(angle.c)?);
    }
    Ok(angles)
}
