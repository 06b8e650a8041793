use std::fmt;

/// Named positions in the 33-point BlazePose body schema.
///
/// The discriminant of each variant is its index in a `LandmarkSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyJoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyJoint {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyJoint::Nose => "nose",
            BodyJoint::LeftEyeInner => "left_eye_inner",
            BodyJoint::LeftEye => "left_eye",
            BodyJoint::LeftEyeOuter => "left_eye_outer",
            BodyJoint::RightEyeInner => "right_eye_inner",
            BodyJoint::RightEye => "right_eye",
            BodyJoint::RightEyeOuter => "right_eye_outer",
            BodyJoint::LeftEar => "left_ear",
            BodyJoint::RightEar => "right_ear",
            BodyJoint::MouthLeft => "mouth_left",
            BodyJoint::MouthRight => "mouth_right",
            BodyJoint::LeftShoulder => "left_shoulder",
            BodyJoint::RightShoulder => "right_shoulder",
            BodyJoint::LeftElbow => "left_elbow",
            BodyJoint::RightElbow => "right_elbow",
            BodyJoint::LeftWrist => "left_wrist",
            BodyJoint::RightWrist => "right_wrist",
            BodyJoint::LeftPinky => "left_pinky",
            BodyJoint::RightPinky => "right_pinky",
            BodyJoint::LeftIndex => "left_index",
            BodyJoint::RightIndex => "right_index",
            BodyJoint::LeftThumb => "left_thumb",
            BodyJoint::RightThumb => "right_thumb",
            BodyJoint::LeftHip => "left_hip",
            BodyJoint::RightHip => "right_hip",
            BodyJoint::LeftKnee => "left_knee",
            BodyJoint::RightKnee => "right_knee",
            BodyJoint::LeftAnkle => "left_ankle",
            BodyJoint::RightAnkle => "right_ankle",
            BodyJoint::LeftHeel => "left_heel",
            BodyJoint::RightHeel => "right_heel",
            BodyJoint::LeftFootIndex => "left_foot_index",
            BodyJoint::RightFootIndex => "right_foot_index",
        }
    }
}

impl fmt::Display for BodyJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
