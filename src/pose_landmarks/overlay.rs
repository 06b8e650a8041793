use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::pose_landmarks::{BodyJoint, LandmarkSet};

// torso and limb segments of the body schema (face points are drawn unconnected)
pub const POSE_CONNECTIONS: [(BodyJoint, BodyJoint); 22] = [
    (BodyJoint::LeftShoulder, BodyJoint::RightShoulder),
    (BodyJoint::LeftShoulder, BodyJoint::LeftElbow),
    (BodyJoint::LeftElbow, BodyJoint::LeftWrist),
    (BodyJoint::RightShoulder, BodyJoint::RightElbow),
    (BodyJoint::RightElbow, BodyJoint::RightWrist),
    (BodyJoint::LeftWrist, BodyJoint::LeftIndex),
    (BodyJoint::RightWrist, BodyJoint::RightIndex),
    (BodyJoint::LeftWrist, BodyJoint::LeftThumb),
    (BodyJoint::RightWrist, BodyJoint::RightThumb),
    (BodyJoint::LeftShoulder, BodyJoint::LeftHip),
    (BodyJoint::RightShoulder, BodyJoint::RightHip),
    (BodyJoint::LeftHip, BodyJoint::RightHip),
    (BodyJoint::LeftHip, BodyJoint::LeftKnee),
    (BodyJoint::LeftKnee, BodyJoint::LeftAnkle),
    (BodyJoint::RightHip, BodyJoint::RightKnee),
    (BodyJoint::RightKnee, BodyJoint::RightAnkle),
    (BodyJoint::LeftAnkle, BodyJoint::LeftHeel),
    (BodyJoint::RightAnkle, BodyJoint::RightHeel),
    (BodyJoint::LeftHeel, BodyJoint::LeftFootIndex),
    (BodyJoint::RightHeel, BodyJoint::RightFootIndex),
    (BodyJoint::LeftAnkle, BodyJoint::LeftFootIndex),
    (BodyJoint::RightAnkle, BodyJoint::RightFootIndex),
];

const SEGMENT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const POINT_COLOR: Rgb<u8> = Rgb([255, 64, 64]);

/// Draws the skeleton onto `image`, skipping points below `min_visibility`.
pub fn draw_landmarks(image: &mut RgbImage, landmarks: &LandmarkSet, min_visibility: f32) {
    let (width, height) = (image.width() as f32, image.height() as f32);
    let to_pixel = |joint: BodyJoint| {
        let p = landmarks.get(joint);
        (p.visibility >= min_visibility).then_some((p.x * width, p.y * height))
    };

    for (a, b) in POSE_CONNECTIONS {
        if let (Some(start), Some(end)) = (to_pixel(a), to_pixel(b)) {
            draw_line_segment_mut(image, start, end, SEGMENT_COLOR);
        }
    }

    let radius = (image.width().max(image.height()) / 160).max(2) as i32;
    for point in landmarks.points() {
        if point.visibility < min_visibility {
            continue;
        }
        let center = ((point.x * width) as i32, (point.y * height) as i32);
        draw_filled_circle_mut(image, center, radius, POINT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose_landmarks::Landmark;

    #[test]
    fn draws_only_visible_points() {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0, 0.0); 33];
        points[BodyJoint::Nose.index()] = Landmark::new(0.25, 0.25, 0.0, 1.0);
        let set = LandmarkSet::new(points).unwrap();

        let mut image = RgbImage::new(100, 100);
        draw_landmarks(&mut image, &set, 0.5);

        assert_eq!(*image.get_pixel(25, 25), POINT_COLOR);
        assert_eq!(*image.get_pixel(50, 50), Rgb([0, 0, 0]));
    }
}
