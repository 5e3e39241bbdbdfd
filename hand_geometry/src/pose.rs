//! The body landmark set: 13 named joints kept from the 33-point scheme.

use crate::point::Keypoint;

/// Points in the full detector body scheme.
pub const POSE_POINTS: usize = 33;

// ════════════════════════════════════════════════════════════════════════════
// Joint
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    pub const ALL: [Joint; 13] = [
        Joint::Nose,
        Joint::LeftShoulder, Joint::RightShoulder,
        Joint::LeftElbow,    Joint::RightElbow,
        Joint::LeftWrist,    Joint::RightWrist,
        Joint::LeftHip,      Joint::RightHip,
        Joint::LeftKnee,     Joint::RightKnee,
        Joint::LeftAnkle,    Joint::RightAnkle,
    ];

    /// Index of this joint in the 33-point detector output.
    pub fn detector_index(self) -> usize {
        match self {
            Joint::Nose          => 0,
            Joint::LeftShoulder  => 11,
            Joint::RightShoulder => 12,
            Joint::LeftElbow     => 13,
            Joint::RightElbow    => 14,
            Joint::LeftWrist     => 15,
            Joint::RightWrist    => 16,
            Joint::LeftHip       => 23,
            Joint::RightHip      => 24,
            Joint::LeftKnee      => 25,
            Joint::RightKnee     => 26,
            Joint::LeftAnkle     => 27,
            Joint::RightAnkle    => 28,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Bone pairs for drawing a stick figure.
pub const POSE_CONNECTIONS: [(Joint, Joint); 12] = [
    (Joint::LeftShoulder,  Joint::RightShoulder),
    (Joint::LeftShoulder,  Joint::LeftElbow),
    (Joint::LeftElbow,     Joint::LeftWrist),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::RightElbow,    Joint::RightWrist),
    (Joint::LeftShoulder,  Joint::LeftHip),
    (Joint::RightShoulder, Joint::RightHip),
    (Joint::LeftHip,       Joint::RightHip),
    (Joint::LeftHip,       Joint::LeftKnee),
    (Joint::LeftKnee,      Joint::LeftAnkle),
    (Joint::RightHip,      Joint::RightKnee),
    (Joint::RightKnee,     Joint::RightAnkle),
];

// ════════════════════════════════════════════════════════════════════════════
// PoseLandmarks
// ════════════════════════════════════════════════════════════════════════════

/// One detected body.  Any joint may be individually absent (off-frame or
/// below the detector's visibility cut).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoseLandmarks {
    joints: [Option<Keypoint>; 13],
}

impl PoseLandmarks {
    pub fn new() -> Self {
        PoseLandmarks::default()
    }

    /// Keep the 13 named joints out of a full detector body.
    ///
    /// Shorter input simply leaves the missing joints absent.
    pub fn from_detector(points: &[Option<Keypoint>]) -> Self {
        let mut pose = PoseLandmarks::default();
        for joint in Joint::ALL {
            pose.joints[joint.slot()] = points.get(joint.detector_index()).copied().flatten();
        }
        pose
    }

    pub fn with(mut self, joint: Joint, point: Keypoint) -> Self {
        self.set(joint, Some(point));
        self
    }

    pub fn set(&mut self, joint: Joint, point: Option<Keypoint>) {
        self.joints[joint.slot()] = point;
    }

    pub fn get(&self, joint: Joint) -> Option<Keypoint> {
        self.joints[joint.slot()]
    }

    /// True when no joint at all is present.
    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }

    /// Mean y of a left/right joint pair, or `None` unless both are present.
    pub fn average_y(&self, a: Joint, b: Joint) -> Option<f32> {
        let (a, b) = (self.get(a)?, self.get(b)?);
        Some((a.y + b.y) as f32 / 2.0)
    }

    pub fn shoulder_y(&self) -> Option<f32> {
        self.average_y(Joint::LeftShoulder, Joint::RightShoulder)
    }

    pub fn wrist_y(&self) -> Option<f32> {
        self.average_y(Joint::LeftWrist, Joint::RightWrist)
    }

    pub fn hip_y(&self) -> Option<f32> {
        self.average_y(Joint::LeftHip, Joint::RightHip)
    }

    /// Upright body: hips lower on screen than shoulders.
    pub fn is_standing(&self) -> bool {
        match (self.hip_y(), self.shoulder_y()) {
            (Some(hip), Some(shoulder)) => hip > shoulder,
            _ => false,
        }
    }

    /// Present joints with their names.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, Keypoint)> + '_ {
        Joint::ALL.into_iter().filter_map(move |j| self.get(j).map(|p| (j, p)))
    }
}
