// ABOUTME: Joint triples that supply each exercise's controlling and secondary angles
// ABOUTME: Static per-exercise geometry over the fixed anatomical landmark numbering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::angle::joint_angle;
use reptrack_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use reptrack_core::errors::AppResult;
use reptrack_core::models::{ExerciseKind, FrameLandmarks, Side};

/// Three landmark indices; the middle one is the vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointTriple {
    /// First outer joint
    pub a: usize,
    /// Vertex joint
    pub vertex: usize,
    /// Second outer joint
    pub c: usize,
}

impl JointTriple {
    /// Triple from indices
    #[must_use]
    pub const fn new(a: usize, vertex: usize, c: usize) -> Self {
        Self { a, vertex, c }
    }

    /// Highest landmark index this triple reads
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.a.max(self.vertex).max(self.c)
    }

    /// Vertex angle for this triple in a frame
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLandmarks` or `MalformedGeometry`
    pub fn angle(&self, frame: &FrameLandmarks) -> AppResult<f64> {
        joint_angle(
            frame.joint(self.a)?,
            frame.joint(self.vertex)?,
            frame.joint(self.c)?,
        )
    }
}

/// One counted limb of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountedLimb {
    /// Body side
    pub side: Side,
    /// Triple supplying the controlling angle
    pub triple: JointTriple,
}

/// Landmark geometry of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseGeometry {
    /// Limbs counted independently
    pub counted: &'static [CountedLimb],
    /// Reported alongside, never used for counting
    pub secondary: Option<JointTriple>,
}

const LEFT_ELBOW_FLEXION: JointTriple = JointTriple::new(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST);
const RIGHT_ELBOW_FLEXION: JointTriple =
    JointTriple::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST);
const LEFT_KNEE_FLEXION: JointTriple = JointTriple::new(LEFT_HIP, LEFT_KNEE, LEFT_ANKLE);
const RIGHT_KNEE_FLEXION: JointTriple = JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE);
const LEFT_SHOULDER_ABDUCTION: JointTriple =
    JointTriple::new(LEFT_HIP, LEFT_SHOULDER, LEFT_ELBOW);
const RIGHT_SHOULDER_ABDUCTION: JointTriple =
    JointTriple::new(RIGHT_HIP, RIGHT_SHOULDER, RIGHT_ELBOW);
const LEFT_TORSO: JointTriple = JointTriple::new(LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE);

const BOTH_ELBOWS: [CountedLimb; 2] = [
    CountedLimb {
        side: Side::Left,
        triple: LEFT_ELBOW_FLEXION,
    },
    CountedLimb {
        side: Side::Right,
        triple: RIGHT_ELBOW_FLEXION,
    },
];

const BOTH_SHOULDERS: [CountedLimb; 2] = [
    CountedLimb {
        side: Side::Left,
        triple: LEFT_SHOULDER_ABDUCTION,
    },
    CountedLimb {
        side: Side::Right,
        triple: RIGHT_SHOULDER_ABDUCTION,
    },
];

const BOTH_KNEES: [CountedLimb; 2] = [
    CountedLimb {
        side: Side::Left,
        triple: LEFT_KNEE_FLEXION,
    },
    CountedLimb {
        side: Side::Right,
        triple: RIGHT_KNEE_FLEXION,
    },
];

// Squats move both knees together; counting one side avoids doubling every rep.
const SQUAT_KNEE: [CountedLimb; 1] = [CountedLimb {
    side: Side::Left,
    triple: LEFT_KNEE_FLEXION,
}];

impl ExerciseGeometry {
    /// Geometry for an exercise
    #[must_use]
    pub const fn of(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::BicepCurl | ExerciseKind::ShoulderPress => Self {
                counted: &BOTH_ELBOWS,
                secondary: None,
            },
            ExerciseKind::Squat => Self {
                counted: &SQUAT_KNEE,
                secondary: Some(LEFT_TORSO),
            },
            ExerciseKind::LateralRaise => Self {
                counted: &BOTH_SHOULDERS,
                secondary: None,
            },
            ExerciseKind::Lunge => Self {
                counted: &BOTH_KNEES,
                secondary: Some(LEFT_TORSO),
            },
        }
    }

    /// Highest landmark index any triple of this exercise reads
    #[must_use]
    pub fn required_landmarks(&self) -> usize {
        self.counted
            .iter()
            .map(|limb| limb.triple.max_index())
            .chain(self.secondary.map(|t| t.max_index()))
            .max()
            .unwrap_or(0)
    }
}
