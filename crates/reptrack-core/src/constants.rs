// ABOUTME: Landmark numbering and default analysis constants
// ABOUTME: Fixed anatomical indices plus the thresholds observed in the field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Anatomical landmark indices (33-point body topology)
pub mod landmarks {
    /// Nose
    pub const NOSE: usize = 0;
    /// Left shoulder
    pub const LEFT_SHOULDER: usize = 11;
    /// Right shoulder
    pub const RIGHT_SHOULDER: usize = 12;
    /// Left elbow
    pub const LEFT_ELBOW: usize = 13;
    /// Right elbow
    pub const RIGHT_ELBOW: usize = 14;
    /// Left wrist
    pub const LEFT_WRIST: usize = 15;
    /// Right wrist
    pub const RIGHT_WRIST: usize = 16;
    /// Left hip
    pub const LEFT_HIP: usize = 23;
    /// Right hip
    pub const RIGHT_HIP: usize = 24;
    /// Left knee
    pub const LEFT_KNEE: usize = 25;
    /// Right knee
    pub const RIGHT_KNEE: usize = 26;
    /// Left ankle
    pub const LEFT_ANKLE: usize = 27;
    /// Right ankle
    pub const RIGHT_ANKLE: usize = 28;
    /// Total landmarks produced by the pose model
    pub const COUNT: usize = 33;
}

/// Default correct-range thresholds (degrees) for the controlling angle
pub mod thresholds {
    /// Bicep curl elbow flexion
    pub const BICEP_CURL: (f64, f64) = (70.0, 160.0);
    /// Squat knee angle
    pub const SQUAT: (f64, f64) = (85.0, 95.0);
    /// Lateral raise shoulder abduction
    pub const LATERAL_RAISE: (f64, f64) = (80.0, 100.0);
    /// Lunge front-knee angle
    pub const LUNGE: (f64, f64) = (90.0, 160.0);
    /// Shoulder press elbow angle
    pub const SHOULDER_PRESS: (f64, f64) = (70.0, 160.0);
}

/// Ideal repetition durations in milliseconds
pub mod tempo {
    /// Slow controlled lifts (curls, raises, presses)
    pub const CONTROLLED_LIFT_MS: (u64, u64) = (4000, 6000);
    /// Lower-body compound movements (squats, lunges)
    pub const LOWER_BODY_MS: (u64, u64) = (3000, 5000);
}

/// Difficulty control loop defaults
pub mod difficulty {
    /// Samples per controller batch
    pub const BATCH_SIZE: usize = 5;
    /// Target average angle in degrees
    pub const TARGET_ANGLE: i64 = 45;
    /// Strict tolerance around the target for a positive reward
    pub const REWARD_TOLERANCE: f64 = 5.0;
    /// Difficulty floor
    pub const MIN_DIFFICULTY: u32 = 1;
    /// Reward when the batch is on target and error free
    pub const REWARD_ON_TARGET: f64 = 1.0;
    /// Reward otherwise
    pub const REWARD_OFF_TARGET: f64 = -1.0;
}

/// Recommendation defaults
pub mod recommendation {
    /// Suggestions returned per query
    pub const TOP_K: usize = 3;
    /// Minimum number of ratings before similarity is meaningful
    pub const MIN_RATINGS: usize = 2;
    /// Lowest accepted rating value
    pub const MIN_RATING: u8 = 1;
    /// Highest accepted rating value
    pub const MAX_RATING: u8 = 5;
}

/// Default tip when a repetition shows no issues
pub const ENCOURAGEMENT_TIP: &str = "Great form! Keep it up!";
