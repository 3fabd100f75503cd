// ABOUTME: Benchmark fixtures generating synthetic pose frames and workout ratings
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for pose frames and ratings.
//!
//! Every generator is a pure function of its inputs so runs are comparable.

use reptrack_core::constants::landmarks;
use reptrack_core::models::{FrameLandmarks, Joint, Rating};
use reptrack_intelligence::analyzer::FrameInput;
use std::f64::consts::TAU;

/// Predefined session lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum SessionLength {
    /// One short set (10 reps)
    Short,
    /// A long session (100 reps)
    Long,
}

impl SessionLength {
    #[must_use]
    pub const fn reps(self) -> usize {
        match self {
            Self::Short => 10,
            Self::Long => 100,
        }
    }
}

const FRAMES_PER_REP: usize = 30;
const FRAME_INTERVAL_MS: u64 = 33;

/// Elbow angle sweeping 170 → 40 → 170 once per rep
#[allow(clippy::cast_precision_loss)]
fn curl_angle(frame: usize) -> f64 {
    let phase = (frame % FRAMES_PER_REP) as f64 / FRAMES_PER_REP as f64;
    let swing = (phase * TAU).cos();
    65.0_f64.mul_add(swing, 105.0)
}

fn arm(joints: &mut [Joint], shoulder: usize, elbow: usize, wrist: usize, x: f64, degrees: f64) {
    let radians = degrees.to_radians();
    joints[shoulder] = Joint::new(x, 0.3);
    joints[elbow] = Joint::new(x, 0.5);
    joints[wrist] = Joint::new(
        0.2_f64.mul_add(radians.sin(), x),
        0.2_f64.mul_add(-radians.cos(), 0.5),
    );
}

/// Curl frames for a whole session, both arms in sync, with sparse anomaly tags
#[must_use]
pub fn generate_curl_frames(length: SessionLength) -> Vec<FrameInput> {
    let total = length.reps() * FRAMES_PER_REP;
    (0..total)
        .map(|index| {
            let angle = curl_angle(index);
            let mut joints = vec![Joint::new(0.5, 0.5); landmarks::COUNT];
            arm(
                &mut joints,
                landmarks::LEFT_SHOULDER,
                landmarks::LEFT_ELBOW,
                landmarks::LEFT_WRIST,
                0.6,
                angle,
            );
            arm(
                &mut joints,
                landmarks::RIGHT_SHOULDER,
                landmarks::RIGHT_ELBOW,
                landmarks::RIGHT_WRIST,
                0.4,
                angle,
            );
            let tags = if index % 45 == 0 {
                vec!["elbow_swinging".to_owned()]
            } else {
                Vec::new()
            };
            FrameInput {
                timestamp_ms: index as u64 * FRAME_INTERVAL_MS,
                landmarks: FrameLandmarks::new(joints),
                tags,
            }
        })
        .collect()
}

/// Ratings spread over `workouts` workouts, several per workout
#[must_use]
pub fn generate_ratings(workouts: usize) -> Vec<Rating> {
    (0..workouts * 4)
        .map(|index| {
            let workout = index % workouts;
            Rating {
                workout_id: format!("bench_workout_{workout}"),
                value: ((index * 7 + workout) % 5 + 1) as u8,
            }
        })
        .collect()
}
