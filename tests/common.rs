// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory store, synthetic pose frames, and feedback builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `reptrack`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use reptrack::database::SqliteStore;
use reptrack_core::constants::landmarks;
use reptrack_core::models::{FormRating, FrameLandmarks, Joint, RepFeedback, SpeedRating};
use reptrack_intelligence::analyzer::FrameInput;
use std::collections::BTreeSet;
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN, // Default to WARN for quiet tests
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard in-memory store setup
pub async fn create_test_store() -> Result<Arc<SqliteStore>> {
    init_test_logging();
    Ok(Arc::new(SqliteStore::connect("sqlite::memory:").await?))
}

/// Place `tip` so that the angle at `vertex` between `anchor` (straight above) and `tip` is `degrees`
fn bend(joints: &mut [Joint], anchor: usize, vertex: usize, tip: usize, x: f64, degrees: f64) {
    let radians = degrees.to_radians();
    joints[anchor] = Joint::new(x, 0.3);
    joints[vertex] = Joint::new(x, 0.5);
    joints[tip] = Joint::new(
        0.2_f64.mul_add(radians.sin(), x),
        0.2_f64.mul_add(-radians.cos(), 0.5),
    );
}

/// A full 33-landmark body with both elbows bent to the given angles
pub fn arm_pose(left_elbow: f64, right_elbow: f64) -> FrameLandmarks {
    let mut joints = vec![Joint::new(0.5, 0.5); landmarks::COUNT];
    bend(
        &mut joints,
        landmarks::LEFT_SHOULDER,
        landmarks::LEFT_ELBOW,
        landmarks::LEFT_WRIST,
        0.6,
        left_elbow,
    );
    bend(
        &mut joints,
        landmarks::RIGHT_SHOULDER,
        landmarks::RIGHT_ELBOW,
        landmarks::RIGHT_WRIST,
        0.4,
        right_elbow,
    );
    FrameLandmarks::new(joints)
}

/// A full 33-landmark body with the left knee bent to the given angle
pub fn leg_pose(left_knee: f64) -> FrameLandmarks {
    let mut joints = vec![Joint::new(0.5, 0.5); landmarks::COUNT];
    bend(
        &mut joints,
        landmarks::LEFT_HIP,
        landmarks::LEFT_KNEE,
        landmarks::LEFT_ANKLE,
        0.55,
        left_knee,
    );
    // Shoulder straight above the hip keeps the torso angle well defined
    joints[landmarks::LEFT_SHOULDER] = Joint::new(0.55, 0.1);
    FrameLandmarks::new(joints)
}

/// Curl frame with both arms at the same angle
pub fn curl_frame(timestamp_ms: u64, elbow: f64, tags: &[&str]) -> FrameInput {
    FrameInput {
        timestamp_ms,
        landmarks: arm_pose(elbow, elbow),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    }
}

/// Curl frames for the left arm only; the right arm stays in the band
pub fn left_curl_frames(start_ms: u64, step_ms: u64, angles: &[f64]) -> Vec<FrameInput> {
    angles
        .iter()
        .enumerate()
        .map(|(i, angle)| FrameInput {
            timestamp_ms: start_ms + step_ms * i as u64,
            landmarks: arm_pose(*angle, 120.0),
            tags: Vec::new(),
        })
        .collect()
}

/// Feedback with no issues
pub fn feedback(form_rating: FormRating, speed_rating: SpeedRating) -> RepFeedback {
    RepFeedback {
        angle: 60.0,
        issues: BTreeSet::new(),
        form_rating,
        speed_rating,
        tip: String::new(),
    }
}
