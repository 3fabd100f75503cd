// ABOUTME: Repetition counting, form classification, and adaptive training algorithms
// ABOUTME: Pure analysis engine with no I/O, consumed by the reptrack runtime crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Reptrack Intelligence
//!
//! Frame-driven analysis and the training feedback loops:
//!
//! - **angle** / **kinematics**: joint angles and per-exercise joint triples
//! - **`rep_counter`**: hysteresis repetition counting per limb
//! - **`form_classifier`**: anomaly tags to issues, ratings, and tips
//! - **analyzer**: the per-frame pipeline tying the above together
//! - **scoring** / **`workout_analysis`**: session score, grade, and coaching advice
//! - **difficulty**: batch-driven difficulty controller with a pluggable policy
//! - **recommender**: rating-vector similarity ranking of past workouts
//! - **config**: environment-driven thresholds and loop settings

/// Joint angle computation
pub mod angle;

/// Per-frame analysis pipeline
pub mod analyzer;

/// Intelligence configuration
pub mod config;

/// Difficulty controller and policies
pub mod difficulty;

/// Form issue detection and rep feedback
pub mod form_classifier;

/// Joint triples per exercise
pub mod kinematics;

/// Workout recommendations from ratings
pub mod recommender;

/// Repetition counting
pub mod rep_counter;

/// Workout score and auto-rating
pub mod scoring;

/// Post-workout analysis
pub mod workout_analysis;

pub use analyzer::{CompletedRep, FrameAnalyzer, FrameInput, FrameReport, LimbReading};
pub use angle::joint_angle;
pub use config::{ConfigError, IntelligenceConfig};
pub use difficulty::{DifficultyController, DifficultyPolicy, DifficultyUpdate, QTablePolicy};
pub use form_classifier::FormClassifier;
pub use recommender::{cosine_similarity, recommend, Recommendation};
pub use rep_counter::{RepCounter, RepCounterBank, RepEvent, RepStage};
pub use scoring::{rating_from_score, workout_score};
pub use workout_analysis::{TempoAdvice, WorkoutAnalysis};
