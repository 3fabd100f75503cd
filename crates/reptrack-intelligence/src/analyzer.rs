// ABOUTME: Per-frame analysis combining angle extraction, repetition counting, and form classification
// ABOUTME: Owns the counter bank and anomaly-tag window for the active exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Frame Analyzer
//!
//! One [`FrameAnalyzer`] belongs to one analysis worker. Each call to
//! [`FrameAnalyzer::analyze`] either fails before touching any state
//! (missing or malformed landmarks) or fully applies the frame.

use crate::config::intelligence::ExerciseConfig;
use crate::form_classifier::FormClassifier;
use crate::kinematics::ExerciseGeometry;
use crate::rep_counter::{RepCounterBank, RepEvent};
use reptrack_core::errors::{AppError, AppResult};
use reptrack_core::models::{ExerciseKind, FrameLandmarks, RepFeedback, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One frame as delivered by the external pose analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Capture time in milliseconds
    pub timestamp_ms: u64,
    /// Detected joints
    pub landmarks: FrameLandmarks,
    /// Free-form anomaly tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Controlling angle of one counted limb in a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbReading {
    /// Limb
    pub side: Side,
    /// Controlling angle in degrees
    pub angle: f64,
    /// Whether the angle lies inside the exercise's correct range
    pub in_range: bool,
}

/// A repetition completed on this frame with its judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRep {
    /// Counter event
    pub event: RepEvent,
    /// Classifier output
    pub feedback: RepFeedback,
    /// Distinct anomaly tags seen since the previous repetition
    pub error_tags: Vec<String>,
    /// Whether an active workout counted this rep; set downstream of the analyzer
    #[serde(default)]
    pub counted: bool,
}

/// Everything learned from one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frame timestamp
    pub timestamp_ms: u64,
    /// Exercise the frame was analyzed as
    pub exercise: ExerciseKind,
    /// One reading per counted limb
    pub readings: Vec<LimbReading>,
    /// Secondary (torso) angle when the exercise defines one
    pub secondary_angle: Option<f64>,
    /// Repetitions completed on this frame
    pub completed: Vec<CompletedRep>,
}

/// Stateful per-frame pipeline for the active exercise
#[derive(Debug)]
pub struct FrameAnalyzer {
    exercises: ExerciseConfig,
    classifier: FormClassifier,
    counters: RepCounterBank,
    exercise: ExerciseKind,
    tag_window: Vec<String>,
}

impl FrameAnalyzer {
    /// Analyzer for `exercise` with fresh counters
    #[must_use]
    pub fn new(exercises: ExerciseConfig, exercise: ExerciseKind) -> Self {
        Self {
            classifier: FormClassifier::new(exercises.clone()),
            exercises,
            counters: RepCounterBank::new(),
            exercise,
            tag_window: Vec::new(),
        }
    }

    /// Active exercise
    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    /// Counter state, for inspection
    #[must_use]
    pub const fn counters(&self) -> &RepCounterBank {
        &self.counters
    }

    /// Switch exercise; counters and tag window start over
    pub fn set_exercise(&mut self, exercise: ExerciseKind) {
        if exercise != self.exercise {
            debug!(from = %self.exercise, to = %exercise, "switching exercise");
        }
        self.exercise = exercise;
        self.reset();
    }

    /// Forget all counter state and pending tags
    pub fn reset(&mut self) {
        self.counters.clear();
        self.tag_window.clear();
    }

    /// Analyze one frame
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLandmarks` when the frame lacks a landmark the
    /// exercise reads, or `MalformedGeometry` for non-finite coordinates. In
    /// both cases no state changes.
    pub fn analyze(&mut self, frame: &FrameInput) -> AppResult<FrameReport> {
        let kind = self.exercise;
        let geometry = ExerciseGeometry::of(kind);
        let required = geometry.required_landmarks() + 1;
        if frame.landmarks.len() < required {
            return Err(AppError::insufficient_landmarks(
                required,
                frame.landmarks.len(),
            ));
        }

        let angles = geometry
            .counted
            .iter()
            .map(|limb| Ok((limb.side, limb.triple.angle(&frame.landmarks)?)))
            .collect::<AppResult<Vec<(Side, f64)>>>()?;
        let secondary_angle = geometry
            .secondary
            .map(|triple| triple.angle(&frame.landmarks))
            .transpose()?;

        for tag in &frame.tags {
            if !self.tag_window.contains(tag) {
                self.tag_window.push(tag.clone());
            }
        }

        let settings = self.exercises.settings(kind);
        let mut readings = Vec::with_capacity(angles.len());
        let mut completed = Vec::new();
        for (side, angle) in angles {
            readings.push(LimbReading {
                side,
                angle,
                in_range: settings.thresholds.contains(angle),
            });
            let counter = self.counters.counter_mut(kind, side, settings.thresholds);
            if let Some(event) = counter.update(angle, frame.timestamp_ms) {
                let feedback = self.classifier.classify(
                    kind,
                    event.angle,
                    self.tag_window.as_slice(),
                    event.duration_ms,
                );
                debug!(
                    exercise = %kind,
                    side = %side,
                    rep = event.rep_number,
                    angle = event.angle,
                    duration_ms = event.duration_ms,
                    rating = feedback.form_rating.as_str(),
                    "repetition completed"
                );
                completed.push(CompletedRep {
                    event,
                    feedback,
                    error_tags: self.tag_window.clone(),
                    counted: false,
                });
            }
        }
        if !completed.is_empty() {
            self.tag_window.clear();
        }

        Ok(FrameReport {
            timestamp_ms: frame.timestamp_ms,
            exercise: kind,
            readings,
            secondary_angle,
            completed,
        })
    }
}
