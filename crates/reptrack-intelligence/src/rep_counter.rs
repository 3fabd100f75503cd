// ABOUTME: Hysteresis repetition counter turning an angle stream into repetition events
// ABOUTME: Two-threshold Schmitt trigger per exercise and limb with a completion latch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repetition Counter
//!
//! Each limb of the active exercise owns one [`RepCounter`]. The counter moves
//! through `Unknown → Down ⇄ Up`:
//!
//! - angle above `max`: clear the latch if the stage is `Up`, then stage becomes `Down`
//! - angle below `min`: if the stage is `Down` and the latch is clear, stage becomes
//!   `Up`, a [`RepEvent`] is emitted and the latch is set
//! - angles inside `[min, max]` never transition
//!
//! Jitter near a single threshold therefore never produces extra repetitions.

use crate::config::intelligence::ExerciseThresholds;
use reptrack_core::models::{ExerciseKind, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current phase of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepStage {
    /// No threshold crossed yet
    #[default]
    Unknown,
    /// Limb extended past the upper threshold
    Down,
    /// Limb flexed past the lower threshold
    Up,
}

/// A completed extension → flexion cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepEvent {
    /// Limb that completed the repetition
    pub side: Side,
    /// 1-based repetition number for this limb
    pub rep_number: u32,
    /// Angle of the sample that completed the repetition
    pub angle: f64,
    /// Milliseconds since the previous event (or since the counter's first sample)
    pub duration_ms: u64,
    /// Frame timestamp of the completing sample
    pub timestamp_ms: u64,
}

/// Hysteresis counter for one limb
#[derive(Debug, Clone, PartialEq)]
pub struct RepCounter {
    side: Side,
    thresholds: ExerciseThresholds,
    stage: RepStage,
    latched: bool,
    count: u32,
    first_sample_ms: Option<u64>,
    last_event_ms: Option<u64>,
}

impl RepCounter {
    /// Fresh counter in the `Unknown` stage with the latch clear
    #[must_use]
    pub const fn new(side: Side, thresholds: ExerciseThresholds) -> Self {
        Self {
            side,
            thresholds,
            stage: RepStage::Unknown,
            latched: false,
            count: 0,
            first_sample_ms: None,
            last_event_ms: None,
        }
    }

    /// Feed one angle sample, returning an event when a repetition completes
    pub fn update(&mut self, angle: f64, timestamp_ms: u64) -> Option<RepEvent> {
        self.first_sample_ms.get_or_insert(timestamp_ms);

        if angle > self.thresholds.max_angle {
            if self.stage == RepStage::Up && self.latched {
                self.latched = false;
            }
            self.stage = RepStage::Down;
            return None;
        }

        if angle < self.thresholds.min_angle && self.stage == RepStage::Down && !self.latched {
            self.stage = RepStage::Up;
            self.latched = true;
            self.count += 1;

            let since = self.last_event_ms.or(self.first_sample_ms).unwrap_or(timestamp_ms);
            self.last_event_ms = Some(timestamp_ms);
            return Some(RepEvent {
                side: self.side,
                rep_number: self.count,
                angle,
                duration_ms: timestamp_ms.saturating_sub(since),
                timestamp_ms,
            });
        }

        None
    }

    /// Return to the initial state, forgetting the count
    pub fn clear(&mut self) {
        *self = Self::new(self.side, self.thresholds);
    }

    /// Current stage
    #[must_use]
    pub const fn stage(&self) -> RepStage {
        self.stage
    }

    /// Whether the completion latch is set
    #[must_use]
    pub const fn is_latched(&self) -> bool {
        self.latched
    }

    /// Repetitions counted so far
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Band this counter uses
    #[must_use]
    pub const fn thresholds(&self) -> ExerciseThresholds {
        self.thresholds
    }
}

/// Counters keyed by exercise and limb, constructed on first use
#[derive(Debug, Default)]
pub struct RepCounterBank {
    counters: HashMap<(ExerciseKind, Side), RepCounter>,
}

impl RepCounterBank {
    /// Empty bank
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter for a limb, created with `thresholds` if absent
    pub fn counter_mut(
        &mut self,
        kind: ExerciseKind,
        side: Side,
        thresholds: ExerciseThresholds,
    ) -> &mut RepCounter {
        self.counters
            .entry((kind, side))
            .or_insert_with(|| RepCounter::new(side, thresholds))
    }

    /// Counter for a limb if it has seen any sample
    #[must_use]
    pub fn get(&self, kind: ExerciseKind, side: Side) -> Option<&RepCounter> {
        self.counters.get(&(kind, side))
    }

    /// Repetitions counted for an exercise across all limbs
    #[must_use]
    pub fn total_reps(&self, kind: ExerciseKind) -> u32 {
        self.counters
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, counter)| counter.count())
            .sum()
    }

    /// Drop every counter
    pub fn clear(&mut self) {
        self.counters.clear();
    }
}
