// ABOUTME: Per-exercise angle thresholds and ideal tempo windows
// ABOUTME: Drives the repetition counter bands and the speed rating of each repetition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use super::env_parse;
use reptrack_core::constants::{tempo, thresholds};
use reptrack_core::models::ExerciseKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Correct-range band for an exercise's controlling angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseThresholds {
    /// Crossing below this completes a repetition
    pub min_angle: f64,
    /// Crossing above this re-arms the counter
    pub max_angle: f64,
}

impl ExerciseThresholds {
    /// Band from a `(min, max)` pair
    #[must_use]
    pub const fn new(min_angle: f64, max_angle: f64) -> Self {
        Self {
            min_angle,
            max_angle,
        }
    }

    /// Whether an angle lies inside the band (inclusive)
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        (self.min_angle..=self.max_angle).contains(&angle)
    }

    /// Check the band is non-empty and within `[0,180]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidThresholds` for inverted, empty, or out-of-range bands
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |angle: f64| (0.0..=180.0).contains(&angle);
        if !in_range(self.min_angle) || !in_range(self.max_angle) {
            return Err(ConfigError::InvalidThresholds(format!(
                "angles must lie in [0,180], got [{}, {}]",
                self.min_angle, self.max_angle
            )));
        }
        if self.min_angle >= self.max_angle {
            return Err(ConfigError::InvalidThresholds(format!(
                "min angle {} must be below max angle {}",
                self.min_angle, self.max_angle
            )));
        }
        Ok(())
    }
}

/// Ideal repetition duration window in milliseconds (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempoWindow {
    /// Faster than this is too fast
    pub min_ms: u64,
    /// Slower than this is too slow
    pub max_ms: u64,
}

impl TempoWindow {
    /// Window from a `(min, max)` pair
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

/// Everything configurable about one exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSettings {
    /// Counting band
    pub thresholds: ExerciseThresholds,
    /// Ideal tempo
    pub tempo: TempoWindow,
}

impl ExerciseSettings {
    /// Built-in defaults for an exercise
    #[must_use]
    pub const fn defaults_for(kind: ExerciseKind) -> Self {
        let (band, window) = match kind {
            ExerciseKind::BicepCurl => (thresholds::BICEP_CURL, tempo::CONTROLLED_LIFT_MS),
            ExerciseKind::Squat => (thresholds::SQUAT, tempo::LOWER_BODY_MS),
            ExerciseKind::LateralRaise => (thresholds::LATERAL_RAISE, tempo::CONTROLLED_LIFT_MS),
            ExerciseKind::Lunge => (thresholds::LUNGE, tempo::LOWER_BODY_MS),
            ExerciseKind::ShoulderPress => (thresholds::SHOULDER_PRESS, tempo::CONTROLLED_LIFT_MS),
        };
        Self {
            thresholds: ExerciseThresholds::new(band.0, band.1),
            tempo: TempoWindow::new(window.0, window.1),
        }
    }
}

/// Settings for every exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    settings: BTreeMap<ExerciseKind, ExerciseSettings>,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            settings: ExerciseKind::ALL
                .iter()
                .map(|kind| (*kind, ExerciseSettings::defaults_for(*kind)))
                .collect(),
        }
    }
}

impl ExerciseConfig {
    /// Settings for one exercise, falling back to the built-in defaults
    #[must_use]
    pub fn settings(&self, kind: ExerciseKind) -> ExerciseSettings {
        self.settings
            .get(&kind)
            .copied()
            .unwrap_or_else(|| ExerciseSettings::defaults_for(kind))
    }

    /// Override the settings of one exercise
    pub fn set(&mut self, kind: ExerciseKind, settings: ExerciseSettings) {
        self.settings.insert(kind, settings);
    }

    /// Override only the counting band of one exercise
    pub fn set_thresholds(&mut self, kind: ExerciseKind, thresholds: ExerciseThresholds) {
        let mut settings = self.settings(kind);
        settings.thresholds = thresholds;
        self.set(kind, settings);
    }

    /// Load from `REPTRACK_<EXERCISE>_{MIN_ANGLE,MAX_ANGLE,TEMPO_MIN_MS,TEMPO_MAX_MS}`
    ///
    /// # Errors
    ///
    /// Returns `Parse` when a variable is set but not numeric
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for kind in ExerciseKind::ALL {
            let defaults = ExerciseSettings::defaults_for(kind);
            let key = kind.env_key();
            let settings = ExerciseSettings {
                thresholds: ExerciseThresholds::new(
                    env_parse(&format!("REPTRACK_{key}_MIN_ANGLE"), defaults.thresholds.min_angle)?,
                    env_parse(&format!("REPTRACK_{key}_MAX_ANGLE"), defaults.thresholds.max_angle)?,
                ),
                tempo: TempoWindow::new(
                    env_parse(&format!("REPTRACK_{key}_TEMPO_MIN_MS"), defaults.tempo.min_ms)?,
                    env_parse(&format!("REPTRACK_{key}_TEMPO_MAX_MS"), defaults.tempo.max_ms)?,
                ),
            };
            config.set(kind, settings);
        }
        Ok(config)
    }

    /// Validate every exercise's band and tempo window
    ///
    /// # Errors
    ///
    /// Returns the first invalid band or inverted tempo window
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ExerciseKind::ALL {
            let settings = self.settings(kind);
            settings.thresholds.validate().map_err(|e| {
                ConfigError::InvalidThresholds(format!("{kind}: {e}"))
            })?;
            if settings.tempo.min_ms > settings.tempo.max_ms {
                return Err(ConfigError::InvalidRange(format!(
                    "{kind}: tempo window {}..{} ms is inverted",
                    settings.tempo.min_ms, settings.tempo.max_ms
                )));
            }
        }
        Ok(())
    }
}
