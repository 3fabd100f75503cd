// ABOUTME: Exercise kinds and body sides tracked by the repetition counter
// ABOUTME: String forms are shared by storage, configuration keys, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Standing dumbbell curl
    BicepCurl,
    /// Bodyweight or barbell squat
    Squat,
    /// Dumbbell lateral raise
    LateralRaise,
    /// Forward lunge
    Lunge,
    /// Overhead shoulder press
    ShoulderPress,
}

impl ExerciseKind {
    /// Every exercise in catalog order
    pub const ALL: [Self; 5] = [
        Self::BicepCurl,
        Self::Squat,
        Self::LateralRaise,
        Self::Lunge,
        Self::ShoulderPress,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BicepCurl => "bicep_curl",
            Self::Squat => "squat",
            Self::LateralRaise => "lateral_raise",
            Self::Lunge => "lunge",
            Self::ShoulderPress => "shoulder_press",
        }
    }

    /// Upper-case key used for environment variable names
    #[must_use]
    pub const fn env_key(&self) -> &'static str {
        match self {
            Self::BicepCurl => "BICEP_CURL",
            Self::Squat => "SQUAT",
            Self::LateralRaise => "LATERAL_RAISE",
            Self::Lunge => "LUNGE",
            Self::ShoulderPress => "SHOULDER_PRESS",
        }
    }

    /// Human readable name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::BicepCurl => "Bicep Curl",
            Self::Squat => "Squat",
            Self::LateralRaise => "Lateral Raise",
            Self::Lunge => "Lunge",
            Self::ShoulderPress => "Shoulder Press",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bicep_curl" | "bicep" | "curl" => Ok(Self::BicepCurl),
            "squat" => Ok(Self::Squat),
            "lateral_raise" => Ok(Self::LateralRaise),
            "lunge" | "lunges" => Ok(Self::Lunge),
            "shoulder_press" | "press" => Ok(Self::ShoulderPress),
            other => Err(AppError::invalid_input(format!(
                "unknown exercise kind '{other}'"
            ))),
        }
    }
}

/// Body side whose controlling angle drives a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Subject's left
    Left,
    /// Subject's right
    Right,
}

impl Side {
    /// Lower-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
