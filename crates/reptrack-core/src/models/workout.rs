// ABOUTME: Workout summaries, stored workout records, rep details, and letter grades
// ABOUTME: Output of a finished session and the shape of the workout history store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::exercise::ExerciseKind;
use super::feedback::{FormIssue, FormRating, SpeedRating};

/// Summary of one finished workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Exercise performed
    pub exercise_kind: ExerciseKind,
    /// Session start
    pub start_time: DateTime<Utc>,
    /// Session length in milliseconds
    pub duration_ms: u64,
    /// Repetitions counted while the session was active
    pub total_reps: u32,
    /// Repetitions rated perfect
    pub perfect_reps: u32,
    /// Mean completion angle over all repetitions
    pub avg_angle: f64,
    /// Workout score in `[0,100]`
    pub score: u8,
    /// Difficulty level when the session ended
    pub difficulty_at_end: u32,
}

impl WorkoutSummary {
    /// Share of perfect repetitions, integer percent
    #[must_use]
    pub fn perfect_form_percentage(&self) -> u32 {
        if self.total_reps == 0 {
            0
        } else {
            self.perfect_reps * 100 / self.total_reps
        }
    }

    /// Duration as `MM:SS`
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        let seconds = self.duration_ms / 1000;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// Letter grade for the score
    #[must_use]
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score)
    }
}

/// A persisted workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Store-assigned identifier
    pub id: String,
    /// Summary as saved
    #[serde(flatten)]
    pub summary: WorkoutSummary,
}

/// A persisted repetition of a saved workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepDetail {
    /// Owning workout
    pub workout_id: String,
    /// 1-based position in the workout
    pub rep_number: u32,
    /// Completion angle
    pub angle: f64,
    /// Form rating
    pub form_rating: FormRating,
    /// Tempo rating
    pub speed_rating: SpeedRating,
    /// Issues detected
    pub issues: BTreeSet<FormIssue>,
    /// When the detail row was written
    pub recorded_at: DateTime<Utc>,
}

/// A saved workout with its repetitions ordered by rep number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetails {
    /// The workout
    pub workout: WorkoutRecord,
    /// Its repetitions
    pub reps: Vec<RepDetail>,
}

/// Aggregate statistics across the workout history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    /// Saved workouts
    pub total_workouts: u32,
    /// Repetitions across all workouts
    pub total_reps: u32,
    /// Perfect repetitions across all workouts
    pub perfect_form_reps: u32,
    /// Mean workout score
    pub average_score: f64,
}

/// Letter grade derived from a workout score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    #[serde(rename = "A+")]
    APlus,
    /// 85..90
    A,
    /// 80..85
    #[serde(rename = "A-")]
    AMinus,
    /// 75..80
    #[serde(rename = "B+")]
    BPlus,
    /// 70..75
    B,
    /// 65..70
    #[serde(rename = "B-")]
    BMinus,
    /// 60..65
    #[serde(rename = "C+")]
    CPlus,
    /// 55..60
    C,
    /// 50..55
    #[serde(rename = "C-")]
    CMinus,
    /// 45..50
    #[serde(rename = "D+")]
    DPlus,
    /// 40..45
    D,
    /// Below 40
    F,
}

/// Lower score bound of each grade, best first
const GRADE_STEPS: [(u8, Grade); 11] = [
    (90, Grade::APlus),
    (85, Grade::A),
    (80, Grade::AMinus),
    (75, Grade::BPlus),
    (70, Grade::B),
    (65, Grade::BMinus),
    (60, Grade::CPlus),
    (55, Grade::C),
    (50, Grade::CMinus),
    (45, Grade::DPlus),
    (40, Grade::D),
];

impl Grade {
    /// Step-table lookup
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        GRADE_STEPS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map_or(Self::F, |(_, grade)| *grade)
    }

    /// Printable label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
