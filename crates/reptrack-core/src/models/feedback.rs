// ABOUTME: Form issue catalog, form and speed ratings, and per-repetition feedback
// ABOUTME: Severity and corrective tips are fixed per issue in a static lookup table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How serious a technique defect is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Form is not optimal but safe to continue
    Minor,
    /// Should be corrected, not dangerous
    Moderate,
    /// Injury risk, correct immediately
    Severe,
}

/// Exercise-specific technique defect
///
/// Declaration order is catalog order; it breaks ties when choosing a tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormIssue {
    // Bicep curl
    /// Elbow drifting away from the torso
    ElbowSwinging,
    /// Wrist rotating during the curl
    WristRotation,
    /// Shoulders creeping up
    ShoulderRaising,
    /// Leaning back to swing the weight
    BackArching,
    // Squat
    /// Knees caving inward
    KneeInward,
    /// Knees travelling past the toes
    KneesOverToes,
    /// Hips not reaching parallel
    ShallowDepth,
    /// Torso folding forward
    LeaningForward,
    /// Heels lifting off the floor
    HeelsRising,
    // Lateral raise
    /// Traps taking over the raise
    Shrugging,
    /// Elbows bent too far
    ElbowBending,
    /// Arms raised above shoulder level
    RaisingTooHigh,
    /// Arms moving unevenly
    AsymmetricMovement,
    // Lunge
    /// Front knee not stacked over the ankle
    FrontKneeAlignment,
    /// Back knee dropping to the floor
    BackKneeDrop,
    /// Torso pitching forward
    TorsoLeaning,
    /// Weight shifted to one side
    UnevenWeight,
    // Shoulder press
    /// Lumbar overextension under load
    BackOverarching,
    /// Elbows flaring outward
    ElbowsSplaying,
    /// Lockout not reached
    IncompleteExtension,
    /// Head pushed forward
    ForwardHead,
}

/// Fixed catalog entry for one issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueEntry {
    /// The issue this entry describes
    pub issue: FormIssue,
    /// Stable storage key
    pub key: &'static str,
    /// Fixed severity
    pub severity: Severity,
    /// Short description of the defect
    pub description: &'static str,
    /// Corrective cue
    pub tip: &'static str,
}

const fn entry(
    issue: FormIssue,
    key: &'static str,
    severity: Severity,
    description: &'static str,
    tip: &'static str,
) -> IssueEntry {
    IssueEntry {
        issue,
        key,
        severity,
        description,
        tip,
    }
}

/// Static issue catalog, indexed by `FormIssue as usize`
#[rustfmt::skip]
pub static ISSUE_CATALOG: [IssueEntry; 21] = [
    entry(FormIssue::ElbowSwinging, "elbow_swinging", Severity::Moderate,
        "Elbow swinging during curl", "Keep your elbows fixed to your sides"),
    entry(FormIssue::WristRotation, "wrist_rotation", Severity::Minor,
        "Excessive wrist rotation", "Keep wrists neutral throughout movement"),
    entry(FormIssue::ShoulderRaising, "shoulder_raising", Severity::Moderate,
        "Raising shoulders during curl", "Keep shoulders down and back"),
    entry(FormIssue::BackArching, "back_arching", Severity::Severe,
        "Arching back during curl", "Maintain neutral spine, avoid leaning back"),
    entry(FormIssue::KneeInward, "knee_inward", Severity::Severe,
        "Knees caving inward", "Push knees outward in line with toes"),
    entry(FormIssue::KneesOverToes, "knees_over_toes", Severity::Moderate,
        "Knees extending past toes", "Shift weight to heels, knees behind toes"),
    entry(FormIssue::ShallowDepth, "shallow_depth", Severity::Minor,
        "Not reaching proper squat depth", "Lower until thighs are parallel to ground"),
    entry(FormIssue::LeaningForward, "leaning_forward", Severity::Moderate,
        "Excessive forward lean", "Keep chest up, maintain upright torso"),
    entry(FormIssue::HeelsRising, "heels_rising", Severity::Moderate,
        "Heels coming off the ground", "Keep weight on heels, whole foot should stay grounded"),
    entry(FormIssue::Shrugging, "shrugging", Severity::Moderate,
        "Shrugging shoulders during raise", "Keep shoulders relaxed and down"),
    entry(FormIssue::ElbowBending, "elbow_bending", Severity::Minor,
        "Excessive elbow bending", "Maintain slight elbow bend throughout"),
    entry(FormIssue::RaisingTooHigh, "raising_too_high", Severity::Minor,
        "Raising arms too high", "Raise arms to shoulder level, not higher"),
    entry(FormIssue::AsymmetricMovement, "asymmetric_movement", Severity::Moderate,
        "Uneven arm movement", "Keep both arms moving at the same height"),
    entry(FormIssue::FrontKneeAlignment, "front_knee_alignment", Severity::Severe,
        "Front knee not aligned with ankle", "Keep front knee directly above ankle"),
    entry(FormIssue::BackKneeDrop, "back_knee_drop", Severity::Moderate,
        "Back knee dropping too low", "Back knee should hover just above ground"),
    entry(FormIssue::TorsoLeaning, "torso_leaning", Severity::Moderate,
        "Leaning torso too far forward", "Keep torso upright, shoulders back"),
    entry(FormIssue::UnevenWeight, "uneven_weight", Severity::Moderate,
        "Uneven weight distribution", "Weight should be evenly distributed"),
    entry(FormIssue::BackOverarching, "back_overarching", Severity::Severe,
        "Overarching back", "Engage core to maintain neutral spine"),
    entry(FormIssue::ElbowsSplaying, "elbows_splaying", Severity::Moderate,
        "Elbows splaying outward", "Keep elbows pointing forward"),
    entry(FormIssue::IncompleteExtension, "incomplete_extension", Severity::Minor,
        "Incomplete arm extension", "Fully extend arms at top of movement"),
    entry(FormIssue::ForwardHead, "forward_head", Severity::Moderate,
        "Head pushing forward", "Keep head in neutral position, chin tucked"),
];

impl FormIssue {
    /// Catalog entry for this issue
    #[must_use]
    pub fn entry(self) -> &'static IssueEntry {
        &ISSUE_CATALOG[self as usize]
    }

    /// Fixed severity
    #[must_use]
    pub fn severity(self) -> Severity {
        self.entry().severity
    }

    /// Fixed corrective tip
    #[must_use]
    pub fn tip(self) -> &'static str {
        self.entry().tip
    }

    /// Fixed description
    #[must_use]
    pub fn description(self) -> &'static str {
        self.entry().description
    }

    /// Convert to database string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.entry().key
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        ISSUE_CATALOG
            .iter()
            .find(|entry| entry.key == s)
            .map(|entry| entry.issue)
    }
}

/// Overall quality of one repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormRating {
    /// No issues
    Perfect,
    /// Minor issues only
    Good,
    /// Exactly one moderate issue
    Fair,
    /// Several moderate issues
    NeedsWork,
    /// At least one severe issue
    Poor,
}

impl FormRating {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsWork => "needs_work",
            Self::Poor => "poor",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "perfect" => Self::Perfect,
            "good" => Self::Good,
            "fair" => Self::Fair,
            "needs_work" => Self::NeedsWork,
            // Unknown values are treated as the worst rating
            _ => Self::Poor,
        }
    }

    /// Label for display surfaces
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect Form",
            Self::Good => "Good Form",
            Self::Fair => "Fair Form",
            Self::NeedsWork => "Needs Work",
            Self::Poor => "Poor Form",
        }
    }
}

/// Tempo of one repetition relative to the exercise's ideal window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedRating {
    /// Shorter than the window
    TooFast,
    /// Inside the window
    GoodPace,
    /// Longer than the window
    TooSlow,
}

impl SpeedRating {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooFast => "too_fast",
            Self::GoodPace => "good_pace",
            Self::TooSlow => "too_slow",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "too_fast" => Self::TooFast,
            "too_slow" => Self::TooSlow,
            _ => Self::GoodPace,
        }
    }

    /// Label for display surfaces
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::TooFast => "Too Fast",
            Self::GoodPace => "Good Pace",
            Self::TooSlow => "Too Slow",
        }
    }
}

/// Judgment for one completed repetition; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepFeedback {
    /// Controlling angle at completion
    pub angle: f64,
    /// Distinct issues detected, in catalog order
    pub issues: BTreeSet<FormIssue>,
    /// Overall form rating
    pub form_rating: FormRating,
    /// Tempo rating
    pub speed_rating: SpeedRating,
    /// Corrective tip or encouragement
    pub tip: String,
}

impl RepFeedback {
    /// Whether this repetition was performed with perfect form
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.form_rating == FormRating::Perfect
    }
}
