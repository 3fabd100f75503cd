// ABOUTME: Maps raw anomaly tags, completion angle, and tempo into per-repetition feedback
// ABOUTME: Static per-exercise tag tables feed a severity-priority form rating and tip choice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Form Classifier
//!
//! Raw tags come from an external posture analyzer and are free-form strings.
//! Each exercise owns a static table translating the tags it understands into
//! [`FormIssue`]s; anything else is ignored so new analyzer tags never break
//! classification.

use crate::config::intelligence::{ExerciseConfig, TempoWindow};
use reptrack_core::constants::ENCOURAGEMENT_TIP;
use reptrack_core::models::{
    ExerciseKind, FormIssue, FormRating, RepFeedback, Severity, SpeedRating,
};
use std::cmp::Reverse;
use std::collections::BTreeSet;
use tracing::trace;

type TagTable = &'static [(&'static str, FormIssue)];

const BICEP_CURL_TAGS: TagTable = &[
    ("elbow_away_from_body", FormIssue::ElbowSwinging),
    ("elbow_swinging", FormIssue::ElbowSwinging),
    ("wrist_rotation", FormIssue::WristRotation),
    ("shoulder_raised", FormIssue::ShoulderRaising),
    ("shoulder_raising", FormIssue::ShoulderRaising),
    ("back_arching", FormIssue::BackArching),
];

const SQUAT_TAGS: TagTable = &[
    ("knees_inward", FormIssue::KneeInward),
    ("knee_inward", FormIssue::KneeInward),
    ("knees_over_toes", FormIssue::KneesOverToes),
    ("shallow_depth", FormIssue::ShallowDepth),
    ("leaning_forward", FormIssue::LeaningForward),
    ("heels_rising", FormIssue::HeelsRising),
];

const LATERAL_RAISE_TAGS: TagTable = &[
    ("shoulder_shrugging", FormIssue::Shrugging),
    ("shrugging", FormIssue::Shrugging),
    ("elbows_too_bent", FormIssue::ElbowBending),
    ("elbow_bending", FormIssue::ElbowBending),
    ("arms_too_high", FormIssue::RaisingTooHigh),
    ("raising_too_high", FormIssue::RaisingTooHigh),
    ("asymmetric_movement", FormIssue::AsymmetricMovement),
];

const LUNGE_TAGS: TagTable = &[
    ("knees_over_toes", FormIssue::FrontKneeAlignment),
    ("front_knee_alignment", FormIssue::FrontKneeAlignment),
    ("back_knee_drop", FormIssue::BackKneeDrop),
    ("torso_leaning", FormIssue::TorsoLeaning),
    ("leaning_forward", FormIssue::TorsoLeaning),
    ("uneven_weight", FormIssue::UnevenWeight),
];

const SHOULDER_PRESS_TAGS: TagTable = &[
    ("back_arching", FormIssue::BackOverarching),
    ("back_overarching", FormIssue::BackOverarching),
    ("elbows_splayed", FormIssue::ElbowsSplaying),
    ("elbows_splaying", FormIssue::ElbowsSplaying),
    ("incomplete_extension", FormIssue::IncompleteExtension),
    ("forward_head", FormIssue::ForwardHead),
];

const fn tag_table(kind: ExerciseKind) -> TagTable {
    match kind {
        ExerciseKind::BicepCurl => BICEP_CURL_TAGS,
        ExerciseKind::Squat => SQUAT_TAGS,
        ExerciseKind::LateralRaise => LATERAL_RAISE_TAGS,
        ExerciseKind::Lunge => LUNGE_TAGS,
        ExerciseKind::ShoulderPress => SHOULDER_PRESS_TAGS,
    }
}

/// Translate raw tags into the distinct issues this exercise recognizes
pub fn map_tags<S: AsRef<str>>(kind: ExerciseKind, tags: &[S]) -> BTreeSet<FormIssue> {
    let table = tag_table(kind);
    tags.iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            let issue = table
                .iter()
                .find(|(raw, _)| *raw == tag)
                .map(|(_, issue)| *issue);
            if issue.is_none() {
                trace!(exercise = %kind, tag, "ignoring unmapped anomaly tag");
            }
            issue
        })
        .collect()
}

/// Overall rating from the issue set, first matching rule wins:
/// none ⇒ Perfect, any severe ⇒ Poor, several moderate ⇒ `NeedsWork`,
/// one moderate ⇒ Fair, otherwise Good
#[must_use]
pub fn form_rating(issues: &BTreeSet<FormIssue>) -> FormRating {
    if issues.is_empty() {
        return FormRating::Perfect;
    }
    if issues.iter().any(|i| i.severity() == Severity::Severe) {
        return FormRating::Poor;
    }
    match issues
        .iter()
        .filter(|i| i.severity() == Severity::Moderate)
        .count()
    {
        0 => FormRating::Good,
        1 => FormRating::Fair,
        _ => FormRating::NeedsWork,
    }
}

/// Tip of the most severe issue, earliest in catalog order on ties
#[must_use]
pub fn tip_for(issues: &BTreeSet<FormIssue>) -> &'static str {
    issues
        .iter()
        .min_by_key(|issue| (Reverse(issue.severity()), **issue))
        .map_or(ENCOURAGEMENT_TIP, |issue| issue.tip())
}

/// Tempo rating against an inclusive ideal window
#[must_use]
pub const fn speed_rating(duration_ms: u64, window: TempoWindow) -> SpeedRating {
    if duration_ms < window.min_ms {
        SpeedRating::TooFast
    } else if duration_ms > window.max_ms {
        SpeedRating::TooSlow
    } else {
        SpeedRating::GoodPace
    }
}

/// Stateless classifier bound to a set of exercise tempo windows
#[derive(Debug, Clone, Default)]
pub struct FormClassifier {
    exercises: ExerciseConfig,
}

impl FormClassifier {
    /// Classifier using the given per-exercise settings
    #[must_use]
    pub const fn new(exercises: ExerciseConfig) -> Self {
        Self { exercises }
    }

    /// Judge one completed repetition
    #[must_use]
    pub fn classify<S: AsRef<str>>(
        &self,
        kind: ExerciseKind,
        angle: f64,
        tags: &[S],
        duration_ms: u64,
    ) -> RepFeedback {
        let issues = map_tags(kind, tags);
        let form_rating = form_rating(&issues);
        let tip = tip_for(&issues).to_owned();
        RepFeedback {
            angle,
            form_rating,
            speed_rating: speed_rating(duration_ms, self.exercises.settings(kind).tempo),
            tip,
            issues,
        }
    }
}
