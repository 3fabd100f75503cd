// ABOUTME: Post-workout analysis of repetition feedback: grade, issue frequency, and coaching advice
// ABOUTME: Produces the focus recommendation, tempo advice, and per-rep angle progression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::scoring::workout_score;
use reptrack_core::models::{ExerciseKind, FormIssue, Grade, RepFeedback, SpeedRating};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Shown when a workout had no form issues
pub const EXCELLENT_FORM_MESSAGE: &str = "Your form was excellent! Keep up the good work.";

/// Pace guidance derived from the share of mistimed repetitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoAdvice {
    /// More than a third of reps were too fast
    SlowDown,
    /// More than a third of reps were too slow
    SpeedUp,
    /// Pace was fine overall
    Steady,
}

impl TempoAdvice {
    /// Coaching sentence
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::SlowDown => {
                "Try slowing down your movements for better muscle engagement and control."
            }
            Self::SpeedUp => {
                "Consider a slightly faster pace to maintain tension throughout the movement."
            }
            Self::Steady => "Your exercise tempo is good. Keep up the consistent pace!",
        }
    }

    /// Advice for a session; a third is measured with integer division
    #[must_use]
    pub fn from_feedback(feedbacks: &[RepFeedback]) -> Self {
        let third = feedbacks.len() / 3;
        let count = |rating: SpeedRating| {
            feedbacks
                .iter()
                .filter(|f| f.speed_rating == rating)
                .count()
        };
        if count(SpeedRating::TooFast) > third {
            Self::SlowDown
        } else if count(SpeedRating::TooSlow) > third {
            Self::SpeedUp
        } else {
            Self::Steady
        }
    }
}

/// Exercise-specific progression cue
#[must_use]
pub const fn exercise_advice(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::BicepCurl => {
            "Try adding more weight or increasing reps to challenge yourself."
        }
        ExerciseKind::Squat => "Focus on depth and keeping your weight on your heels.",
        ExerciseKind::LateralRaise => "Keep the movement controlled and avoid using momentum.",
        ExerciseKind::Lunge => "Focus on balance and knee alignment during the movement.",
        ExerciseKind::ShoulderPress => "Maintain core engagement throughout the exercise.",
    }
}

/// Full breakdown of a finished workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAnalysis {
    /// Workout score
    pub score: u8,
    /// Letter grade of the score
    pub grade: Grade,
    /// Integer percent of perfect reps
    pub perfect_form_percentage: u32,
    /// How many reps showed each issue
    pub issue_frequency: BTreeMap<FormIssue, u32>,
    /// Most frequent issue, earliest in catalog order on ties
    pub most_common_issue: Option<FormIssue>,
    /// "Focus on: <tip>" or praise
    pub primary_recommendation: String,
    /// Exercise-specific cue
    pub secondary_recommendation: String,
    /// Pace guidance
    pub tempo_advice: TempoAdvice,
    /// Completion angle of each rep in order
    pub progression: Vec<f64>,
}

impl WorkoutAnalysis {
    /// Analyze the feedback list of one session
    #[must_use]
    pub fn from_feedback(kind: ExerciseKind, feedbacks: &[RepFeedback]) -> Self {
        let score = workout_score(feedbacks);

        let mut issue_frequency: BTreeMap<FormIssue, u32> = BTreeMap::new();
        for issue in feedbacks.iter().flat_map(|f| f.issues.iter()) {
            *issue_frequency.entry(*issue).or_default() += 1;
        }

        let most_common_issue = issue_frequency
            .iter()
            .min_by_key(|(issue, count)| (Reverse(**count), **issue))
            .map(|(issue, _)| *issue);

        let primary_recommendation = most_common_issue.map_or_else(
            || EXCELLENT_FORM_MESSAGE.to_owned(),
            |issue| format!("Focus on: {}", issue.tip()),
        );

        let perfect = feedbacks.iter().filter(|f| f.is_perfect()).count();
        let perfect_form_percentage = if feedbacks.is_empty() {
            0
        } else {
            (perfect * 100 / feedbacks.len()) as u32
        };

        Self {
            score,
            grade: Grade::from_score(score),
            perfect_form_percentage,
            issue_frequency,
            most_common_issue,
            primary_recommendation,
            secondary_recommendation: exercise_advice(kind).to_owned(),
            tempo_advice: TempoAdvice::from_feedback(feedbacks),
            progression: feedbacks.iter().map(|f| f.angle).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::models::FormRating;

    fn rep(
        issues: &[FormIssue],
        form_rating: FormRating,
        speed_rating: SpeedRating,
    ) -> RepFeedback {
        RepFeedback {
            angle: 55.0,
            issues: issues.iter().copied().collect(),
            form_rating,
            speed_rating,
            tip: String::new(),
        }
    }

    #[test]
    fn focus_on_most_common_issue() {
        let feedbacks = vec![
            rep(&[FormIssue::ShoulderRaising], FormRating::Fair, SpeedRating::GoodPace),
            rep(
                &[FormIssue::ShoulderRaising, FormIssue::WristRotation],
                FormRating::Fair,
                SpeedRating::GoodPace,
            ),
            rep(&[], FormRating::Perfect, SpeedRating::GoodPace),
        ];
        let analysis = WorkoutAnalysis::from_feedback(ExerciseKind::BicepCurl, &feedbacks);
        assert_eq!(analysis.most_common_issue, Some(FormIssue::ShoulderRaising));
        assert_eq!(
            analysis.primary_recommendation,
            "Focus on: Keep shoulders down and back"
        );
        assert_eq!(analysis.perfect_form_percentage, 33);
        assert_eq!(analysis.issue_frequency.get(&FormIssue::WristRotation), Some(&1));
    }

    #[test]
    fn clean_session_gets_praise() {
        let feedbacks = vec![rep(&[], FormRating::Perfect, SpeedRating::GoodPace)];
        let analysis = WorkoutAnalysis::from_feedback(ExerciseKind::Squat, &feedbacks);
        assert_eq!(analysis.primary_recommendation, EXCELLENT_FORM_MESSAGE);
        assert_eq!(analysis.grade, Grade::APlus);
        assert_eq!(analysis.tempo_advice, TempoAdvice::Steady);
    }

    #[test]
    fn tempo_advice_uses_a_third_of_reps() {
        let fast = rep(&[], FormRating::Perfect, SpeedRating::TooFast);
        let good = rep(&[], FormRating::Perfect, SpeedRating::GoodPace);
        let slow = rep(&[], FormRating::Perfect, SpeedRating::TooSlow);

        // 6 reps: a third is 2, so 2 fast reps are not "more than a third"
        let mut session = vec![fast.clone(), fast.clone(), good.clone(), good.clone(), good, slow];
        assert_eq!(TempoAdvice::from_feedback(&session), TempoAdvice::Steady);

        session.push(fast);
        assert_eq!(TempoAdvice::from_feedback(&session), TempoAdvice::SlowDown);
    }
}
