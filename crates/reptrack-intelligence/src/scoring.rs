// ABOUTME: Workout scorer aggregating per-repetition feedback into a 0-100 score
// ABOUTME: Fixed rating points weighted by tempo, plus the score to auto-rating mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reptrack_core::models::{FormRating, Grade, RepFeedback, SpeedRating};

/// Base points for a form rating
#[must_use]
pub const fn rating_points(rating: FormRating) -> f64 {
    match rating {
        FormRating::Perfect => 100.0,
        FormRating::Good => 80.0,
        FormRating::Fair => 60.0,
        FormRating::NeedsWork => 40.0,
        FormRating::Poor => 20.0,
    }
}

/// Tempo multiplier applied to the base points
#[must_use]
pub const fn speed_modifier(rating: SpeedRating) -> f64 {
    match rating {
        SpeedRating::GoodPace => 1.0,
        SpeedRating::TooFast => 0.8,
        SpeedRating::TooSlow => 0.9,
    }
}

/// Weighted points for one repetition
#[must_use]
pub fn rep_points(feedback: &RepFeedback) -> f64 {
    rating_points(feedback.form_rating) * speed_modifier(feedback.speed_rating)
}

/// Rounded mean of weighted points; 0 for an empty session
#[must_use]
pub fn workout_score(feedbacks: &[RepFeedback]) -> u8 {
    if feedbacks.is_empty() {
        return 0;
    }
    let total: f64 = feedbacks.iter().map(rep_points).sum();
    let mean = total / feedbacks.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

/// Letter grade for a session
#[must_use]
pub fn workout_grade(feedbacks: &[RepFeedback]) -> Grade {
    Grade::from_score(workout_score(feedbacks))
}

/// 1-5 rating submitted automatically after a workout is saved
#[must_use]
pub const fn rating_from_score(score: u8) -> u8 {
    match score {
        85.. => 5,
        70..=84 => 4,
        55..=69 => 3,
        40..=54 => 2,
        _ => 1,
    }
}
