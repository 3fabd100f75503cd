// ABOUTME: Collaborative-filtering recommender ranking past workouts by rating-vector similarity
// ABOUTME: Cosine similarity against the most recently rated workout, top-k in stable order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommender
//!
//! Ratings are grouped per workout, in the order each workout first appears,
//! into rating vectors. The workout of the last rating is the reference; every
//! other workout is scored by cosine similarity to it and the best `k` are
//! returned. Equal similarities keep first-appearance order.

use rayon::prelude::*;
use reptrack_core::constants::recommendation::MIN_RATINGS;
use reptrack_core::models::Rating;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggested workout
    pub workout_id: String,
    /// Cosine similarity to the reference workout
    pub similarity: f64,
}

/// Cosine similarity of two rating vectors
///
/// The dot product runs over the common prefix while each magnitude uses the
/// whole vector. Returns 0 when either magnitude is 0.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot / (magnitude_a * magnitude_b)
    }
}

/// Group ratings into per-workout vectors, keeping first-appearance order
#[must_use]
pub fn rating_vectors(ratings: &[Rating]) -> Vec<(String, Vec<f64>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut vectors: Vec<(String, Vec<f64>)> = Vec::new();
    for rating in ratings {
        let index = *positions.entry(rating.workout_id.as_str()).or_insert_with(|| {
            vectors.push((rating.workout_id.clone(), Vec::new()));
            vectors.len() - 1
        });
        vectors[index].1.push(f64::from(rating.value));
    }
    vectors
}

/// Up to `k` workouts most similar to the most recently rated one
///
/// Returns an empty list for fewer than two ratings.
#[must_use]
pub fn recommend(ratings: &[Rating], k: usize) -> Vec<Recommendation> {
    if ratings.len() < MIN_RATINGS {
        return Vec::new();
    }
    let Some(latest) = ratings.last() else {
        return Vec::new();
    };

    let vectors = rating_vectors(ratings);
    let Some((_, reference)) = vectors.iter().find(|(id, _)| *id == latest.workout_id) else {
        return Vec::new();
    };

    let mut ranked: Vec<Recommendation> = vectors
        .par_iter()
        .filter(|(id, _)| *id != latest.workout_id)
        .map(|(id, vector)| Recommendation {
            workout_id: id.clone(),
            similarity: cosine_similarity(reference, vector),
        })
        .collect();

    // Stable sort keeps first-appearance order among equal similarities
    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked.truncate(k);
    ranked
}

/// Workout identifiers of [`recommend`]
#[must_use]
pub fn recommend_ids(ratings: &[Rating], k: usize) -> Vec<String> {
    recommend(ratings, k)
        .into_iter()
        .map(|r| r.workout_id)
        .collect()
}
