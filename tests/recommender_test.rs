// ABOUTME: Integration tests for rating-vector workout recommendations
// ABOUTME: Validates the reference-workout ranking, similarity properties, and truncation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use reptrack_core::models::Rating;
use reptrack_intelligence::recommender::{
    cosine_similarity, rating_vectors, recommend, recommend_ids,
};

fn rating(id: &str, value: u8) -> Rating {
    Rating::new(id, value).unwrap()
}

#[test]
fn test_latest_rated_workout_is_the_reference() {
    let ratings = [rating("W2", 4), rating("W3", 1), rating("W1", 5)];
    assert_eq!(recommend_ids(&ratings, 3), vec!["W2", "W3"]);
}

#[test]
fn test_fewer_than_two_ratings_yield_nothing() {
    assert!(recommend(&[], 3).is_empty());
    assert!(recommend(&[rating("W1", 5)], 3).is_empty());
}

#[test]
fn test_only_reference_workout_yields_nothing() {
    let ratings = [rating("W1", 5), rating("W1", 3)];
    assert!(recommend(&ratings, 3).is_empty());
}

#[test]
fn test_more_similar_workouts_rank_first() {
    let ratings = [
        rating("far", 5),
        rating("far", 1),
        rating("near", 4),
        rating("near", 2),
        rating("ref", 4),
        rating("ref", 2),
    ];
    let ranked = recommend(&ratings, 5);
    assert_eq!(ranked[0].workout_id, "near");
    assert!((ranked[0].similarity - 1.0).abs() < 1e-9);
    assert!(ranked[1].similarity < ranked[0].similarity);
}

#[test]
fn test_results_truncate_to_k() {
    let mut ratings: Vec<Rating> = (0..6).map(|i| rating(&format!("W{i}"), 3)).collect();
    ratings.push(rating("ref", 4));
    let ids = recommend_ids(&ratings, 2);
    assert_eq!(ids, vec!["W0", "W1"]);
}

#[test]
fn test_cosine_similarity_is_symmetric() {
    let a = [4.0, 2.0, 5.0];
    let b = [1.0, 3.0];
    assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-12);
    assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
}

#[test]
fn test_vectors_group_ratings_per_workout() {
    let ratings = [rating("a", 2), rating("b", 5), rating("a", 4)];
    let vectors = rating_vectors(&ratings);
    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors[0], ("a".to_owned(), vec![2.0, 4.0]));
    assert_eq!(vectors[1], ("b".to_owned(), vec![5.0]));
}
