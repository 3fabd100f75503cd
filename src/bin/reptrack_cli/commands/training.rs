// ABOUTME: Training feedback commands for reptrack-cli
// ABOUTME: Handles workout ratings, recommendations, and the difficulty batch readout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use reptrack::coach::AdaptiveCoach;
use reptrack::config::RuntimeConfig;
use reptrack::database::Store;
use reptrack_core::models::Rating;
use reptrack_intelligence::difficulty::{batch_reward, batch_state};
use reptrack_intelligence::recommender::recommend as rank_workouts;
use std::sync::Arc;
use tracing::info;

use crate::helpers::display::{display_batch_state, display_recommendations};

/// Rate a saved workout and show refreshed recommendations
pub async fn rate(
    store: Arc<dyn Store>,
    config: &RuntimeConfig,
    workout_id: String,
    value: u8,
) -> Result<()> {
    if store.workout_with_details(&workout_id).await?.is_none() {
        bail!("Workout {workout_id} not found");
    }
    let rating = Rating::new(workout_id, value)?;
    let coach = AdaptiveCoach::new(store, &config.intelligence);
    let recommendations = coach.refresh_recommendations(&rating).await?;
    info!(workout_id = %rating.workout_id, value, "rating stored");

    println!("Rated workout {} with {value}/5", rating.workout_id);
    display_recommendations(&recommendations);
    Ok(())
}

/// Rank saved workouts against the most recently rated one
pub async fn recommend(store: &dyn Store, top_k: usize) -> Result<()> {
    let ratings = store.all_ratings().await?;
    display_recommendations(&rank_workouts(&ratings, top_k));
    Ok(())
}

/// Show the newest sample batch and the reward the controller would assign
pub async fn difficulty(store: &dyn Store, config: &RuntimeConfig) -> Result<()> {
    let settings = &config.intelligence.difficulty;
    let recent = store.recent_samples(settings.batch_size).await?;
    if recent.len() < settings.batch_size {
        println!(
            "Difficulty batch has {} of {} samples; the controller has not stepped yet.",
            recent.len(),
            settings.batch_size
        );
        return Ok(());
    }
    let state = batch_state(&recent);
    let reward = batch_reward(state, settings.target_angle, settings.reward_tolerance);
    display_batch_state(state, settings.target_angle, reward);
    Ok(())
}
