// ABOUTME: Workout history commands for reptrack-cli
// ABOUTME: Handles list, show, stats, and delete operations on saved workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use reptrack::database::Store;
use serde::Serialize;
use tracing::info;

use crate::helpers::display::{display_stats, display_workout_details, display_workout_list};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// List saved workouts, newest first
pub async fn list(store: &dyn Store, limit: Option<u32>, json: bool) -> Result<()> {
    let workouts = store.list_workouts(limit).await?;
    if json {
        return print_json(&workouts);
    }
    display_workout_list(&workouts);
    Ok(())
}

/// Show one workout with its reps
pub async fn show(store: &dyn Store, workout_id: &str, json: bool) -> Result<()> {
    let Some(details) = store.workout_with_details(workout_id).await? else {
        bail!("Workout {workout_id} not found");
    };
    if json {
        return print_json(&details);
    }
    display_workout_details(&details);
    Ok(())
}

/// Totals across all workouts
pub async fn stats(store: &dyn Store, json: bool) -> Result<()> {
    let stats = store.workout_stats().await?;
    if json {
        return print_json(&stats);
    }
    display_stats(&stats);
    Ok(())
}

/// Delete a workout and its reps
pub async fn delete(store: &dyn Store, workout_id: &str) -> Result<()> {
    if !store.delete_workout(workout_id).await? {
        bail!("Workout {workout_id} not found");
    }
    info!(workout_id, "workout deleted");
    println!("Deleted workout {workout_id}");
    Ok(())
}
