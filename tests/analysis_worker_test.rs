// ABOUTME: Integration tests for the dedicated frame analysis thread and its command queue
// ABOUTME: Covers target auto-finish, shutdown semantics, skipped frames, and exercise switching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{curl_frame, init_test_logging};
use reptrack::errors::ErrorCode;
use reptrack::session::FinishedWorkout;
use reptrack::worker::{AnalysisCommand, AnalysisEvent, AnalysisHandle};
use reptrack_core::models::{ExerciseKind, FrameLandmarks, Joint};
use reptrack_intelligence::analyzer::FrameInput;
use reptrack_intelligence::config::intelligence::ExerciseConfig;
use tokio::sync::{mpsc, watch};

fn spawn_worker(
    exercise: ExerciseKind,
    difficulty: u32,
) -> Result<(AnalysisHandle, mpsc::UnboundedReceiver<AnalysisEvent>, watch::Sender<u32>)> {
    init_test_logging();
    let (difficulty_tx, difficulty_rx) = watch::channel(difficulty);
    let (handle, events) =
        AnalysisHandle::spawn(ExerciseConfig::default(), exercise, 4, difficulty_rx)?;
    Ok((handle, events, difficulty_tx))
}

/// Alternating extension and flexion, one rep per arm every two frames
async fn send_curls(handle: &AnalysisHandle, start_ms: u64, reps: u64) -> Result<()> {
    for i in 0..reps {
        let base = start_ms + i * 10_000;
        handle.send_frame(curl_frame(base, 170.0, &[])).await?;
        handle.send_frame(curl_frame(base + 5000, 60.0, &[])).await?;
    }
    Ok(())
}

async fn collect(mut events: mpsc::UnboundedReceiver<AnalysisEvent>) -> Vec<AnalysisEvent> {
    let mut all = Vec::new();
    while let Some(event) = events.recv().await {
        all.push(event);
    }
    all
}

fn finished(events: &[AnalysisEvent]) -> Vec<&FinishedWorkout> {
    events
        .iter()
        .filter_map(|event| match event {
            AnalysisEvent::WorkoutFinished(done) => Some(done.as_ref()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_workout_finishes_at_target() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::BicepCurl, 3)?;
    handle
        .send(AnalysisCommand::StartWorkout {
            target_reps: Some(4),
        })
        .await?;
    send_curls(&handle, 0, 3).await?;
    let stats = handle.shutdown().await?;

    let events = collect(events).await;
    let done = finished(&events);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].summary.total_reps, 4);
    assert_eq!(done[0].summary.difficulty_at_end, 3);
    assert_eq!(done[0].summary.duration_ms, 15_000);

    // Counting continues after the target, the session just stops recording
    assert_eq!(stats.reps_detected, 6);
    assert_eq!(stats.workouts_finished, 1);
    assert!(matches!(
        events.first(),
        Some(AnalysisEvent::WorkoutStarted {
            exercise: ExerciseKind::BicepCurl,
            target_reps: Some(4)
        })
    ));
    Ok(())
}

#[tokio::test]
async fn test_shutdown_finishes_open_workout() -> Result<()> {
    let (handle, events, difficulty) = spawn_worker(ExerciseKind::BicepCurl, 1)?;
    handle
        .send(AnalysisCommand::StartWorkout { target_reps: None })
        .await?;
    send_curls(&handle, 0, 2).await?;
    difficulty.send_replace(5);
    let stats = handle.shutdown().await?;

    let events = collect(events).await;
    let done = finished(&events);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].summary.total_reps, 4);
    assert_eq!(done[0].summary.difficulty_at_end, 5);
    assert_eq!(stats.frames_analyzed, 4);
    Ok(())
}

#[tokio::test]
async fn test_frames_without_session_still_report_reps() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::BicepCurl, 1)?;
    send_curls(&handle, 0, 1).await?;
    handle.shutdown().await?;

    let events = collect(events).await;
    assert!(finished(&events).is_empty());
    let reps: Vec<bool> = events
        .iter()
        .flat_map(|event| match event {
            AnalysisEvent::Frame(report) => {
                report.completed.iter().map(|rep| rep.counted).collect()
            }
            _ => Vec::new(),
        })
        .collect();
    assert_eq!(reps, vec![false, false]);
    Ok(())
}

#[tokio::test]
async fn test_unusable_frames_are_skipped() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::BicepCurl, 1)?;
    handle.send_frame(curl_frame(0, 170.0, &[])).await?;
    handle
        .send_frame(FrameInput {
            timestamp_ms: 1000,
            landmarks: FrameLandmarks::new(vec![Joint::new(0.5, 0.5); 5]),
            tags: Vec::new(),
        })
        .await?;
    handle.send_frame(curl_frame(2000, 60.0, &[])).await?;
    let stats = handle.shutdown().await?;

    assert_eq!(stats.frames_analyzed, 2);
    assert_eq!(stats.frames_skipped, 1);
    assert_eq!(stats.reps_detected, 2);

    let events = collect(events).await;
    let skipped: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AnalysisEvent::FrameSkipped {
                timestamp_ms, code, ..
            } => Some((*timestamp_ms, *code)),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec![(1000, ErrorCode::InsufficientLandmarks)]);
    Ok(())
}

#[tokio::test]
async fn test_switching_exercise_closes_the_session() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::BicepCurl, 1)?;
    handle
        .send(AnalysisCommand::StartWorkout { target_reps: None })
        .await?;
    send_curls(&handle, 0, 1).await?;
    handle
        .send(AnalysisCommand::SetExercise(ExerciseKind::ShoulderPress))
        .await?;
    // Counters restarted, so this flexion alone does not count
    handle.send_frame(curl_frame(20_000, 60.0, &[])).await?;
    let stats = handle.shutdown().await?;

    let events = collect(events).await;
    let done = finished(&events);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].summary.exercise_kind, ExerciseKind::BicepCurl);
    assert_eq!(stats.reps_detected, 2);
    Ok(())
}

#[tokio::test]
async fn test_stop_then_restart_produces_two_workouts() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::BicepCurl, 1)?;
    handle
        .send(AnalysisCommand::StartWorkout { target_reps: None })
        .await?;
    send_curls(&handle, 0, 1).await?;
    handle.send(AnalysisCommand::StopWorkout).await?;
    handle
        .send(AnalysisCommand::StartWorkout { target_reps: None })
        .await?;
    send_curls(&handle, 20_000, 2).await?;
    handle.shutdown().await?;

    let events = collect(events).await;
    let totals: Vec<u32> = finished(&events)
        .iter()
        .map(|done| done.summary.total_reps)
        .collect();
    assert_eq!(totals, vec![2, 4]);
    Ok(())
}

#[tokio::test]
async fn test_zero_capacity_queue_is_rejected() {
    let (_tx, rx) = watch::channel(1);
    let error = AnalysisHandle::spawn(ExerciseConfig::default(), ExerciseKind::Squat, 0, rx)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_dropped_handle_lets_worker_exit() -> Result<()> {
    let (handle, events, _difficulty) = spawn_worker(ExerciseKind::Lunge, 1)?;
    handle
        .send(AnalysisCommand::StartWorkout { target_reps: None })
        .await?;
    let stats = handle.join().await?;

    // Closing the queue finishes the empty session too
    assert_eq!(stats.workouts_finished, 1);
    let events = collect(events).await;
    assert_eq!(finished(&events)[0].summary.total_reps, 0);
    Ok(())
}
