// ABOUTME: Integration tests for the adaptive coach's difficulty and recommendation loops
// ABOUTME: Uses the in-memory store plus failing and stalled store doubles for error and abort paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use async_trait::async_trait;
use common::{create_test_store, curl_frame};
use reptrack::coach::AdaptiveCoach;
use reptrack::database::{SqliteStore, Store};
use reptrack::errors::{AppError, AppResult, ErrorCode};
use reptrack::session::WorkoutSession;
use reptrack::worker::{AnalysisCommand, AnalysisEvent, AnalysisHandle};
use reptrack_core::models::{
    DifficultyState, ExerciseKind, Rating, RepFeedback, Sample, WorkoutDetails, WorkoutRecord,
    WorkoutStats, WorkoutSummary,
};
use reptrack_intelligence::analyzer::FrameAnalyzer;
use reptrack_intelligence::config::intelligence::{DifficultyConfig, ExerciseConfig};
use reptrack_intelligence::config::IntelligenceConfig;
use reptrack_intelligence::difficulty::{DifficultyController, DifficultyPolicy};
use std::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Always raises the difficulty
#[derive(Debug, Default)]
struct RaisePolicy;

impl DifficultyPolicy for RaisePolicy {
    fn select_action(&mut self, _state: DifficultyState) -> i32 {
        1
    }

    fn update(&mut self, _: DifficultyState, _: i32, _: f64, _: DifficultyState) {}
}

/// Delegates to a real store but can fail batch reads or stall sample writes
struct ScriptedStore {
    inner: Arc<SqliteStore>,
    fail_reads: AtomicBool,
    stall_writes: bool,
}

impl ScriptedStore {
    async fn new(stall_writes: bool) -> Result<Self> {
        Ok(Self {
            inner: create_test_store().await?,
            fail_reads: AtomicBool::new(false),
            stall_writes,
        })
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn insert_sample(&self, sample: &Sample) -> AppResult<()> {
        if self.stall_writes {
            future::pending::<()>().await;
        }
        self.inner.insert_sample(sample).await
    }

    async fn recent_samples(&self, limit: usize) -> AppResult<Vec<Sample>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::database("sample table unavailable"));
        }
        self.inner.recent_samples(limit).await
    }

    async fn insert_rating(&self, rating: &Rating) -> AppResult<()> {
        self.inner.insert_rating(rating).await
    }

    async fn all_ratings(&self) -> AppResult<Vec<Rating>> {
        self.inner.all_ratings().await
    }

    async fn save_workout(
        &self,
        summary: &WorkoutSummary,
        feedbacks: &[RepFeedback],
    ) -> AppResult<String> {
        self.inner.save_workout(summary, feedbacks).await
    }

    async fn list_workouts(&self, limit: Option<u32>) -> AppResult<Vec<WorkoutRecord>> {
        self.inner.list_workouts(limit).await
    }

    async fn workout_with_details(&self, workout_id: &str) -> AppResult<Option<WorkoutDetails>> {
        self.inner.workout_with_details(workout_id).await
    }

    async fn workout_stats(&self) -> AppResult<WorkoutStats> {
        self.inner.workout_stats().await
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<bool> {
        self.inner.delete_workout(workout_id).await
    }
}

fn raising_coach(store: Arc<dyn Store>) -> AdaptiveCoach<RaisePolicy> {
    let config = DifficultyConfig::default();
    AdaptiveCoach::with_controller(
        store,
        DifficultyController::with_policy(&config, RaisePolicy),
        3,
    )
}

#[tokio::test]
async fn test_controller_steps_once_batch_is_full() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let coach = raising_coach(store);
    let mut difficulty = coach.subscribe_difficulty();

    for _ in 0..4 {
        let update = coach.step_difficulty(&Sample::now(45.0, Vec::new())).await?;
        assert!(update.is_none());
    }
    assert_eq!(coach.difficulty(), 1);
    assert!(!difficulty.has_changed()?);

    let update = coach
        .step_difficulty(&Sample::now(45.0, Vec::new()))
        .await?
        .unwrap();
    assert_eq!((update.previous, update.difficulty), (1, 2));
    assert!(difficulty.has_changed()?);
    assert_eq!(*difficulty.borrow_and_update(), 2);
    Ok(())
}

#[tokio::test]
async fn test_background_samples_are_serialized() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let mut coach = raising_coach(Arc::clone(&store));

    for angle in [40.0, 42.0, 44.0, 46.0, 48.0] {
        coach.record_sample(Sample::now(angle, Vec::new()));
    }
    assert_eq!(coach.pending_tasks(), 5);

    let report = coach.drain().await;
    assert!(report.failures.is_empty());
    assert_eq!(report.difficulty_updates.len(), 1);
    assert_eq!(report.difficulty_updates[0].state.avg_angle, 44);
    assert_eq!(coach.difficulty(), 2);
    assert_eq!(coach.pending_tasks(), 0);
    assert_eq!(store.recent_samples(10).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_ratings_refresh_recommendations() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let coach = AdaptiveCoach::new(store, &IntelligenceConfig::default());
    let mut published = coach.subscribe_recommendations();

    assert!(coach.refresh_recommendations(&Rating::new("W2", 4)?).await?.is_empty());
    coach.refresh_recommendations(&Rating::new("W3", 1)?).await?;
    let latest = coach.refresh_recommendations(&Rating::new("W1", 5)?).await?;

    let ids: Vec<&str> = latest.iter().map(|r| r.workout_id.as_str()).collect();
    assert_eq!(ids, vec!["W2", "W3"]);
    assert!(published.has_changed()?);
    assert_eq!(*published.borrow_and_update(), latest);
    assert_eq!(coach.recommendations(), latest);
    Ok(())
}

#[tokio::test]
async fn test_frame_events_feed_the_difficulty_loop() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let mut coach = AdaptiveCoach::new(Arc::clone(&store), &IntelligenceConfig::default());
    let mut analyzer = FrameAnalyzer::new(ExerciseConfig::default(), ExerciseKind::BicepCurl);
    let mut session = WorkoutSession::start(ExerciseKind::BicepCurl, None);

    let mut extended = analyzer.analyze(&curl_frame(0, 170.0, &[]))?;
    session.record_report(&mut extended);
    let mut report = analyzer.analyze(&curl_frame(4000, 60.0, &["elbow_swinging"]))?;
    session.record_report(&mut report);
    assert_eq!(report.completed.len(), 2);
    assert!(report.completed.iter().all(|rep| rep.counted));

    let saved = coach.handle_event(&AnalysisEvent::Frame(report)).await?;
    assert!(saved.is_none());
    let drained = coach.drain().await;
    assert!(drained.failures.is_empty());

    let samples = store.recent_samples(10).await?;
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s.error_tags == vec!["elbow_swinging"]));
    Ok(())
}

#[tokio::test]
async fn test_reps_outside_the_workout_are_not_sampled() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let mut coach = AdaptiveCoach::new(Arc::clone(&store), &IntelligenceConfig::default());
    let (_difficulty_tx, difficulty_rx) = watch::channel(coach.difficulty());
    let (worker, mut events) = AnalysisHandle::spawn(
        ExerciseConfig::default(),
        ExerciseKind::BicepCurl,
        4,
        difficulty_rx,
    )?;

    // Two bilateral reps before the workout, then four with a target of two
    for i in 0..2_u64 {
        worker.send_frame(curl_frame(i * 10_000, 170.0, &[])).await?;
        worker.send_frame(curl_frame(i * 10_000 + 5000, 60.0, &[])).await?;
    }
    worker
        .send(AnalysisCommand::StartWorkout {
            target_reps: Some(2),
        })
        .await?;
    for i in 2..6_u64 {
        worker.send_frame(curl_frame(i * 10_000, 170.0, &[])).await?;
        worker.send_frame(curl_frame(i * 10_000 + 5000, 60.0, &[])).await?;
    }
    let stats = worker.shutdown().await?;
    assert_eq!(stats.reps_detected, 12);

    let mut session_reps = 0;
    while let Some(event) = events.recv().await {
        if let AnalysisEvent::WorkoutFinished(finished) = &event {
            session_reps += finished.summary.total_reps;
        } else {
            coach.handle_event(&event).await?;
        }
    }
    let report = coach.drain().await;
    assert!(report.failures.is_empty());

    assert_eq!(session_reps, 2);
    assert_eq!(store.recent_samples(20).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_finished_workout_is_saved_and_auto_rated() -> Result<()> {
    let store: Arc<dyn Store> = create_test_store().await?;
    let mut coach = AdaptiveCoach::new(Arc::clone(&store), &IntelligenceConfig::default());
    let mut analyzer = FrameAnalyzer::new(ExerciseConfig::default(), ExerciseKind::BicepCurl);
    let mut session = WorkoutSession::start(ExerciseKind::BicepCurl, None);

    for (ts, angle) in [(0, 170.0), (5000, 60.0), (7000, 170.0), (10000, 60.0)] {
        session.observe_frame(ts);
        for rep in analyzer.analyze(&curl_frame(ts, angle, &[]))?.completed {
            session.record(&rep);
        }
    }
    let finished = session.finish(coach.difficulty());
    assert_eq!(finished.summary.total_reps, 4);
    assert_eq!(finished.summary.score, 100);

    let event = AnalysisEvent::WorkoutFinished(Box::new(finished));
    let workout_id = coach.handle_event(&event).await?.unwrap();
    let report = coach.drain().await;

    // A single rating has nothing to compare against
    assert_eq!(report.recommendations, Some(Vec::new()));
    let ratings = store.all_ratings().await?;
    assert_eq!(ratings, vec![Rating::new(workout_id.clone(), 5)?]);
    let details = store.workout_with_details(&workout_id).await?.unwrap();
    assert_eq!(details.reps.len(), 4);
    assert_eq!(details.workout.summary.duration_ms, 10000);
    Ok(())
}

#[tokio::test]
async fn test_failed_read_leaves_controller_untouched() -> Result<()> {
    let store = Arc::new(ScriptedStore::new(false).await?);
    let mut coach = raising_coach(Arc::clone(&store) as Arc<dyn Store>);

    for _ in 0..4 {
        coach.step_difficulty(&Sample::now(45.0, Vec::new())).await?;
    }
    store.fail_reads.store(true, Ordering::SeqCst);

    let error = coach
        .step_difficulty(&Sample::now(45.0, Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::DatabaseError);
    assert_eq!(coach.difficulty(), 1);

    coach.record_sample(Sample::now(45.0, Vec::new()));
    let report = coach.drain().await;
    assert_eq!(report.failures.len(), 1);
    assert!(report.difficulty_updates.is_empty());

    store.fail_reads.store(false, Ordering::SeqCst);
    let update = coach
        .step_difficulty(&Sample::now(45.0, Vec::new()))
        .await?
        .unwrap();
    assert_eq!(update.difficulty, 2);
    Ok(())
}

#[tokio::test]
async fn test_abort_cancels_pending_work() -> Result<()> {
    let store = Arc::new(ScriptedStore::new(true).await?);
    let mut coach = raising_coach(Arc::clone(&store) as Arc<dyn Store>);

    coach.record_sample(Sample::now(45.0, Vec::new()));
    coach.record_sample(Sample::now(45.0, Vec::new()));
    coach.abort();

    let report = coach.drain().await;
    assert_eq!(report.cancelled, 2);
    assert!(report.failures.is_empty());
    assert_eq!(coach.difficulty(), 1);
    assert!(store.recent_samples(10).await?.is_empty());
    Ok(())
}
