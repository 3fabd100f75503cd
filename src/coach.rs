// ABOUTME: Adaptive coach running the difficulty controller and recommender as cancellable async tasks
// ABOUTME: Publishes difficulty and recommendations to any number of watch subscribers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Adaptive Coach
//!
//! The coach reacts to two kinds of events away from the analysis thread:
//!
//! - a stored sample steps the [`DifficultyController`] over the newest batch
//! - a stored rating recomputes recommendations from every rating
//!
//! Each reaction is a task on a [`JoinSet`], so a session can abort whatever
//! is still pending. Controller state only changes after every storage read
//! of a step has succeeded, and values are published whole through
//! [`watch`] channels.

use crate::database::Store;
use crate::errors::{AppError, AppResult};
use crate::session::FinishedWorkout;
use crate::worker::AnalysisEvent;
use reptrack_core::models::{Rating, Sample};
use reptrack_intelligence::analyzer::CompletedRep;
use reptrack_intelligence::config::IntelligenceConfig;
use reptrack_intelligence::difficulty::{
    DifficultyController, DifficultyPolicy, DifficultyUpdate, QTablePolicy,
};
use reptrack_intelligence::recommender::{recommend, Recommendation};
use reptrack_intelligence::scoring::rating_from_score;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Result of one background task
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoachOutcome {
    /// A sample was stored; `None` while the batch is not yet full
    Difficulty(Option<DifficultyUpdate>),
    /// A rating was stored and recommendations recomputed
    Recommendations(Vec<Recommendation>),
}

/// What [`AdaptiveCoach::drain`] collected
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Controller steps that ran, in completion order
    pub difficulty_updates: Vec<DifficultyUpdate>,
    /// Most recent recommendation list produced
    pub recommendations: Option<Vec<Recommendation>>,
    /// Tasks that failed
    pub failures: Vec<AppError>,
    /// Tasks aborted before finishing
    pub cancelled: usize,
}

/// Coordinator for the difficulty and recommendation loops
pub struct AdaptiveCoach<P = QTablePolicy> {
    store: Arc<dyn Store>,
    controller: Arc<Mutex<DifficultyController<P>>>,
    difficulty: Arc<watch::Sender<u32>>,
    recommendations: Arc<watch::Sender<Vec<Recommendation>>>,
    ratings_gate: Arc<Mutex<()>>,
    top_k: usize,
    tasks: JoinSet<AppResult<CoachOutcome>>,
}

impl AdaptiveCoach<QTablePolicy> {
    /// Coach with the default Q-table policy
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: &IntelligenceConfig) -> Self {
        Self::with_controller(
            store,
            DifficultyController::new(&config.difficulty),
            config.recommendation.top_k,
        )
    }
}

impl<P: DifficultyPolicy + 'static> AdaptiveCoach<P> {
    /// Coach around an existing controller
    #[must_use]
    pub fn with_controller(
        store: Arc<dyn Store>,
        controller: DifficultyController<P>,
        top_k: usize,
    ) -> Self {
        let (difficulty, _) = watch::channel(controller.difficulty());
        let (recommendations, _) = watch::channel(Vec::new());
        Self {
            store,
            controller: Arc::new(Mutex::new(controller)),
            difficulty: Arc::new(difficulty),
            recommendations: Arc::new(recommendations),
            ratings_gate: Arc::new(Mutex::new(())),
            top_k,
            tasks: JoinSet::new(),
        }
    }

    /// Storage collaborator
    #[must_use]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Current difficulty
    #[must_use]
    pub fn difficulty(&self) -> u32 {
        *self.difficulty.borrow()
    }

    /// Latest recommendations
    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.recommendations.borrow().clone()
    }

    /// Observe difficulty changes
    #[must_use]
    pub fn subscribe_difficulty(&self) -> watch::Receiver<u32> {
        self.difficulty.subscribe()
    }

    /// Observe recommendation changes
    #[must_use]
    pub fn subscribe_recommendations(&self) -> watch::Receiver<Vec<Recommendation>> {
        self.recommendations.subscribe()
    }

    /// Background tasks not yet collected
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Store a sample for a rep the workout counted and step the controller in the background
    ///
    /// Reps seen outside an active workout are not samples; returns whether one was recorded.
    pub fn record_rep(&mut self, rep: &CompletedRep) -> bool {
        if !rep.counted {
            return false;
        }
        self.record_sample(Sample::now(rep.event.angle, rep.error_tags.clone()));
        true
    }

    /// Store a sample and step the controller in the background
    pub fn record_sample(&mut self, sample: Sample) {
        let store = Arc::clone(&self.store);
        let controller = Arc::clone(&self.controller);
        let published = Arc::clone(&self.difficulty);
        self.tasks.spawn(async move {
            difficulty_step(store.as_ref(), &controller, &published, &sample)
                .await
                .map(CoachOutcome::Difficulty)
        });
    }

    /// Store a rating and recompute recommendations in the background
    pub fn submit_rating(&mut self, rating: Rating) {
        let store = Arc::clone(&self.store);
        let gate = Arc::clone(&self.ratings_gate);
        let published = Arc::clone(&self.recommendations);
        let top_k = self.top_k;
        self.tasks.spawn(async move {
            recommendation_step(store.as_ref(), &gate, &published, top_k, &rating)
                .await
                .map(CoachOutcome::Recommendations)
        });
    }

    /// Store a sample and step the controller, waiting for the result
    ///
    /// # Errors
    ///
    /// Returns an error if storing the sample or reading the batch fails; the
    /// controller is unchanged then
    pub async fn step_difficulty(&self, sample: &Sample) -> AppResult<Option<DifficultyUpdate>> {
        difficulty_step(self.store.as_ref(), &self.controller, &self.difficulty, sample).await
    }

    /// Store a rating and recompute recommendations, waiting for the result
    ///
    /// # Errors
    ///
    /// Returns an error if storing or reading ratings fails
    pub async fn refresh_recommendations(&self, rating: &Rating) -> AppResult<Vec<Recommendation>> {
        recommendation_step(
            self.store.as_ref(),
            &self.ratings_gate,
            &self.recommendations,
            self.top_k,
            rating,
        )
        .await
    }

    /// Persist a finished workout and submit its automatic rating
    ///
    /// # Errors
    ///
    /// Returns an error if the workout cannot be saved
    pub async fn finish_workout(&mut self, finished: &FinishedWorkout) -> AppResult<String> {
        let workout_id = self
            .store
            .save_workout(&finished.summary, &finished.feedbacks)
            .await?;
        let auto_rating = rating_from_score(finished.summary.score);
        info!(
            workout_id = %workout_id,
            score = finished.summary.score,
            auto_rating,
            "workout saved"
        );
        self.submit_rating(Rating::new(workout_id.clone(), auto_rating)?);
        Ok(workout_id)
    }

    /// React to an analysis event; returns the saved workout id for finished workouts
    ///
    /// # Errors
    ///
    /// Returns an error if a finished workout cannot be saved
    pub async fn handle_event(&mut self, event: &AnalysisEvent) -> AppResult<Option<String>> {
        match event {
            AnalysisEvent::Frame(report) => {
                let mut skipped = 0_usize;
                for rep in &report.completed {
                    if !self.record_rep(rep) {
                        skipped += 1;
                    }
                }
                if skipped > 0 {
                    debug!(skipped, "reps outside the workout not sampled");
                }
                Ok(None)
            }
            AnalysisEvent::WorkoutFinished(finished) => {
                self.finish_workout(finished).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Cancel every pending task
    pub fn abort(&mut self) {
        if !self.tasks.is_empty() {
            debug!(pending = self.tasks.len(), "aborting coach tasks");
        }
        self.tasks.abort_all();
    }

    /// Wait for every pending task and collect the results
    pub async fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok(CoachOutcome::Difficulty(update))) => {
                    report.difficulty_updates.extend(update);
                }
                Ok(Ok(CoachOutcome::Recommendations(list))) => {
                    report.recommendations = Some(list);
                }
                Ok(Err(error)) => {
                    warn!(error = %error, "coach task failed");
                    report.failures.push(error);
                }
                Err(join_error) if join_error.is_cancelled() => report.cancelled += 1,
                Err(join_error) => {
                    warn!(error = %join_error, "coach task panicked");
                    report
                        .failures
                        .push(AppError::internal(format!("coach task panicked: {join_error}")));
                }
            }
        }
        report
    }
}

async fn difficulty_step<P: DifficultyPolicy>(
    store: &dyn Store,
    controller: &Mutex<DifficultyController<P>>,
    published: &watch::Sender<u32>,
    sample: &Sample,
) -> AppResult<Option<DifficultyUpdate>> {
    // Held for the whole step so each step sees the batch its own insert produced
    let mut controller = controller.lock().await;
    let batch_size = controller.batch_size();
    store.insert_sample(sample).await?;
    let recent = store.recent_samples(batch_size).await?;

    let update = controller.observe(&recent);
    if let Some(update) = update {
        published.send_replace(update.difficulty);
        if update.changed() {
            info!(
                previous = update.previous,
                difficulty = update.difficulty,
                reward = update.reward,
                "difficulty adjusted"
            );
        }
    }
    Ok(update)
}

async fn recommendation_step(
    store: &dyn Store,
    gate: &Mutex<()>,
    published: &watch::Sender<Vec<Recommendation>>,
    top_k: usize,
    rating: &Rating,
) -> AppResult<Vec<Recommendation>> {
    let _serialized = gate.lock().await;
    store.insert_rating(rating).await?;
    let ratings = store.all_ratings().await?;

    let recommendations = recommend(&ratings, top_k);
    debug!(
        ratings = ratings.len(),
        recommended = recommendations.len(),
        "recommendations refreshed"
    );
    published.send_replace(recommendations.clone());
    Ok(recommendations)
}
