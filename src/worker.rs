// ABOUTME: Dedicated frame-analysis thread fed by a bounded command queue in arrival order
// ABOUTME: Owns the analyzer and active workout session; publishes reports and finished workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Worker
//!
//! Frames, exercise switches, resets, workout start/stop and shutdown all
//! travel through the same queue, so every control command lands between two
//! frames. The thread never touches storage; results leave through an
//! unbounded event channel and the async side decides what to persist.

use crate::constants::ANALYSIS_THREAD_NAME;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::session::{FinishedWorkout, WorkoutSession};
use reptrack_core::models::ExerciseKind;
use reptrack_intelligence::analyzer::{FrameAnalyzer, FrameInput, FrameReport};
use reptrack_intelligence::config::intelligence::ExerciseConfig;
use serde::{Deserialize, Serialize};
use std::thread::{self, JoinHandle};
use tokio::sync::{mpsc, watch};
use tokio::task;
use tracing::{debug, info, warn};

/// Work item for the analysis thread
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum AnalysisCommand {
    /// Analyze one frame
    Frame(Box<FrameInput>),
    /// Switch exercise; counters start over
    SetExercise(ExerciseKind),
    /// Clear counters and pending tags
    Reset,
    /// Begin a workout for the active exercise
    StartWorkout {
        /// Stop automatically after this many reps
        target_reps: Option<u32>,
    },
    /// Finish the active workout
    StopWorkout,
    /// Finish any active workout and exit the thread
    Shutdown,
}

/// Output of the analysis thread
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum AnalysisEvent {
    /// A frame was fully analyzed
    Frame(FrameReport),
    /// A frame was rejected; counter state is unchanged
    FrameSkipped {
        /// Frame timestamp
        timestamp_ms: u64,
        /// Why it was rejected
        code: ErrorCode,
        /// Detail
        message: String,
    },
    /// A workout began
    WorkoutStarted {
        /// Exercise performed
        exercise: ExerciseKind,
        /// Auto-stop target
        target_reps: Option<u32>,
    },
    /// A workout ended, by command, target, exercise switch, or shutdown
    WorkoutFinished(Box<FinishedWorkout>),
}

/// Counters reported when the thread exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    /// Frames analyzed
    pub frames_analyzed: u64,
    /// Frames rejected
    pub frames_skipped: u64,
    /// Reps detected across all limbs
    pub reps_detected: u64,
    /// Workouts finished
    pub workouts_finished: u64,
}

struct AnalysisWorker {
    analyzer: FrameAnalyzer,
    session: Option<WorkoutSession>,
    difficulty: watch::Receiver<u32>,
    events: mpsc::UnboundedSender<AnalysisEvent>,
    stats: WorkerStats,
}

impl AnalysisWorker {
    fn run(mut self, mut commands: mpsc::Receiver<AnalysisCommand>) -> WorkerStats {
        info!(exercise = %self.analyzer.exercise(), "analysis worker started");
        while let Some(command) = commands.blocking_recv() {
            if !self.handle(command) {
                break;
            }
        }
        self.finish_session();
        info!(
            frames = self.stats.frames_analyzed,
            skipped = self.stats.frames_skipped,
            reps = self.stats.reps_detected,
            "analysis worker stopped"
        );
        self.stats
    }

    /// Returns `false` once the worker should exit
    fn handle(&mut self, command: AnalysisCommand) -> bool {
        match command {
            AnalysisCommand::Frame(frame) => self.analyze(&frame),
            AnalysisCommand::SetExercise(kind) => {
                if self
                    .session
                    .as_ref()
                    .is_some_and(|session| session.exercise() != kind)
                {
                    self.finish_session();
                }
                self.analyzer.set_exercise(kind);
            }
            AnalysisCommand::Reset => self.analyzer.reset(),
            AnalysisCommand::StartWorkout { target_reps } => {
                self.finish_session();
                let exercise = self.analyzer.exercise();
                self.session = Some(WorkoutSession::start(exercise, target_reps));
                self.emit(AnalysisEvent::WorkoutStarted {
                    exercise,
                    target_reps,
                });
            }
            AnalysisCommand::StopWorkout => self.finish_session(),
            AnalysisCommand::Shutdown => return false,
        }
        true
    }

    fn analyze(&mut self, frame: &FrameInput) {
        let mut report = match self.analyzer.analyze(frame) {
            Ok(report) => report,
            Err(error) => {
                self.stats.frames_skipped += 1;
                warn!(timestamp_ms = frame.timestamp_ms, error = %error, "frame skipped");
                self.emit(AnalysisEvent::FrameSkipped {
                    timestamp_ms: frame.timestamp_ms,
                    code: error.code,
                    message: error.message,
                });
                return;
            }
        };
        self.stats.frames_analyzed += 1;
        self.stats.reps_detected += report.completed.len() as u64;

        let target_reached = self
            .session
            .as_mut()
            .is_some_and(|session| session.record_report(&mut report));

        self.emit(AnalysisEvent::Frame(report));
        if target_reached {
            self.finish_session();
        }
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let difficulty = *self.difficulty.borrow();
        let finished = session.finish(difficulty);
        self.stats.workouts_finished += 1;
        self.emit(AnalysisEvent::WorkoutFinished(Box::new(finished)));
    }

    fn emit(&self, event: AnalysisEvent) {
        if self.events.send(event).is_err() {
            debug!("no analysis event receiver");
        }
    }
}

/// Handle to a running analysis thread
#[derive(Debug)]
pub struct AnalysisHandle {
    commands: mpsc::Sender<AnalysisCommand>,
    thread: JoinHandle<WorkerStats>,
}

impl AnalysisHandle {
    /// Start the analysis thread
    ///
    /// `difficulty` is read when a workout finishes so the summary carries the
    /// level in force at that moment.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or the thread cannot be spawned
    pub fn spawn(
        exercises: ExerciseConfig,
        exercise: ExerciseKind,
        capacity: usize,
        difficulty: watch::Receiver<u32>,
    ) -> AppResult<(Self, mpsc::UnboundedReceiver<AnalysisEvent>)> {
        if capacity == 0 {
            return Err(AppError::invalid_input("frame queue capacity must be at least 1"));
        }
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let worker = AnalysisWorker {
            analyzer: FrameAnalyzer::new(exercises, exercise),
            session: None,
            difficulty,
            events: event_tx,
            stats: WorkerStats::default(),
        };
        let thread = thread::Builder::new()
            .name(ANALYSIS_THREAD_NAME.to_owned())
            .spawn(move || worker.run(command_rx))
            .map_err(|e| AppError::internal(format!("Failed to spawn analysis thread: {e}")))?;

        Ok((
            Self {
                commands: command_tx,
                thread,
            },
            event_rx,
        ))
    }

    /// Queue a command, waiting while the queue is full
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has already exited
    pub async fn send(&self, command: AnalysisCommand) -> AppResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::internal("analysis worker is no longer running"))
    }

    /// Queue a frame
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has already exited
    pub async fn send_frame(&self, frame: FrameInput) -> AppResult<()> {
        self.send(AnalysisCommand::Frame(Box::new(frame))).await
    }

    /// Another producer for the same queue
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<AnalysisCommand> {
        self.commands.clone()
    }

    /// Ask the worker to stop after the commands already queued, then wait for it
    ///
    /// # Errors
    ///
    /// Returns an error if the thread panicked
    pub async fn shutdown(self) -> AppResult<WorkerStats> {
        // The worker may already be gone; joining still reports its stats
        let _ = self.commands.send(AnalysisCommand::Shutdown).await;
        self.join().await
    }

    /// Wait for the worker to exit on its own
    ///
    /// # Errors
    ///
    /// Returns an error if the thread panicked
    pub async fn join(self) -> AppResult<WorkerStats> {
        let Self { commands, thread } = self;
        drop(commands);
        task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| AppError::internal(format!("Failed to join analysis thread: {e}")))?
            .map_err(|_| AppError::internal("analysis thread panicked"))
    }
}
