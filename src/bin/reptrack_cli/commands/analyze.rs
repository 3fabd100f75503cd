// ABOUTME: Frame analysis command for reptrack-cli
// ABOUTME: Feeds a frame file through the analysis worker as one workout and saves the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use reptrack::coach::AdaptiveCoach;
use reptrack::config::RuntimeConfig;
use reptrack::database::Store;
use reptrack::worker::{AnalysisCommand, AnalysisEvent, AnalysisHandle};
use reptrack_core::models::ExerciseKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use crate::helpers::display::{
    display_difficulty_updates, display_finished_workout, display_frame, display_recommendations,
    display_rep,
};
use crate::helpers::frames::{feed_frames, FeedStats};

/// Arguments of `analyze`
pub struct AnalyzeOptions {
    /// JSON-lines frame file
    pub frames: PathBuf,
    /// Exercise performed
    pub exercise: ExerciseKind,
    /// Auto-stop target
    pub target_reps: Option<u32>,
    /// Print every analyzed frame
    pub show_frames: bool,
}

/// Analyze a frame file as one workout
pub async fn run(
    store: Arc<dyn Store>,
    config: &RuntimeConfig,
    options: AnalyzeOptions,
) -> Result<()> {
    info!(
        exercise = %options.exercise,
        frames = %options.frames.display(),
        "analyzing frame file"
    );

    let mut coach = AdaptiveCoach::new(store, &config.intelligence);
    let (worker, mut events) = AnalysisHandle::spawn(
        config.intelligence.exercises.clone(),
        options.exercise,
        config.frame_queue_capacity,
        coach.subscribe_difficulty(),
    )?;
    worker
        .send(AnalysisCommand::StartWorkout {
            target_reps: options.target_reps,
        })
        .await?;

    let feeder = tokio::spawn(feed_frames(options.frames, worker.sender()));
    let mut counted = 0_u32;
    let mut interrupted = false;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match &event {
                    AnalysisEvent::Frame(report) => {
                        if options.show_frames {
                            display_frame(report);
                        }
                        for rep in &report.completed {
                            let number = rep.counted.then(|| {
                                counted += 1;
                                counted
                            });
                            display_rep(rep, number);
                        }
                        coach.handle_event(&event).await?;
                    }
                    AnalysisEvent::FrameSkipped { timestamp_ms, code, message } => {
                        warn!(timestamp_ms, ?code, message = %message, "frame skipped");
                    }
                    AnalysisEvent::WorkoutFinished(finished) => {
                        if finished.summary.total_reps == 0 {
                            display_finished_workout(finished, None);
                            println!("\nNo reps detected; workout not saved.");
                        } else {
                            let workout_id = coach.handle_event(&event).await?;
                            display_finished_workout(finished, workout_id.as_deref());
                        }
                    }
                    _ => {}
                }
            }
            _ = signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                info!("interrupt received, finishing workout");
                feeder.abort();
                // The worker may already be draining its own shutdown
                for command in [AnalysisCommand::StopWorkout, AnalysisCommand::Shutdown] {
                    if worker.send(command).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    let fed = match feeder.await {
        Ok(result) => result?,
        Err(join_error) if join_error.is_cancelled() => FeedStats::default(),
        Err(join_error) => return Err(join_error.into()),
    };
    let stats = worker.join().await?;
    info!(
        queued = fed.queued,
        malformed = fed.malformed,
        analyzed = stats.frames_analyzed,
        skipped = stats.frames_skipped,
        reps = stats.reps_detected,
        "analysis finished"
    );
    if stats.frames_skipped > 0 || fed.malformed > 0 {
        println!(
            "\nSkipped {} frame(s) without usable landmarks and {} malformed line(s).",
            stats.frames_skipped, fed.malformed
        );
    }

    let report = coach.drain().await;
    display_difficulty_updates(&report.difficulty_updates, coach.difficulty());
    if let Some(recommendations) = report.recommendations {
        display_recommendations(&recommendations);
    }
    for failure in &report.failures {
        warn!(error = %failure, "background update failed");
    }

    Ok(())
}
