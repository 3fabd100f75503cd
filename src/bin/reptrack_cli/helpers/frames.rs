// ABOUTME: Streams a JSON-lines frame file into the analysis queue
// ABOUTME: Malformed lines are logged and skipped; the queue applies backpressure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use reptrack::worker::AnalysisCommand;
use reptrack_intelligence::analyzer::FrameInput;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Lines read from a frame file
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedStats {
    /// Frames queued for analysis
    pub queued: u64,
    /// Lines that were not valid frames
    pub malformed: u64,
}

/// Queue every frame in `path`, then stop the workout and shut the worker down
///
/// The worker is shut down even when the file cannot be read, so the event
/// stream always ends.
pub async fn feed_frames(
    path: PathBuf,
    commands: mpsc::Sender<AnalysisCommand>,
) -> Result<FeedStats> {
    let fed = queue_frames(&path, &commands).await;

    let closed = async {
        commands.send(AnalysisCommand::StopWorkout).await?;
        commands.send(AnalysisCommand::Shutdown).await
    }
    .await;
    if closed.is_err() {
        warn!("analysis worker stopped before the frame file was closed");
    }
    fed
}

async fn queue_frames(path: &Path, commands: &mpsc::Sender<AnalysisCommand>) -> Result<FeedStats> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open frame file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();
    let mut stats = FeedStats::default();
    let mut line_number = 0_u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<FrameInput>(line) {
            Ok(frame) => {
                commands
                    .send(AnalysisCommand::Frame(Box::new(frame)))
                    .await
                    .context("analysis worker stopped while frames were queued")?;
                stats.queued += 1;
            }
            Err(e) => {
                warn!(line = line_number, error = %e, "skipping malformed frame line");
                stats.malformed += 1;
            }
        }
    }

    info!(queued = stats.queued, malformed = stats.malformed, "frame file read");
    Ok(stats)
}
