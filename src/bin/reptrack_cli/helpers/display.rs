// ABOUTME: Output formatting helpers for reptrack-cli
// ABOUTME: Provides consistent display functions for reps, workouts, history, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reptrack::session::FinishedWorkout;
use reptrack_core::models::{
    DifficultyState, FormIssue, WorkoutDetails, WorkoutRecord, WorkoutStats,
};
use reptrack_intelligence::analyzer::{CompletedRep, FrameReport};
use reptrack_intelligence::difficulty::DifficultyUpdate;
use reptrack_intelligence::recommender::Recommendation;

/// One line per completed rep
pub fn display_rep(rep: &CompletedRep, counted: Option<u32>) {
    let total = counted.map_or_else(|| "not counted".to_owned(), |n| format!("#{n}"));
    println!(
        "Rep {total} ({} {}): {:.1} deg, {:.1}s, {} / {}",
        rep.event.side,
        rep.event.rep_number,
        rep.event.angle,
        rep.event.duration_ms as f64 / 1000.0,
        rep.feedback.form_rating.display_name(),
        rep.feedback.speed_rating.display_name(),
    );
    if !rep.feedback.issues.is_empty() {
        let issues = rep
            .feedback
            .issues
            .iter()
            .copied()
            .map(FormIssue::description)
            .collect::<Vec<_>>()
            .join(", ");
        println!("   Issues: {issues}");
    }
    println!("   Tip: {}", rep.feedback.tip);
}

/// Compact per-frame angle readout
pub fn display_frame(report: &FrameReport) {
    let readings = report
        .readings
        .iter()
        .map(|r| {
            format!(
                "{} {:.1}{}",
                r.side,
                r.angle,
                if r.in_range { " (in range)" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let secondary = report
        .secondary_angle
        .map_or_else(String::new, |angle| format!(" | torso {angle:.1}"));
    println!("[{:>8} ms] {readings}{secondary}", report.timestamp_ms);
}

/// Full workout summary with coaching advice
pub fn display_finished_workout(finished: &FinishedWorkout, workout_id: Option<&str>) {
    let summary = &finished.summary;
    let analysis = &finished.analysis;
    println!("\nWorkout Complete: {}", summary.exercise_kind.display_name());
    println!("{}", "=".repeat(60));
    if let Some(id) = workout_id {
        println!("   Workout ID: {id}");
    }
    println!("   Duration: {}", summary.formatted_duration());
    println!("   Reps: {}", summary.total_reps);
    println!(
        "   Perfect Form: {} ({}%)",
        summary.perfect_reps, analysis.perfect_form_percentage
    );
    println!("   Average Angle: {:.1} deg", summary.avg_angle);
    println!("   Score: {} ({})", summary.score, analysis.grade);
    println!("   Difficulty: {}", summary.difficulty_at_end);

    if !analysis.issue_frequency.is_empty() {
        println!("\nForm Issues:");
        for (issue, count) in &analysis.issue_frequency {
            println!("   {}: {count}", issue.description());
        }
    }

    println!("\nCoaching:");
    println!("   {}", analysis.primary_recommendation);
    println!("   {}", analysis.secondary_recommendation);
    println!("   {}", analysis.tempo_advice.message());
}

/// Saved workouts table
pub fn display_workout_list(workouts: &[WorkoutRecord]) {
    if workouts.is_empty() {
        println!("No workouts saved yet.");
        return;
    }
    println!(
        "{:<38} {:<16} {:<17} {:>5} {:>6} {:>5}",
        "ID", "Exercise", "Started", "Reps", "Score", "Grade"
    );
    println!("{}", "-".repeat(92));
    for record in workouts {
        let summary = &record.summary;
        println!(
            "{:<38} {:<16} {:<17} {:>5} {:>6} {:>5}",
            record.id,
            summary.exercise_kind.display_name(),
            summary.start_time.format("%Y-%m-%d %H:%M"),
            summary.total_reps,
            summary.score,
            summary.grade().as_str(),
        );
    }
}

/// One workout with every rep
pub fn display_workout_details(details: &WorkoutDetails) {
    let summary = &details.workout.summary;
    println!("\nWorkout {}", details.workout.id);
    println!("{}", "=".repeat(60));
    println!("   Exercise: {}", summary.exercise_kind.display_name());
    println!("   Started: {}", summary.start_time.format("%Y-%m-%d %H:%M UTC"));
    println!("   Duration: {}", summary.formatted_duration());
    println!(
        "   Reps: {} ({} perfect, {}%)",
        summary.total_reps,
        summary.perfect_reps,
        summary.perfect_form_percentage()
    );
    println!("   Score: {} ({})", summary.score, summary.grade());
    println!("   Difficulty: {}", summary.difficulty_at_end);

    if details.reps.is_empty() {
        return;
    }
    println!("\n{:>4} {:>8} {:<13} {:<10} Issues", "Rep", "Angle", "Form", "Pace");
    for rep in &details.reps {
        let issues = rep
            .issues
            .iter()
            .copied()
            .map(FormIssue::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:>4} {:>8.1} {:<13} {:<10} {issues}",
            rep.rep_number,
            rep.angle,
            rep.form_rating.display_name(),
            rep.speed_rating.display_name(),
        );
    }
}

/// History totals
pub fn display_stats(stats: &WorkoutStats) {
    println!("\nWorkout History");
    println!("{}", "=".repeat(40));
    println!("   Workouts: {}", stats.total_workouts);
    println!("   Total Reps: {}", stats.total_reps);
    println!("   Perfect Reps: {}", stats.perfect_form_reps);
    println!("   Average Score: {:.1}", stats.average_score);
}

/// Ranked suggestions
pub fn display_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations yet. Rate at least two workouts.");
        return;
    }
    println!("\nRecommended Workouts:");
    for (rank, recommendation) in recommendations.iter().enumerate() {
        println!(
            "   {}. {} (similarity {:.3})",
            rank + 1,
            recommendation.workout_id,
            recommendation.similarity
        );
    }
}

/// Controller steps taken during an analysis run
pub fn display_difficulty_updates(updates: &[DifficultyUpdate], current: u32) {
    if updates.is_empty() {
        println!("\nDifficulty: {current} (waiting for a full batch)");
        return;
    }
    println!("\nDifficulty: {current} after {} adjustment step(s)", updates.len());
    for update in updates {
        println!(
            "   avg {} deg, {} tags, action {:+}, reward {:+}: {} -> {}",
            update.state.avg_angle,
            update.state.error_count,
            update.action,
            update.reward,
            update.previous,
            update.difficulty
        );
    }
}

/// Newest batch as the controller would see it
pub fn display_batch_state(state: DifficultyState, target_angle: i64, reward: f64) {
    println!("\nNewest Difficulty Batch");
    println!("{}", "=".repeat(40));
    println!("   Average Angle: {} deg (target {target_angle})", state.avg_angle);
    println!("   Anomaly Tags: {}", state.error_count);
    println!("   Reward: {reward:+}");
}
