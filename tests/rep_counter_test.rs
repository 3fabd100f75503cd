// ABOUTME: Integration tests for the hysteresis repetition counter and counter bank
// ABOUTME: Covers threshold crossings, jitter rejection, latching, and rep durations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use reptrack_core::models::{ExerciseKind, Side};
use reptrack_intelligence::config::intelligence::ExerciseThresholds;
use reptrack_intelligence::rep_counter::{RepCounter, RepCounterBank, RepEvent, RepStage};

fn curl_thresholds() -> ExerciseThresholds {
    ExerciseThresholds::new(70.0, 160.0)
}

fn run(angles: &[f64]) -> (RepCounter, Vec<RepEvent>) {
    let mut counter = RepCounter::new(Side::Left, curl_thresholds());
    let events = angles
        .iter()
        .enumerate()
        .filter_map(|(i, angle)| counter.update(*angle, i as u64 * 1000))
        .collect();
    (counter, events)
}

#[test]
fn test_single_curl_completes_on_first_sample_below_min() {
    let (counter, events) = run(&[170.0, 150.0, 60.0, 30.0, 65.0, 155.0]);

    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.rep_number, 1);
    assert!((event.angle - 60.0).abs() < f64::EPSILON);
    assert_eq!(event.timestamp_ms, 2000);
    assert_eq!(event.duration_ms, 2000);
    assert_eq!(counter.count(), 1);
    assert_eq!(counter.stage(), RepStage::Up);
    assert!(counter.is_latched());
}

#[test]
fn test_angles_inside_band_never_count() {
    let (counter, events) = run(&[100.0, 120.0, 90.0, 150.0, 71.0, 159.0, 70.0, 160.0]);
    assert!(events.is_empty());
    assert_eq!(counter.stage(), RepStage::Unknown);
    assert!(!counter.is_latched());
}

#[test]
fn test_jitter_around_one_threshold_is_ignored() {
    // Only above max: never reaches Up
    let (_, above) = run(&[165.0, 158.0, 166.0, 159.0, 170.0, 155.0]);
    assert!(above.is_empty());

    // Only below min without a preceding Down stage
    let (_, below) = run(&[60.0, 72.0, 55.0, 75.0, 50.0]);
    assert!(below.is_empty());
}

#[test]
fn test_latch_blocks_double_count_until_extension() {
    let (counter, events) = run(&[170.0, 60.0, 100.0, 50.0, 65.0]);
    assert_eq!(events.len(), 1);
    assert!(counter.is_latched());

    let (_, events) = run(&[170.0, 60.0, 100.0, 50.0, 165.0, 40.0]);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].rep_number, 2);
}

#[test]
fn test_multiple_reps_report_time_between_events() {
    let mut counter = RepCounter::new(Side::Right, curl_thresholds());
    let samples = [
        (170.0, 0),
        (60.0, 4500),
        (165.0, 7000),
        (65.0, 9500),
        (170.0, 12000),
        (40.0, 20000),
    ];
    let events: Vec<RepEvent> = samples
        .iter()
        .filter_map(|(angle, ts)| counter.update(*angle, *ts))
        .collect();

    let durations: Vec<u64> = events.iter().map(|e| e.duration_ms).collect();
    assert_eq!(durations, vec![4500, 5000, 10500]);
    assert!(events.iter().all(|e| e.side == Side::Right));
    assert_eq!(counter.count(), 3);
}

#[test]
fn test_clear_forgets_count_and_stage() {
    let (mut counter, events) = run(&[170.0, 60.0]);
    assert_eq!(events.len(), 1);

    counter.clear();
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.stage(), RepStage::Unknown);
    assert!(!counter.is_latched());
    assert!(counter.update(60.0, 5000).is_none());
}

#[test]
fn test_bank_keeps_limbs_and_exercises_apart() {
    let mut bank = RepCounterBank::new();
    let thresholds = curl_thresholds();

    for (angle, ts) in [(170.0, 0), (60.0, 1000)] {
        bank.counter_mut(ExerciseKind::BicepCurl, Side::Left, thresholds)
            .update(angle, ts);
    }
    bank.counter_mut(ExerciseKind::BicepCurl, Side::Right, thresholds)
        .update(120.0, 0);
    for (angle, ts) in [(170.0, 0), (60.0, 1000)] {
        bank.counter_mut(ExerciseKind::ShoulderPress, Side::Left, thresholds)
            .update(angle, ts);
    }

    assert_eq!(bank.total_reps(ExerciseKind::BicepCurl), 1);
    assert_eq!(bank.total_reps(ExerciseKind::ShoulderPress), 1);
    assert_eq!(
        bank.get(ExerciseKind::BicepCurl, Side::Right).map(RepCounter::count),
        Some(0)
    );
    assert!(bank.get(ExerciseKind::Squat, Side::Left).is_none());

    bank.clear();
    assert_eq!(bank.total_reps(ExerciseKind::BicepCurl), 0);
}
