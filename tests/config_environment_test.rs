// ABOUTME: Unit tests for environment-driven configuration
// ABOUTME: Validates defaults, REPTRACK_* overrides, validation errors, and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use reptrack::config::RuntimeConfig;
use reptrack::errors::ErrorCode;
use reptrack::logging::{LogFormat, LoggingConfig};
use reptrack_core::models::ExerciseKind;
use reptrack_intelligence::config::intelligence::{
    DifficultyConfig, ExerciseConfig, ExerciseThresholds, RecommendationConfig,
};
use reptrack_intelligence::config::{ConfigError, IntelligenceConfig};
use serial_test::serial;
use std::env;

const TOUCHED: [&str; 12] = [
    "REPTRACK_DATABASE_URL",
    "REPTRACK_FRAME_QUEUE",
    "REPTRACK_SQUAT_MIN_ANGLE",
    "REPTRACK_SQUAT_MAX_ANGLE",
    "REPTRACK_LUNGE_TEMPO_MAX_MS",
    "REPTRACK_DIFFICULTY_BATCH_SIZE",
    "REPTRACK_DIFFICULTY_SEED",
    "REPTRACK_DIFFICULTY_LEARNING_RATE",
    "REPTRACK_RECOMMENDATION_TOP_K",
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
];

fn clear_env() {
    for key in TOUCHED {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = RuntimeConfig::from_env().unwrap();

    assert_eq!(config, RuntimeConfig::default());
    assert_eq!(config.database_url, "sqlite:reptrack.db");
    assert_eq!(config.frame_queue_capacity, 256);
    let curl = config.intelligence.exercises.settings(ExerciseKind::BicepCurl);
    assert_eq!(curl.thresholds, ExerciseThresholds::new(70.0, 160.0));
    assert_eq!(config.intelligence.difficulty.batch_size, 5);
    assert_eq!(config.intelligence.difficulty.seed, None);
    assert_eq!(config.intelligence.recommendation.top_k, 3);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("REPTRACK_DATABASE_URL", "sqlite::memory:");
    env::set_var("REPTRACK_FRAME_QUEUE", "16");
    env::set_var("REPTRACK_SQUAT_MIN_ANGLE", "80");
    env::set_var("REPTRACK_SQUAT_MAX_ANGLE", " 100 ");
    env::set_var("REPTRACK_LUNGE_TEMPO_MAX_MS", "7000");
    env::set_var("REPTRACK_DIFFICULTY_BATCH_SIZE", "8");
    env::set_var("REPTRACK_DIFFICULTY_SEED", "99");
    env::set_var("REPTRACK_RECOMMENDATION_TOP_K", "5");

    let config = RuntimeConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.frame_queue_capacity, 16);
    let squat = config.intelligence.exercises.settings(ExerciseKind::Squat);
    assert_eq!(squat.thresholds, ExerciseThresholds::new(80.0, 100.0));
    let lunge = config.intelligence.exercises.settings(ExerciseKind::Lunge);
    assert_eq!(lunge.tempo.max_ms, 7000);
    assert_eq!(config.intelligence.difficulty.batch_size, 8);
    assert_eq!(config.intelligence.difficulty.seed, Some(99));
    assert_eq!(config.intelligence.recommendation.top_k, 5);
    assert!(config.summary().contains("Frame Queue: 16"));
}

#[test]
#[serial]
fn test_unparsable_value_is_config_error() {
    clear_env();
    env::set_var("REPTRACK_DIFFICULTY_BATCH_SIZE", "five");
    let error = RuntimeConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("REPTRACK_DIFFICULTY_BATCH_SIZE"));
}

#[test]
#[serial]
fn test_zero_frame_queue_is_rejected() {
    clear_env();
    env::set_var("REPTRACK_FRAME_QUEUE", "0");
    let error = RuntimeConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_inverted_thresholds_fail_validation() {
    clear_env();
    env::set_var("REPTRACK_SQUAT_MIN_ANGLE", "120");
    env::set_var("REPTRACK_SQUAT_MAX_ANGLE", "90");
    let result = IntelligenceConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidThresholds(_))));
}

#[test]
#[serial]
fn test_out_of_range_rate_fails_validation() {
    clear_env();
    env::set_var("REPTRACK_DIFFICULTY_LEARNING_RATE", "1.5");
    let result = IntelligenceConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_section_validation() {
    let mut exercises = ExerciseConfig::default();
    exercises.set_thresholds(ExerciseKind::LateralRaise, ExerciseThresholds::new(80.0, 190.0));
    assert!(exercises.validate().is_err());

    let difficulty = DifficultyConfig {
        batch_size: 0,
        ..DifficultyConfig::default()
    };
    assert!(matches!(
        difficulty.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    assert!(RecommendationConfig { top_k: 0 }.validate().is_err());
    assert!(IntelligenceConfig::default().validate().is_ok());
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_env();
    let defaults = LoggingConfig::from_env();
    assert_eq!(defaults.level, "info");
    assert_eq!(defaults.format, LogFormat::Pretty);
    assert!(!defaults.include_location);

    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    let production = LoggingConfig::from_env();
    clear_env();

    assert_eq!(production.level, "debug");
    assert_eq!(production.format, LogFormat::Json);
    assert!(production.include_location);
    assert!(production.include_thread);
    assert_eq!(production.environment, "production");
}
