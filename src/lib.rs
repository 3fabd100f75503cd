// ABOUTME: Main library entry point for the reptrack exercise analysis runtime
// ABOUTME: Wires frame analysis, workout sessions, persistence, and the adaptive coaching loops
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Reptrack
//!
//! Turns a stream of per-frame body landmarks into repetition counts,
//! per-repetition form feedback, workout scores, an adaptive difficulty
//! signal, and next-workout suggestions.
//!
//! ## Architecture
//!
//! - **worker**: dedicated frame-analysis thread fed through a bounded queue
//! - **session**: workout lifecycle and summary
//! - **coach**: asynchronous difficulty and recommendation updates
//! - **database**: `Store` trait and its `SQLite` implementation
//! - **config** / **logging**: environment configuration and tracing setup
//!
//! The algorithms live in `reptrack-intelligence`, shared types in `reptrack-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use reptrack::config::RuntimeConfig;
//! use reptrack::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = RuntimeConfig::from_env()?;
//!     println!("frame queue holds {} frames", config.frame_queue_capacity);
//!     Ok(())
//! }
//! ```

/// Adaptive difficulty and recommendation coordinator
pub mod coach;

/// Runtime configuration
pub mod config;

/// Runtime constants
pub mod constants;

/// Persistence
pub mod database;

/// Error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Workout session lifecycle
pub mod session;

/// Frame analysis worker thread
pub mod worker;

pub use reptrack_core;
pub use reptrack_intelligence;
