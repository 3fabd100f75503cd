// ABOUTME: Runtime constants for the reptrack service: names and environment defaults
// ABOUTME: Analysis constants live in reptrack-core; this module covers the runtime crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identifiers used in logs
pub mod service_names {
    /// Default service name
    pub const REPTRACK: &str = "reptrack";
}

/// Defaults for runtime environment variables
pub mod defaults {
    /// `REPTRACK_DATABASE_URL` default
    pub const DATABASE_URL: &str = "sqlite:reptrack.db";
    /// `REPTRACK_FRAME_QUEUE` default
    pub const FRAME_QUEUE_CAPACITY: usize = 256;
}

/// Environment variable names read by the runtime crate
pub mod env_config {
    /// Database connection URL
    pub const DATABASE_URL: &str = "REPTRACK_DATABASE_URL";
    /// Bounded capacity of the frame analysis queue
    pub const FRAME_QUEUE: &str = "REPTRACK_FRAME_QUEUE";
}

/// Name of the dedicated frame analysis thread
pub const ANALYSIS_THREAD_NAME: &str = "reptrack-frame-analysis";
