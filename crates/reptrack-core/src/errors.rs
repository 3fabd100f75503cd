// ABOUTME: Unified error type and error codes shared across the reptrack workspace
// ABOUTME: Maps geometry, landmark, storage, and configuration failures onto stable codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message and an optional source error.
//!
//! None of these errors are fatal to a running session: the analysis pipeline
//! treats them as "no event produced" and leaves counter and difficulty state untouched.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input & geometry (3000-3999)
    /// Generic invalid input
    InvalidInput = 3000,
    /// A joint coordinate was NaN or infinite
    MalformedGeometry = 3001,
    /// A frame carried fewer joints than the exercise requires
    InsufficientLandmarks = 3002,
    /// A value fell outside its permitted range
    ValueOutOfRange = 3003,

    // Resource management (4000-4999)
    /// Requested record does not exist
    ResourceNotFound = 4000,

    // Configuration (6000-6999)
    /// Configuration failed validation or parsing
    ConfigInvalid = 6000,

    // Internal (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Storage collaborator failure
    DatabaseError = 9001,
    /// JSON encode/decode failure
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MalformedGeometry => "Joint coordinates are not finite",
            Self::InsufficientLandmarks => "Frame does not carry enough landmarks",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the pipeline should simply skip the offending frame
    #[must_use]
    pub const fn is_frame_local(&self) -> bool {
        matches!(self, Self::MalformedGeometry | Self::InsufficientLandmarks)
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Non-finite joint coordinates
    #[must_use]
    pub fn malformed_geometry(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedGeometry, message)
    }

    /// Frame lacks a landmark index the exercise needs
    #[must_use]
    pub fn insufficient_landmarks(required: usize, available: usize) -> Self {
        Self::new(
            ErrorCode::InsufficientLandmarks,
            format!("need {required} landmarks, frame has {available}"),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value out of range
    #[must_use]
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Database error
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_description_and_message() {
        let err = AppError::insufficient_landmarks(28, 17);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Frame does not carry enough landmarks"));
        assert!(rendered.contains("28"));
        assert!(err.code.is_frame_local());
    }

    #[test]
    fn error_codes_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::MalformedGeometry).unwrap_or_default();
        assert_eq!(json, "\"MALFORMED_GEOMETRY\"");
    }
}
