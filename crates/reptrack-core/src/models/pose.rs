// ABOUTME: Joint and frame landmark types produced by the external pose model
// ABOUTME: Typed x/y(/z) positions indexed by the fixed anatomical numbering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One tracked anatomical point, normalized to `[0,1]` image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position (grows downwards)
    pub y: f64,
    /// Optional depth estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Joint {
    /// Planar joint
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Joint with a depth component
    #[must_use]
    pub const fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Whether both planar coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Joints for one detected body in one frame
///
/// Produced once per analyzed frame and dropped after analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameLandmarks {
    joints: Vec<Joint>,
}

impl FrameLandmarks {
    /// Wrap an ordered joint list
    #[must_use]
    pub const fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    /// Number of joints present
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// True when the pose model returned no joints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Joint at an anatomical index
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLandmarks` when the frame is shorter than `index + 1`
    pub fn joint(&self, index: usize) -> AppResult<Joint> {
        self.joints
            .get(index)
            .copied()
            .ok_or_else(|| AppError::insufficient_landmarks(index, self.joints.len()))
    }

    /// All joints in anatomical order
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }
}

impl From<Vec<Joint>> for FrameLandmarks {
    fn from(joints: Vec<Joint>) -> Self {
        Self::new(joints)
    }
}
