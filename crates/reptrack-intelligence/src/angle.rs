// ABOUTME: Joint angle computation from three 2D landmarks
// ABOUTME: Returns the vertex angle in degrees folded into [0,180]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reptrack_core::errors::{AppError, AppResult};
use reptrack_core::models::Joint;

/// Angle at vertex `b` formed by the segments `b→a` and `b→c`, in degrees
///
/// Computed as `|atan2(c - b) - atan2(a - b)|`, folded to `360 - angle` when
/// the raw value exceeds 180. Depth is ignored.
///
/// # Errors
///
/// Returns `MalformedGeometry` when any planar coordinate is NaN or infinite
pub fn joint_angle(a: Joint, b: Joint, c: Joint) -> AppResult<f64> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(AppError::malformed_geometry(format!(
            "non-finite joint in angle triple ({a:?}, {b:?}, {c:?})"
        )));
    }

    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.to_degrees().abs();
    Ok(if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    })
}
