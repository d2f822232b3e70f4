//! Smoothed follow behaviour for a 2D camera.
use bevy::prelude::*;

use crate::core::{check_finite, ConfigError};

/// Moves a camera a fixed fraction of the way toward `target + offset` each late pass.
///
/// The step is a literal lerp by `smoothing`, not scaled by frame time, and
/// the camera keeps its own depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    smoothing: f32,
    offset: Vec3,
}

impl CameraFollow {
    pub fn new(smoothing: f32, offset: Vec3) -> Result<Self, ConfigError> {
        let smoothing = check_finite("smoothing", smoothing)?;
        if smoothing <= 0.0 || smoothing > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "smoothing",
                value: smoothing,
                min: 0.0,
                max: 1.0,
            });
        }
        if !offset.is_finite() {
            return Err(ConfigError::NonFinite { field: "offset" });
        }

        Ok(Self { smoothing, offset })
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Next camera position. Without a target the camera stays where it is.
    pub fn late_update(&self, current: Vec3, target: Option<Vec3>) -> Vec3 {
        let Some(target) = target else {
            return current;
        };

        let desired = target + self.offset;
        let smoothed = current.lerp(desired, self.smoothing);
        Vec3::new(smoothed.x, smoothed.y, current.z)
    }
}
