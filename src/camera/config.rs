use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/camera.toml";
const MIN_SMOOTHING: f32 = 0.001;
const MIN_SCALE: f32 = 0.001;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCameraConfig {
    #[serde(default)]
    follow: RawFollowSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFollowSection {
    smoothing: f32,
    offset: [f32; 3],
    depth: f32,
    scale: f32,
}

impl Default for RawFollowSection {
    fn default() -> Self {
        Self {
            smoothing: 0.125,
            offset: [0.0, 2.0, 0.0],
            depth: 10.0,
            scale: 1.0 / 48.0,
        }
    }
}

/// Follow camera tuning loaded from `config/camera.toml`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub smoothing: f32,
    pub offset: Vec3,
    /// Camera z, kept for the camera's lifetime.
    pub depth: f32,
    /// Orthographic projection scale (world units per pixel).
    pub scale: f32,
}

impl CameraSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawCameraConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawCameraConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawCameraConfig::default().into()
            }
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        RawCameraConfig::default().into()
    }
}

impl From<RawCameraConfig> for CameraSettings {
    fn from(value: RawCameraConfig) -> Self {
        let defaults = RawFollowSection::default();
        let follow = value.follow;

        let smoothing = if follow.smoothing.is_finite() {
            follow.smoothing.clamp(MIN_SMOOTHING, 1.0)
        } else {
            defaults.smoothing
        };
        let offset = Vec3::from_array(follow.offset);
        let offset = if offset.is_finite() {
            offset
        } else {
            Vec3::from_array(defaults.offset)
        };
        let depth = if follow.depth.is_finite() {
            follow.depth
        } else {
            defaults.depth
        };
        let scale = if follow.scale.is_finite() {
            follow.scale.max(MIN_SCALE)
        } else {
            defaults.scale
        };

        Self {
            smoothing,
            offset,
            depth,
            scale,
        }
    }
}
