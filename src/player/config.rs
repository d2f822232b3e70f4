use std::{fs, path::Path};

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use serde::Deserialize;

use crate::player::controller::{GroundProbe, KeyBindings, MovementSettings};
use crate::player::input::parse_key_code;
use crate::world::components::{layer_mask_from_names, GameLayer};

const CONFIG_PATH: &str = "config/player.toml";
const MIN_PROBE_RADIUS: f32 = 0.01;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPlayerConfig {
    #[serde(default)]
    movement: RawMovement,
    #[serde(default)]
    input: RawInput,
    #[serde(default)]
    ground_check: RawGroundCheck,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMovement {
    move_speed: f32,
    jump_impulse: f32,
}

impl Default for RawMovement {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_impulse: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInput {
    left: String,
    right: String,
    jump: String,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            left: "A".to_string(),
            right: "D".to_string(),
            jump: "Space".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawGroundCheck {
    offset: [f32; 2],
    radius: f32,
    layers: Vec<String>,
}

impl Default for RawGroundCheck {
    fn default() -> Self {
        Self {
            offset: [0.0, -0.6],
            radius: 0.2,
            layers: vec!["ground".to_string()],
        }
    }
}

/// Runtime player configuration derived from `config/player.toml`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSettings {
    pub movement: MovementSettings,
}

impl PlayerSettings {
    pub fn load_or_default() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse_or_default(&data, path),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawPlayerConfig::default().into()
            }
        }
    }

    fn parse_or_default(data: &str, path: &Path) -> Self {
        match toml::from_str::<RawPlayerConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawPlayerConfig::default().into()
            }
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        RawPlayerConfig::default().into()
    }
}

impl From<RawPlayerConfig> for PlayerSettings {
    fn from(value: RawPlayerConfig) -> Self {
        let defaults = KeyBindings::default();
        let keys = KeyBindings {
            left: key_or_default("left", &value.input.left, defaults.left),
            right: key_or_default("right", &value.input.right, defaults.right),
            jump: key_or_default("jump", &value.input.jump, defaults.jump),
        };

        let fallback_probe = GroundProbe::default();
        let [offset_x, offset_y] = value.ground_check.offset;
        let offset = if offset_x.is_finite() && offset_y.is_finite() {
            Vec2::new(offset_x, offset_y)
        } else {
            fallback_probe.offset
        };
        let radius = if value.ground_check.radius.is_finite() {
            value.ground_check.radius.max(MIN_PROBE_RADIUS)
        } else {
            fallback_probe.radius
        };

        let (mut ground_layers, unknown) = layer_mask_from_names(&value.ground_check.layers);
        for name in unknown {
            warn!("Unknown ground layer '{}' in {}; ignoring", name, CONFIG_PATH);
        }
        if ground_layers == LayerMask::NONE {
            warn!(
                "No ground layers configured in {}; using the ground layer",
                CONFIG_PATH
            );
            ground_layers = GameLayer::Ground.into();
        }

        let default_movement = RawMovement::default();
        let jump_impulse = value.movement.jump_impulse;
        let jump_impulse = if jump_impulse.is_finite() && jump_impulse > 0.0 {
            jump_impulse
        } else {
            warn!(
                "jump_impulse must be positive in {} (got {}); using {}",
                CONFIG_PATH, jump_impulse, default_movement.jump_impulse
            );
            default_movement.jump_impulse
        };

        let movement = MovementSettings {
            move_speed: finite_or(value.movement.move_speed, default_movement.move_speed)
                .max(0.0),
            jump_impulse,
            keys,
            probe: GroundProbe { offset, radius },
            ground_layers,
        };

        Self { movement }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn key_or_default(binding: &str, name: &str, fallback: KeyCode) -> KeyCode {
    parse_key_code(name).unwrap_or_else(|| {
        warn!(
            "Unknown key '{}' for {} binding in {}; using {:?}",
            name, binding, CONFIG_PATH, fallback
        );
        fallback
    })
}
