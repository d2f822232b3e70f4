//! Components and physics layers used by the world module.
use avian2d::prelude::*;
use bevy::prelude::*;

/// Collision layers shared by the level and the player body.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors and platforms the player can stand on.
    Ground,
    /// The player body. Kept off the ground mask so the probe never hits it.
    Player,
}

impl GameLayer {
    /// Parses a layer name as written in config files (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ground" => Some(Self::Ground),
            "player" => Some(Self::Player),
            _ => None,
        }
    }
}

/// Builds a mask from layer names, returning any names that did not resolve.
pub fn layer_mask_from_names(names: &[String]) -> (LayerMask, Vec<String>) {
    let mut mask = LayerMask::NONE;
    let mut unknown = Vec::new();
    for name in names {
        match GameLayer::from_name(name) {
            Some(layer) => mask = LayerMask(mask.0 | LayerMask::from(layer).0),
            None => unknown.push(name.clone()),
        }
    }
    (mask, unknown)
}

/// Marker for static ground colliders.
#[derive(Component, Debug, Default)]
pub struct Ground;

/// Static platform description used when spawning the level.
#[derive(Debug, Clone, Copy)]
pub struct PlatformSpec {
    pub center: Vec2,
    pub size: Vec2,
}

impl PlatformSpec {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
}
