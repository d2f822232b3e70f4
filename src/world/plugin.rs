//! WorldPlugin sets up gravity and the static level geometry.
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::world::systems::{spawn_level, WORLD_GRAVITY};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::NEG_Y * WORLD_GRAVITY))
            .add_systems(Startup, spawn_level);
    }
}
