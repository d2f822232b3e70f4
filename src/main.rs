use avian2d::prelude::*;
use bevy::prelude::*;

mod animation;
mod camera;
mod core;
mod player;
mod world;

use crate::{
    animation::AnimationPlugin, camera::CameraPlugin, core::CorePlugin, player::PlayerPlugin,
    world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Platformer".to_string(),
                    ..default()
                }),
                ..default()
            }),
            PhysicsPlugins::default(),
            CorePlugin::default(),
            WorldPlugin,
            PlayerPlugin,
            AnimationPlugin,
            CameraPlugin, // Late pass reads the player position after physics
        ))
        .insert_resource(ClearColor(Color::srgb(0.1, 0.11, 0.16)))
        .run();
}
