//! Systems for the world module.
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::world::components::{GameLayer, Ground, PlatformSpec};

const PLATFORM_COLOR: Color = Color::srgb(0.32, 0.45, 0.3);

/// Downward acceleration in world units per second squared.
pub const WORLD_GRAVITY: f32 = 30.0;

/// Level layout in world units. The first entry is the floor.
pub const LEVEL_PLATFORMS: [PlatformSpec; 6] = [
    PlatformSpec::new(0.0, -3.0, 60.0, 1.0),
    PlatformSpec::new(-6.0, -0.5, 4.0, 0.5),
    PlatformSpec::new(0.0, 1.5, 3.0, 0.5),
    PlatformSpec::new(6.0, 3.5, 4.0, 0.5),
    PlatformSpec::new(12.0, 1.0, 3.0, 0.5),
    PlatformSpec::new(18.0, -1.0, 5.0, 0.5),
];

/// Spawns the static ground platforms on the ground layer.
pub fn spawn_level(mut commands: Commands) {
    for (index, platform) in LEVEL_PLATFORMS.iter().enumerate() {
        commands.spawn((
            Ground,
            Name::new(format!("Platform {}", index)),
            Sprite::from_color(PLATFORM_COLOR, platform.size),
            Transform::from_translation(platform.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(platform.size.x, platform.size.y),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Default, GameLayer::Player]),
        ));
    }

    info!("Spawned level with {} platforms", LEVEL_PLATFORMS.len());
}
