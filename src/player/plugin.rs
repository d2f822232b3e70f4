//! Player plugin wiring spawn, variable-step and fixed-step systems.
use bevy::prelude::*;

use crate::core::FrameSet;
use crate::player::{
    config::PlayerSettings,
    systems::{apply_horizontal_velocity, spawn_player, update_player_controller},
};
use crate::world::systems::spawn_level;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let settings = PlayerSettings::load_or_default();
        info!(
            "Player configured: speed {:.2}, jump {:.2}, keys {:?}/{:?}/{:?}",
            settings.movement.move_speed,
            settings.movement.jump_impulse,
            settings.movement.keys.left,
            settings.movement.keys.right,
            settings.movement.keys.jump,
        );

        app.insert_resource(settings)
            .add_systems(Startup, spawn_player.after(spawn_level))
            .add_systems(FixedUpdate, apply_horizontal_velocity)
            .add_systems(Update, update_player_controller.in_set(FrameSet::Control));

        #[cfg(feature = "core_debug")]
        {
            use crate::player::systems::{draw_ground_probes, log_player_state, PlayerDebugTimer};

            app.insert_resource(PlayerDebugTimer::default())
                .add_systems(Update, (log_player_state, draw_ground_probes).after(FrameSet::Control));
        }
    }
}
