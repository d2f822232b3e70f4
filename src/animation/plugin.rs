//! Animation plugin wiring the sprite clip player into the animation pass.
use bevy::prelude::*;

use crate::animation::systems::animate_player_sprites;
use crate::core::FrameSet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_player_sprites.in_set(FrameSet::Animation));
    }
}
