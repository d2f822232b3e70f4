//! Systems for the animation module.
use bevy::prelude::*;

use crate::animation::components::{AnimationParameters, PlayerAnimation, SpriteAnimator};

/// Picks the clip from the current parameters, advances it and writes the frame to the sprite.
pub fn animate_player_sprites(
    time: Res<Time>,
    mut query: Query<(Entity, &AnimationParameters, &mut SpriteAnimator, &mut Sprite)>,
) {
    for (entity, parameters, mut animator, mut sprite) in query.iter_mut() {
        let state = PlayerAnimation::from_parameters(parameters);
        let previous = animator.state();
        if animator.advance(state, time.delta()) {
            debug!(
                "Entity {:?} animation {:?} -> {:?}",
                entity, previous, state
            );
        }

        let clip = animator.clip();
        match sprite.texture_atlas.as_mut() {
            Some(atlas) => {
                let index = clip.first + animator.frame();
                if atlas.index != index {
                    atlas.index = index;
                }
            }
            None => {
                if sprite.color != clip.tint {
                    sprite.color = clip.tint;
                }
            }
        }
    }
}
