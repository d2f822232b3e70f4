//! Systems for the follow camera.
use bevy::prelude::*;

use crate::camera::{
    components::FollowCamera, config::CameraSettings, follow::CameraFollow,
};
use crate::player::components::Player;

/// Spawns the 2D camera at the configured depth with follow behaviour attached.
pub fn spawn_follow_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    let mut camera = commands.spawn((
        Camera2d,
        Name::new("Follow Camera"),
        Projection::Orthographic(OrthographicProjection {
            scale: settings.scale,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 0.0, settings.depth),
    ));

    match CameraFollow::new(settings.smoothing, settings.offset) {
        Ok(follow) => {
            camera.insert(FollowCamera::new(follow));
            info!(
                "Spawned follow camera {:?} (smoothing {:.3}, offset {})",
                camera.id(),
                follow.smoothing(),
                follow.offset()
            );
        }
        Err(err) => {
            error!("Camera will stay static: invalid follow settings ({})", err);
        }
    }
}

/// Points any untargeted follow camera at a newly spawned player.
pub fn attach_camera_to_player(
    players: Query<Entity, Added<Player>>,
    mut cameras: Query<&mut FollowCamera>,
) {
    let Some(player) = players.iter().next() else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        if camera.target().is_none() {
            camera.set_target(player);
            info!("Follow camera now tracking player {:?}", player);
        }
    }
}

/// Late pass: eases each follow camera toward its target, keeping camera depth.
pub fn follow_camera_target(
    mut cameras: Query<(Entity, &mut FollowCamera, &mut Transform)>,
    targets: Query<&Transform, Without<FollowCamera>>,
) {
    for (camera_entity, mut camera, mut transform) in cameras.iter_mut() {
        let target_position = match camera.target() {
            Some(target) => match targets.get(target) {
                Ok(target_transform) => Some(target_transform.translation),
                Err(_) => {
                    debug!(
                        "Camera {:?} target {:?} no longer exists; holding position",
                        camera_entity, target
                    );
                    camera.clear_target();
                    None
                }
            },
            None => None,
        };

        let current = transform.translation;
        let next = camera.follow().late_update(current, target_position);
        if next != current {
            transform.translation = next;
        }
    }
}
