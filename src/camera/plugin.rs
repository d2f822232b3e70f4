//! Camera plugin wiring the follow camera into the late pass.
use bevy::prelude::*;

use crate::camera::{
    config::CameraSettings,
    systems::{attach_camera_to_player, follow_camera_target, spawn_follow_camera},
};
use crate::core::FrameSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let settings = CameraSettings::load_or_default();
        info!(
            "Camera configured: smoothing {:.3}, offset {}, depth {:.1}",
            settings.smoothing, settings.offset, settings.depth
        );

        app.insert_resource(settings)
            .add_systems(Startup, spawn_follow_camera)
            .add_systems(
                PostUpdate,
                (attach_camera_to_player, follow_camera_target)
                    .chain()
                    .in_set(FrameSet::Camera),
            );
    }
}
