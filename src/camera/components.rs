//! Components for the follow camera.
use bevy::prelude::*;

use crate::camera::follow::CameraFollow;

/// Camera that eases toward a target entity it does not own.
#[derive(Component, Debug)]
pub struct FollowCamera {
    target: Option<Entity>,
    follow: CameraFollow,
}

impl FollowCamera {
    pub fn new(follow: CameraFollow) -> Self {
        Self {
            target: None,
            follow,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn follow(&self) -> &CameraFollow {
        &self.follow
    }
}
