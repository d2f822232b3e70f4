//! Components for the player character.
use bevy::prelude::*;

use crate::player::controller::MovementController;

/// Marker component identifying the player-controlled entity.
#[derive(Component, Debug)]
pub struct Player;

/// Movement state for an entity driven by keyboard/gamepad input.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct PlayerController(pub MovementController);
