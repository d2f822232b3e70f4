//! Systems driving the player movement controller.
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::components::{AnimationParameters, SpriteAnimator};
use crate::player::{
    components::{Player, PlayerController},
    config::PlayerSettings,
    controller::{GroundQuery, MovementController, PhysicsBody, PlayerRig},
    input::DeviceInput,
};
use crate::world::components::GameLayer;

/// Left of the first raised platform, dropping onto the floor.
const PLAYER_SPAWN: Vec2 = Vec2::new(-12.0, 0.0);
const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.2);
const PLAYER_CAPSULE_RADIUS: f32 = 0.35;
const PLAYER_CAPSULE_LENGTH: f32 = 0.5;

impl PhysicsBody for LinearVelocity {
    fn velocity(&self) -> Vec2 {
        self.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.0 = velocity;
    }
}

/// Ground probe backed by the physics engine's spatial query.
struct SpatialGround<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
}

impl GroundQuery for SpatialGround<'_, '_, '_> {
    fn overlaps_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let probe = Collider::circle(radius);
        let filter = SpatialQueryFilter::from_mask(mask);
        !self
            .spatial
            .shape_intersections(&probe, center, 0.0, &filter)
            .is_empty()
    }
}

/// Spawns the player body with its controller, animation sink and sprite.
pub fn spawn_player(mut commands: Commands, settings: Res<PlayerSettings>) {
    let controller = match MovementController::new(settings.movement) {
        Ok(controller) => controller,
        Err(err) => {
            error!("Player not spawned: invalid movement settings ({})", err);
            return;
        }
    };

    let entity = commands.spawn(player_body(controller, PLAYER_SPAWN)).id();

    info!("Spawned player {:?} at {}", entity, PLAYER_SPAWN);
}

fn player_body(controller: MovementController, position: Vec2) -> impl Bundle {
    (
        Player,
        Name::new("Player"),
        PlayerController(controller),
        AnimationParameters::default(),
        SpriteAnimator::default(),
        Sprite::from_color(Color::WHITE, PLAYER_SIZE),
        Transform::from_translation(position.extend(1.0)),
        RigidBody::Dynamic,
        Collider::capsule(PLAYER_CAPSULE_RADIUS, PLAYER_CAPSULE_LENGTH),
        CollisionLayers::new(GameLayer::Player, [GameLayer::Default, GameLayer::Ground]),
        LockedAxes::ROTATION_LOCKED,
        Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
        LinearVelocity::default(),
    )
}

/// Variable-step pass: reads devices, probes the ground, jumps and pushes animation flags.
#[allow(clippy::type_complexity)]
pub fn update_player_controller(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    spatial: SpatialQuery,
    mut players: Query<
        (
            Entity,
            &mut PlayerController,
            &Transform,
            &mut LinearVelocity,
            &mut AnimationParameters,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let input = DeviceInput {
        keyboard: &keyboard,
        gamepad: gamepads.iter().next(),
    };
    let ground = SpatialGround { spatial: &spatial };

    for (entity, mut controller, transform, mut velocity, mut parameters, mut sprite) in
        players.iter_mut()
    {
        let mut rig = PlayerRig {
            position: transform.translation.truncate(),
            body: &mut *velocity,
            ground: &ground,
            animator: &mut *parameters,
            sprite: &mut *sprite,
        };
        let outcome = controller.update(&input, &mut rig);

        if outcome.jumped {
            debug!(
                "Player {:?} jumped with impulse {:.2} (input {:.2})",
                entity,
                controller.settings().jump_impulse,
                outcome.move_input
            );
        }
        trace!(
            "Player {:?} grounded: {} | animation: {:?}",
            entity,
            outcome.grounded,
            outcome.flags
        );
    }
}

/// Fixed-step pass: horizontal velocity follows the last resolved input.
pub fn apply_horizontal_velocity(
    mut players: Query<(&PlayerController, &mut LinearVelocity), With<Player>>,
) {
    for (controller, mut velocity) in players.iter_mut() {
        controller.fixed_update(&mut *velocity);
    }
}

#[cfg(feature = "core_debug")]
#[derive(Resource)]
pub struct PlayerDebugTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for PlayerDebugTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

#[cfg(feature = "core_debug")]
pub fn log_player_state(
    time: Res<Time>,
    mut timer: ResMut<PlayerDebugTimer>,
    players: Query<(&PlayerController, &Transform, &LinearVelocity), With<Player>>,
) {
    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }

    for (controller, transform, velocity) in players.iter() {
        info!(
            target: "core_debug",
            "Player pos: ({:.2}, {:.2}) | vel: ({:.2}, {:.2}) | input: {:.2} | grounded: {}",
            transform.translation.x,
            transform.translation.y,
            velocity.x,
            velocity.y,
            controller.move_input(),
            controller.is_grounded(),
        );
    }
}

#[cfg(feature = "core_debug")]
pub fn draw_ground_probes(
    mut gizmos: Gizmos,
    players: Query<(&PlayerController, &Transform), With<Player>>,
) {
    for (controller, transform) in players.iter() {
        let probe = controller.settings().probe;
        let center = transform.translation.truncate() + probe.offset;
        let color = if controller.is_grounded() {
            Color::srgb(0.2, 0.9, 0.3)
        } else {
            Color::srgb(0.9, 0.3, 0.2)
        };
        gizmos.circle_2d(bevy::math::Isometry2d::from_translation(center), probe.radius, color);
    }
}
