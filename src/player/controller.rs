//! Engine-agnostic movement logic for the player character.
//!
//! The controller never touches the ECS directly. Each pass receives its
//! collaborators explicitly: a [`ControlInput`] snapshot, and a [`PlayerRig`]
//! bundling the physics body, ground query, animation sink and sprite.
use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::core::{check_finite, check_non_negative, check_positive, ConfigError};

/// Vertical speed above which an airborne body counts as jumping, and below
/// whose negation it counts as falling.
pub const AIRBORNE_VELOCITY_THRESHOLD: f32 = 0.1;

pub const RUNNING_PARAM: &str = "is_running";
pub const JUMPING_PARAM: &str = "is_jumping";
pub const FALLING_PARAM: &str = "is_falling";

/// Per-frame input snapshot the controller reads from.
pub trait ControlInput {
    fn key_held(&self, key: KeyCode) -> bool;
    fn key_just_pressed(&self, key: KeyCode) -> bool;
    /// Raw platform horizontal axis in [-1, 1].
    fn horizontal_axis(&self) -> f32;
    /// Abstract "jump" action pressed this frame (keyboard or gamepad).
    fn jump_action_just_pressed(&self) -> bool;
}

/// Velocity read/write on the simulated body.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
}

/// Circular overlap test against a layer mask.
pub trait GroundQuery {
    fn overlaps_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool;
}

/// Receives named boolean animation parameters.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Horizontal mirroring of the rendered sprite.
pub trait SpriteFacing {
    fn flip_x(&self) -> bool;
    fn set_flip_x(&mut self, flip: bool);
}

impl SpriteFacing for Sprite {
    fn flip_x(&self) -> bool {
        self.flip_x
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}

/// Collaborators for one variable-step update.
pub struct PlayerRig<'a> {
    /// World position of the body the ground probe is offset from.
    pub position: Vec2,
    pub body: &'a mut dyn PhysicsBody,
    pub ground: &'a dyn GroundQuery,
    pub animator: &'a mut dyn AnimationSink,
    pub sprite: &'a mut dyn SpriteFacing,
}

/// Key bindings for the discrete movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
        }
    }
}

/// Ground-contact probe placed relative to the body (at its feet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub offset: Vec2,
    pub radius: f32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, -0.6),
            radius: 0.2,
        }
    }
}

/// Tunables for [`MovementController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub keys: KeyBindings,
    pub probe: GroundProbe,
    pub ground_layers: LayerMask,
}

/// Boolean animation flags derived once per update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationFlags {
    pub running: bool,
    pub jumping: bool,
    pub falling: bool,
}

impl AnimationFlags {
    pub fn derive(move_input: f32, grounded: bool, vertical_velocity: f32) -> Self {
        let airborne = !grounded;
        Self {
            running: move_input != 0.0,
            jumping: airborne && vertical_velocity > AIRBORNE_VELOCITY_THRESHOLD,
            falling: airborne && vertical_velocity < -AIRBORNE_VELOCITY_THRESHOLD,
        }
    }

    pub fn push(&self, sink: &mut dyn AnimationSink) {
        sink.set_bool(RUNNING_PARAM, self.running);
        sink.set_bool(JUMPING_PARAM, self.jumping);
        sink.set_bool(FALLING_PARAM, self.falling);
    }
}

/// What a single variable-step update decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub move_input: f32,
    pub grounded: bool,
    pub jumped: bool,
    pub flags: AnimationFlags,
}

/// Combines the discrete left/right keys with the continuous axis.
///
/// Exactly one key held wins outright. Both held or neither held defers to
/// the axis value, so holding both keys does not cancel to zero.
pub fn resolve_move_input(left_held: bool, right_held: bool, axis: f32) -> f32 {
    match (left_held, right_held) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => axis,
    }
}

/// Sprite flip for `move_input`, keeping `previous` when there is no input.
pub fn facing_flip(move_input: f32, previous: bool) -> bool {
    if move_input != 0.0 {
        move_input < 0.0
    } else {
        previous
    }
}

/// Player movement state: last resolved input and ground contact.
#[derive(Debug, Clone)]
pub struct MovementController {
    settings: MovementSettings,
    move_input: f32,
    grounded: bool,
}

impl MovementController {
    pub fn new(settings: MovementSettings) -> Result<Self, ConfigError> {
        check_non_negative("move_speed", settings.move_speed)?;
        check_positive("jump_impulse", settings.jump_impulse)?;
        check_finite("ground_check.offset.x", settings.probe.offset.x)?;
        check_finite("ground_check.offset.y", settings.probe.offset.y)?;
        check_positive("ground_check.radius", settings.probe.radius)?;
        if settings.ground_layers == LayerMask::NONE {
            return Err(ConfigError::EmptyLayerMask);
        }

        Ok(Self {
            settings,
            move_input: 0.0,
            grounded: false,
        })
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn move_input(&self) -> f32 {
        self.move_input
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Variable-step pass: input, facing, ground check, jump, animation flags.
    pub fn update(&mut self, input: &dyn ControlInput, rig: &mut PlayerRig<'_>) -> FrameOutcome {
        let keys = self.settings.keys;
        self.move_input = resolve_move_input(
            input.key_held(keys.left),
            input.key_held(keys.right),
            input.horizontal_axis(),
        );
        let flip = facing_flip(self.move_input, rig.sprite.flip_x());
        if flip != rig.sprite.flip_x() {
            rig.sprite.set_flip_x(flip);
        }

        let probe = self.settings.probe;
        self.grounded = rig.ground.overlaps_circle(
            rig.position + probe.offset,
            probe.radius,
            self.settings.ground_layers,
        );

        let jump_pressed = input.key_just_pressed(keys.jump) || input.jump_action_just_pressed();
        let jumped = self.grounded && jump_pressed;
        if jumped {
            let velocity = rig.body.velocity();
            rig.body
                .set_velocity(Vec2::new(velocity.x, self.settings.jump_impulse));
        }

        let flags = AnimationFlags::derive(self.move_input, self.grounded, rig.body.velocity().y);
        flags.push(&mut *rig.animator);

        FrameOutcome {
            move_input: self.move_input,
            grounded: self.grounded,
            jumped,
            flags,
        }
    }

    /// Fixed-step pass: horizontal velocity follows input, vertical is left to physics.
    pub fn fixed_update(&self, body: &mut dyn PhysicsBody) {
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(
            self.move_input * self.settings.move_speed,
            velocity.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    const GROUND_BITS: u32 = 0b10;

    impl PhysicsBody for Vec2 {
        fn velocity(&self) -> Vec2 {
            *self
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            *self = velocity;
        }
    }

    fn settings() -> MovementSettings {
        MovementSettings {
            move_speed: 5.0,
            jump_impulse: 12.0,
            keys: KeyBindings::default(),
            probe: GroundProbe::default(),
            ground_layers: LayerMask(GROUND_BITS),
        }
    }

    #[derive(Default)]
    struct FakeInput {
        held: HashSet<KeyCode>,
        just_pressed: HashSet<KeyCode>,
        axis: f32,
        jump_action: bool,
    }

    impl ControlInput for FakeInput {
        fn key_held(&self, key: KeyCode) -> bool {
            self.held.contains(&key)
        }

        fn key_just_pressed(&self, key: KeyCode) -> bool {
            self.just_pressed.contains(&key)
        }

        fn horizontal_axis(&self) -> f32 {
            self.axis
        }

        fn jump_action_just_pressed(&self) -> bool {
            self.jump_action
        }
    }

    struct FakeGround {
        grounded: bool,
        layer: LayerMask,
    }

    impl GroundQuery for FakeGround {
        fn overlaps_circle(&self, _center: Vec2, _radius: f32, mask: LayerMask) -> bool {
            self.grounded && (mask.0 & self.layer.0) != 0
        }
    }

    #[derive(Default)]
    struct FakeAnimator(HashMap<String, bool>);

    impl AnimationSink for FakeAnimator {
        fn set_bool(&mut self, name: &str, value: bool) {
            self.0.insert(name.to_string(), value);
        }
    }

    #[derive(Default)]
    struct FakeSprite(bool);

    impl SpriteFacing for FakeSprite {
        fn flip_x(&self) -> bool {
            self.0
        }

        fn set_flip_x(&mut self, flip: bool) {
            self.0 = flip;
        }
    }

    struct Harness {
        velocity: Vec2,
        ground: FakeGround,
        animator: FakeAnimator,
        sprite: FakeSprite,
    }

    impl Harness {
        fn new(grounded: bool) -> Self {
            Self {
                velocity: Vec2::ZERO,
                ground: FakeGround {
                    grounded,
                    layer: LayerMask(GROUND_BITS),
                },
                animator: FakeAnimator::default(),
                sprite: FakeSprite::default(),
            }
        }

        fn update(&mut self, controller: &mut MovementController, input: &FakeInput) -> FrameOutcome {
            let mut rig = PlayerRig {
                position: Vec2::ZERO,
                body: &mut self.velocity,
                ground: &self.ground,
                animator: &mut self.animator,
                sprite: &mut self.sprite,
            };
            controller.update(input, &mut rig)
        }
    }

    fn press(key: KeyCode) -> FakeInput {
        FakeInput {
            just_pressed: HashSet::from([key]),
            held: HashSet::from([key]),
            ..Default::default()
        }
    }

    #[test]
    fn discrete_keys_win_over_axis_when_exactly_one_is_held() {
        for axis in [-1.0, -0.4, 0.0, 0.7, 1.0] {
            assert_eq!(resolve_move_input(true, false, axis), -1.0);
            assert_eq!(resolve_move_input(false, true, axis), 1.0);
            assert_eq!(resolve_move_input(false, false, axis), axis);
            assert_eq!(resolve_move_input(true, true, axis), axis);
        }
    }

    #[test]
    fn flip_only_changes_on_nonzero_input() {
        let mut flip = false;
        let mut seen = Vec::new();
        for input in [1.0, 0.0, -1.0, 0.0, 0.5] {
            flip = facing_flip(input, flip);
            seen.push(flip);
        }
        assert_eq!(seen, vec![false, false, true, true, false]);
    }

    #[test]
    fn update_flips_sprite_through_input_sequence() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(true);
        let mut flips = Vec::new();

        for axis in [1.0, 0.0, -1.0] {
            let input = FakeInput {
                axis,
                ..Default::default()
            };
            harness.update(&mut controller, &input);
            flips.push(harness.sprite.0);
        }

        assert_eq!(flips, vec![false, false, true]);
    }

    #[test]
    fn jump_requires_ground_and_fresh_press() {
        let mut controller = MovementController::new(settings()).unwrap();

        let mut airborne = Harness::new(false);
        let outcome = airborne.update(&mut controller, &press(KeyCode::Space));
        assert!(!outcome.jumped);
        assert_eq!(airborne.velocity.y, 0.0);

        let mut grounded = Harness::new(true);
        grounded.velocity = Vec2::new(3.0, 0.0);
        let outcome = grounded.update(&mut controller, &press(KeyCode::Space));
        assert!(outcome.jumped);
        assert_eq!(grounded.velocity, Vec2::new(3.0, 12.0));
    }

    #[test]
    fn held_jump_key_does_not_retrigger() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(true);

        harness.update(&mut controller, &press(KeyCode::Space));
        harness.velocity = Vec2::ZERO;

        let held = FakeInput {
            held: HashSet::from([KeyCode::Space]),
            ..Default::default()
        };
        let outcome = harness.update(&mut controller, &held);
        assert!(!outcome.jumped);
        assert_eq!(harness.velocity, Vec2::ZERO);
    }

    #[test]
    fn jump_action_alone_triggers_jump() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(true);
        let input = FakeInput {
            jump_action: true,
            ..Default::default()
        };

        assert!(harness.update(&mut controller, &input).jumped);
        assert_eq!(harness.velocity.y, 12.0);
    }

    #[test]
    fn rebound_jump_key_is_honoured() {
        let mut custom = settings();
        custom.keys.jump = KeyCode::KeyW;
        let mut controller = MovementController::new(custom).unwrap();
        let mut harness = Harness::new(true);

        assert!(!harness.update(&mut controller, &press(KeyCode::Space)).jumped);
        assert!(harness.update(&mut controller, &press(KeyCode::KeyW)).jumped);
    }

    #[test]
    fn ground_probe_respects_layer_mask() {
        let mut other_mask = settings();
        other_mask.ground_layers = LayerMask(0b100);
        let mut controller = MovementController::new(other_mask).unwrap();
        let mut harness = Harness::new(true);

        let outcome = harness.update(&mut controller, &press(KeyCode::Space));
        assert!(!outcome.grounded);
        assert!(!outcome.jumped);
    }

    #[test]
    fn animation_flags_follow_thresholds() {
        assert_eq!(
            AnimationFlags::derive(0.0, false, 0.2),
            AnimationFlags {
                running: false,
                jumping: true,
                falling: false
            }
        );
        assert_eq!(
            AnimationFlags::derive(0.0, false, -0.2),
            AnimationFlags {
                running: false,
                jumping: false,
                falling: true
            }
        );
        for velocity in [-5.0, -0.2, 0.0, 0.2, 5.0] {
            let flags = AnimationFlags::derive(1.0, true, velocity);
            assert!(flags.running);
            assert!(!flags.jumping);
            assert!(!flags.falling);
        }
        let at_threshold = AnimationFlags::derive(0.0, false, 0.1);
        assert!(!at_threshold.jumping);
        let at_negative_threshold = AnimationFlags::derive(0.0, false, -0.1);
        assert!(!at_negative_threshold.falling);
    }

    #[test]
    fn update_pushes_animation_parameters() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(false);
        harness.velocity = Vec2::new(0.0, -3.0);
        let input = FakeInput {
            held: HashSet::from([KeyCode::KeyD]),
            ..Default::default()
        };

        harness.update(&mut controller, &input);

        assert_eq!(harness.animator.0.get(RUNNING_PARAM), Some(&true));
        assert_eq!(harness.animator.0.get(JUMPING_PARAM), Some(&false));
        assert_eq!(harness.animator.0.get(FALLING_PARAM), Some(&true));
    }

    #[test]
    fn jump_frame_still_reports_grounded_flags() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(true);

        let outcome = harness.update(&mut controller, &press(KeyCode::Space));
        assert!(outcome.jumped);
        assert!(!outcome.flags.jumping);
    }

    #[test]
    fn fixed_update_sets_horizontal_velocity_only() {
        let mut controller = MovementController::new(settings()).unwrap();
        let mut harness = Harness::new(false);
        let input = FakeInput {
            held: HashSet::from([KeyCode::KeyA]),
            ..Default::default()
        };
        harness.update(&mut controller, &input);

        let mut velocity = Vec2::new(0.0, -4.0);
        controller.fixed_update(&mut velocity);
        assert_eq!(velocity, Vec2::new(-5.0, -4.0));

        let analog = FakeInput {
            axis: 0.5,
            ..Default::default()
        };
        harness.update(&mut controller, &analog);
        controller.fixed_update(&mut velocity);
        assert_eq!(velocity, Vec2::new(2.5, -4.0));
    }

    #[test]
    fn construction_rejects_invalid_settings() {
        let mut bad = settings();
        bad.move_speed = -1.0;
        assert!(matches!(
            MovementController::new(bad),
            Err(ConfigError::Negative {
                field: "move_speed",
                ..
            })
        ));

        let mut bad = settings();
        bad.jump_impulse = f32::INFINITY;
        assert_eq!(
            MovementController::new(bad).unwrap_err(),
            ConfigError::NonFinite {
                field: "jump_impulse"
            }
        );

        for impulse in [0.0, -12.0] {
            let mut bad = settings();
            bad.jump_impulse = impulse;
            assert_eq!(
                MovementController::new(bad).unwrap_err(),
                ConfigError::NotPositive {
                    field: "jump_impulse",
                    value: impulse
                }
            );
        }

        let mut bad = settings();
        bad.probe.radius = 0.0;
        assert!(matches!(
            MovementController::new(bad),
            Err(ConfigError::NotPositive {
                field: "ground_check.radius",
                ..
            })
        ));

        let mut bad = settings();
        bad.ground_layers = LayerMask::NONE;
        assert_eq!(
            MovementController::new(bad).unwrap_err(),
            ConfigError::EmptyLayerMask
        );
    }
}
