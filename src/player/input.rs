//! Keyboard/gamepad adapter for the movement controller and key-name parsing.
use bevy::prelude::*;

use crate::player::controller::ControlInput;

/// Stick deflection below this reads as zero on the raw axis.
pub const AXIS_DEAD_ZONE: f32 = 0.19;

const AXIS_NEGATIVE_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const AXIS_POSITIVE_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const JUMP_ACTION_KEY: KeyCode = KeyCode::Space;
const JUMP_ACTION_BUTTON: GamepadButton = GamepadButton::South;

/// Reads the current frame's keyboard state and, when connected, the first gamepad.
pub struct DeviceInput<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub gamepad: Option<&'a Gamepad>,
}

impl DeviceInput<'_> {
    fn keyboard_axis(&self) -> f32 {
        let negative = self.keyboard.any_pressed(AXIS_NEGATIVE_KEYS);
        let positive = self.keyboard.any_pressed(AXIS_POSITIVE_KEYS);
        digital_axis(negative, positive)
    }

    fn gamepad_axis(&self) -> f32 {
        let Some(gamepad) = self.gamepad else {
            return 0.0;
        };

        let stick = apply_dead_zone(gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0));
        if stick != 0.0 {
            return stick;
        }

        digital_axis(
            gamepad.pressed(GamepadButton::DPadLeft),
            gamepad.pressed(GamepadButton::DPadRight),
        )
    }
}

impl ControlInput for DeviceInput<'_> {
    fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard.pressed(key)
    }

    fn key_just_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.just_pressed(key)
    }

    fn horizontal_axis(&self) -> f32 {
        let keys = self.keyboard_axis();
        if keys != 0.0 {
            keys
        } else {
            self.gamepad_axis()
        }
    }

    fn jump_action_just_pressed(&self) -> bool {
        self.keyboard.just_pressed(JUMP_ACTION_KEY)
            || self
                .gamepad
                .is_some_and(|gamepad| gamepad.just_pressed(JUMP_ACTION_BUTTON))
    }
}

fn digital_axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Zeroes small deflections and clamps the rest into [-1, 1].
pub fn apply_dead_zone(value: f32) -> f32 {
    if !value.is_finite() || value.abs() < AXIS_DEAD_ZONE {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Parses a key name from config (e.g. `"A"`, `"space"`, `"ArrowLeft"`).
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let normalised: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase();
    let normalised = normalised.strip_prefix("key").unwrap_or(&normalised);

    let key = match normalised {
        "a" => KeyCode::KeyA,
        "b" => KeyCode::KeyB,
        "c" => KeyCode::KeyC,
        "d" => KeyCode::KeyD,
        "e" => KeyCode::KeyE,
        "f" => KeyCode::KeyF,
        "g" => KeyCode::KeyG,
        "h" => KeyCode::KeyH,
        "i" => KeyCode::KeyI,
        "j" => KeyCode::KeyJ,
        "k" => KeyCode::KeyK,
        "l" => KeyCode::KeyL,
        "m" => KeyCode::KeyM,
        "n" => KeyCode::KeyN,
        "o" => KeyCode::KeyO,
        "p" => KeyCode::KeyP,
        "q" => KeyCode::KeyQ,
        "r" => KeyCode::KeyR,
        "s" => KeyCode::KeyS,
        "t" => KeyCode::KeyT,
        "u" => KeyCode::KeyU,
        "v" => KeyCode::KeyV,
        "w" => KeyCode::KeyW,
        "x" => KeyCode::KeyX,
        "y" => KeyCode::KeyY,
        "z" => KeyCode::KeyZ,
        "space" => KeyCode::Space,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "left" | "arrowleft" => KeyCode::ArrowLeft,
        "right" | "arrowright" => KeyCode::ArrowRight,
        "up" | "arrowup" => KeyCode::ArrowUp,
        "down" | "arrowdown" => KeyCode::ArrowDown,
        "shift" | "leftshift" | "shiftleft" => KeyCode::ShiftLeft,
        "rightshift" | "shiftright" => KeyCode::ShiftRight,
        "ctrl" | "control" | "leftcontrol" | "controlleft" => KeyCode::ControlLeft,
        "rightcontrol" | "controlright" => KeyCode::ControlRight,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse_in_several_spellings() {
        assert_eq!(parse_key_code("A"), Some(KeyCode::KeyA));
        assert_eq!(parse_key_code("KeyD"), Some(KeyCode::KeyD));
        assert_eq!(parse_key_code(" space "), Some(KeyCode::Space));
        assert_eq!(parse_key_code("Arrow_Left"), Some(KeyCode::ArrowLeft));
        assert_eq!(parse_key_code("left-shift"), Some(KeyCode::ShiftLeft));
        assert_eq!(parse_key_code("F13"), None);
        assert_eq!(parse_key_code(""), None);
    }

    #[test]
    fn dead_zone_zeroes_small_deflection() {
        assert_eq!(apply_dead_zone(0.1), 0.0);
        assert_eq!(apply_dead_zone(-0.18), 0.0);
        assert_eq!(apply_dead_zone(0.5), 0.5);
        assert_eq!(apply_dead_zone(-1.4), -1.0);
        assert_eq!(apply_dead_zone(f32::NAN), 0.0);
    }

    #[test]
    fn keyboard_axis_cancels_when_both_directions_held() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ArrowLeft);
        let input = DeviceInput {
            keyboard: &keyboard,
            gamepad: None,
        };
        assert_eq!(input.horizontal_axis(), -1.0);

        keyboard.press(KeyCode::ArrowRight);
        let input = DeviceInput {
            keyboard: &keyboard,
            gamepad: None,
        };
        assert_eq!(input.horizontal_axis(), 0.0);
    }

    #[test]
    fn space_counts_as_jump_action_only_on_the_press_frame() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Space);
        let input = DeviceInput {
            keyboard: &keyboard,
            gamepad: None,
        };
        assert!(input.jump_action_just_pressed());
        assert!(input.key_held(KeyCode::Space));

        keyboard.clear();
        let input = DeviceInput {
            keyboard: &keyboard,
            gamepad: None,
        };
        assert!(!input.jump_action_just_pressed());
        assert!(input.key_held(KeyCode::Space));
    }
}
