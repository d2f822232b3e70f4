//! Animation parameters and sprite clip state.
use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

use crate::player::controller::{AnimationSink, FALLING_PARAM, JUMPING_PARAM, RUNNING_PARAM};

/// Named boolean parameters written by gameplay code and read by the clip player.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimationParameters {
    bools: HashMap<String, bool>,
}

impl AnimationParameters {
    /// Unset parameters read as `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }
}

impl AnimationSink for AnimationParameters {
    fn set_bool(&mut self, name: &str, value: bool) {
        match self.bools.get_mut(name) {
            Some(current) => *current = value,
            None => {
                self.bools.insert(name.to_string(), value);
            }
        }
    }
}

/// Clip the player sprite is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerAnimation {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl PlayerAnimation {
    /// Airborne states take priority over running.
    pub fn from_parameters(parameters: &AnimationParameters) -> Self {
        if parameters.get_bool(JUMPING_PARAM) {
            Self::Jump
        } else if parameters.get_bool(FALLING_PARAM) {
            Self::Fall
        } else if parameters.get_bool(RUNNING_PARAM) {
            Self::Run
        } else {
            Self::Idle
        }
    }
}

/// A run of atlas frames plus the tint used when the sprite has no atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteClip {
    pub first: usize,
    pub frames: usize,
    pub seconds_per_frame: f32,
    pub tint: Color,
}

impl SpriteClip {
    pub const fn new(first: usize, frames: usize, seconds_per_frame: f32, tint: Color) -> Self {
        Self {
            first,
            frames,
            seconds_per_frame,
            tint,
        }
    }
}

/// Clip set for a four-state character sheet.
#[derive(Debug, Clone, Copy)]
pub struct PlayerClips {
    pub idle: SpriteClip,
    pub run: SpriteClip,
    pub jump: SpriteClip,
    pub fall: SpriteClip,
}

impl PlayerClips {
    pub fn get(&self, state: PlayerAnimation) -> SpriteClip {
        match state {
            PlayerAnimation::Idle => self.idle,
            PlayerAnimation::Run => self.run,
            PlayerAnimation::Jump => self.jump,
            PlayerAnimation::Fall => self.fall,
        }
    }
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle: SpriteClip::new(0, 4, 0.2, Color::srgb(0.85, 0.85, 0.9)),
            run: SpriteClip::new(4, 6, 0.08, Color::srgb(0.95, 0.75, 0.3)),
            jump: SpriteClip::new(10, 1, 0.1, Color::srgb(0.4, 0.8, 0.95)),
            fall: SpriteClip::new(11, 1, 0.1, Color::srgb(0.65, 0.45, 0.9)),
        }
    }
}

/// Playback state for a sprite driven by [`AnimationParameters`].
#[derive(Component, Debug)]
pub struct SpriteAnimator {
    clips: PlayerClips,
    state: PlayerAnimation,
    frame: usize,
    timer: Timer,
}

impl SpriteAnimator {
    pub fn new(clips: PlayerClips) -> Self {
        let state = PlayerAnimation::default();
        Self {
            timer: frame_timer(clips.get(state)),
            clips,
            state,
            frame: 0,
        }
    }

    pub fn state(&self) -> PlayerAnimation {
        self.state
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn clip(&self) -> SpriteClip {
        self.clips.get(self.state)
    }

    /// Switches to `state` (restarting the clip) or advances the current clip.
    /// Returns `true` when the state changed.
    pub fn advance(&mut self, state: PlayerAnimation, delta: Duration) -> bool {
        if state != self.state {
            self.state = state;
            self.frame = 0;
            self.timer = frame_timer(self.clip());
            return true;
        }

        let frames = self.clip().frames.max(1);
        let elapsed_frames = self.timer.tick(delta).times_finished_this_tick() as usize;
        self.frame = (self.frame + elapsed_frames) % frames;
        false
    }
}

impl Default for SpriteAnimator {
    fn default() -> Self {
        Self::new(PlayerClips::default())
    }
}

fn frame_timer(clip: SpriteClip) -> Timer {
    Timer::from_seconds(clip.seconds_per_frame.max(0.001), TimerMode::Repeating)
}
