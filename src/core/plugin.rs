//! CorePlugin wires the fixed-step rate and the per-frame pass ordering.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use bevy::transform::TransformSystems;

/// Matches a 0.02s physics step.
const DEFAULT_FIXED_HZ: f64 = 50.0;
const MIN_FIXED_HZ: f64 = 1.0;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Ordered passes every frame-driven behaviour is scheduled into.
///
/// `Control` and `Animation` run in `Update`, in that order. `Camera` runs in
/// `PostUpdate` ahead of transform propagation so a follow camera sees the
/// target position produced by this frame's simulation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Control,
    Animation,
    Camera,
}

/// Registers fixed-step timing and frame ordering.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    fixed_hz: f64,
}

impl CorePlugin {
    /// Creates a CorePlugin running the fixed-step pass at `fixed_hz` ticks per second.
    pub fn with_fixed_rate(fixed_hz: f64) -> Self {
        let fixed_hz = if fixed_hz.is_finite() {
            fixed_hz.max(MIN_FIXED_HZ)
        } else {
            DEFAULT_FIXED_HZ
        };
        Self { fixed_hz }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn fixed_hz(&self) -> f64 {
        self.fixed_hz
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_fixed_rate(DEFAULT_FIXED_HZ)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.fixed_hz))
            .configure_sets(Update, (FrameSet::Control, FrameSet::Animation).chain())
            .configure_sets(
                PostUpdate,
                FrameSet::Camera.before(TransformSystems::Propagate),
            )
            .add_systems(Startup, log_startup_fixed_rate);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_fixed_ticks);
        }
    }
}

fn log_startup_fixed_rate(fixed: Res<Time<Fixed>>) {
    info!(
        "CorePlugin initialised with fixed timestep: {:.4}s",
        fixed.timestep().as_secs_f32()
    );
}

#[cfg(feature = "core_debug")]
fn log_fixed_ticks(mut timer: ResMut<DebugTickTimer>, time: Res<Time>, fixed: Res<Time<Fixed>>) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "Elapsed: {:.2}s | frame dt: {:.4}s | fixed elapsed: {:.2}s | overstep: {:.3}",
            time.elapsed_secs(),
            time.delta_secs(),
            fixed.elapsed_secs(),
            fixed.overstep_fraction(),
        );
    }
}
