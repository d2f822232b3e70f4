//! Core module: frame ordering, fixed-step timing and shared error types.
pub mod errors;
pub mod plugin;

pub use errors::{check_finite, check_non_negative, check_positive, ConfigError};
pub use plugin::{CorePlugin, FrameSet};
