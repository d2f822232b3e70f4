//! Camera module: smoothed 2D follow camera.
pub mod components;
pub mod config;
pub mod follow;
pub mod plugin;
pub mod systems;

pub use plugin::CameraPlugin;
