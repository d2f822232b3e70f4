//! World module housing physics layers, gravity and the static level.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
