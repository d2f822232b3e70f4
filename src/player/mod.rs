//! Player module: movement controller, input bindings and the systems driving them.

pub mod components;
pub mod config;
pub mod controller;
pub mod input;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
