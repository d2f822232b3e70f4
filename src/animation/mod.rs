//! Animation module: the named-parameter sink and the sprite clip player reading it.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::AnimationPlugin;
