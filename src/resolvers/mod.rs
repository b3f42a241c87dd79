//! Domain resolvers
//!
//! Each resolver knows one indirect reference convention of an MZ project:
//! the plugin manifest, the animation database joins, and the map-to-tileset
//! joins. Resolvers never mutate the universe sets; they return lists of
//! marks that the orchestrator applies, which keeps each resolver testable in
//! isolation.

mod animations;
mod plugins;
mod tilesets;

pub use animations::{AnimationResolver, SoundTiming};
pub use plugins::{PluginResolution, PluginResolver};
pub use tilesets::TilesetResolver;

/// Symbolic source for files seeded from the project root
pub const ROOT_SOURCE: &str = "root";
/// Symbolic source for files seeded by classification
pub const SEED_SOURCE: &str = ".";
/// Symbolic source for files justified by the animation database
pub const ANIMATION_SOURCE: &str = "animations";

/// A resolver's verdict that `source` justifies keeping `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub target: String,
    pub source: String,
}

impl Mark {
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }
}
