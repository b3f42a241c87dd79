mod loader;

pub use loader::{Config, ReportConfig, ResolveConfig};

/// Structural conventions of an RPG Maker MZ project tree.
///
/// These are fixed by the engine, not by user configuration: the data
/// directory holds the JSON databases, the js directory holds the bootstrap
/// script and the plugin manifest, and so on.
pub mod layout {
    /// Directory containing the JSON database files.
    pub const DATA_DIR: &str = "data";
    /// Directory containing the engine scripts.
    pub const JS_DIR: &str = "js";
    /// Subdirectory (under js) containing plugin scripts.
    pub const PLUGINS_DIR: &str = "js/plugins";
    /// Bootstrap script, always shipped.
    pub const BOOTSTRAP_SCRIPT: &str = "main.js";
    /// Plugin manifest script, always shipped.
    pub const PLUGIN_MANIFEST: &str = "plugins.js";
    /// Directory holding Effekseer effect containers.
    pub const EFFECTS_DIR: &str = "effects";
    /// Directory holding tileset images.
    pub const TILESETS_DIR: &str = "img/tilesets";
    /// Directory holding sound-effect audio files.
    pub const AUDIO_SE_DIR: &str = "audio/se";
    /// Animation database, used purely as a lookup table.
    pub const ANIMATIONS_DB: &str = "Animations.json";
    /// Tileset database, used purely as a lookup table.
    pub const TILESETS_DB: &str = "Tilesets.json";
    /// Effekseer container extension.
    pub const CONTAINER_EXT: &str = "efkefc";
    /// Image extension carved out of containers.
    pub const IMAGE_EXT: &str = "png";
    /// Locale package extension.
    pub const LOCALE_PACK_EXT: &str = "pak";
    /// Sidecar suffix appended to a locale package path.
    pub const LOCALE_INFO_SUFFIX: &str = ".info";
}
