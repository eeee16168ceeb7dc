// Configuration management
//
// Persists frontend settings (render mode, window scale, frame rate,
// atlas location) to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file path
pub const CONFIG_FILE: &str = "doomoji.toml";

/// Default atlas image path
pub const DEFAULT_ATLAS_PATH: &str = "assets/emoji_atlas.png";

/// How frames are produced from the engine's pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Downsample into blocks and composite matched tiles
    Emoji,
    /// One output pixel per source pixel, no tiles
    Direct,
}

/// Frontend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Video settings
    pub video: VideoConfig,

    /// Atlas settings
    pub atlas: AtlasConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Render mode
    pub mode: RenderMode,

    /// Window scale relative to the engine resolution (1-4)
    pub window_scale: u32,

    /// Target frame rate for the demo loop
    pub fps: u32,
}

/// Atlas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Path to the tile atlas PNG
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video: VideoConfig {
                mode: RenderMode::Emoji,
                window_scale: 2,
                fps: 35,
            },
            atlas: AtlasConfig {
                path: PathBuf::from(DEFAULT_ATLAS_PATH),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults
    ///
    /// Missing or malformed files yield the default configuration; a
    /// malformed file is reported but never fatal.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!(
                        "Invalid config '{}', using defaults: {}",
                        path.as_ref().display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }

    /// Frame duration for the configured frame rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.video.fps.max(1) as u64)
    }
}
