//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Water surface and reflection settings.
    pub water: WaterConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Fresnel term coefficients used by the water material.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FresnelParams {
    /// Reflectance added at every angle.
    pub bias: f32,
    /// Exponent applied to `1 - cos(theta)`.
    pub power: f32,
    /// Multiplier applied after the exponent.
    pub scale: f32,
}

impl Default for FresnelParams {
    fn default() -> Self {
        Self {
            bias: 0.8,
            power: 1.0,
            scale: 5.0,
        }
    }
}

/// Water surface configuration.
///
/// Fields omitted by the caller keep their defaults, so
/// `WaterConfig { height: 3.0, ..Default::default() }` and a RON file
/// containing only `(height: 3.0)` describe the same water.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterConfig {
    /// Boundary of the water footprint, in world space. The component along
    /// `up_axis` is ignored; `height` places the surface.
    pub positions: Vec<[f32; 3]>,
    /// Surface color as normalized RGBA.
    pub color: [f32; 4],
    /// Wave frequency.
    pub frequency: f32,
    /// Wave animation speed.
    pub animation_speed: f32,
    /// Wave amplitude.
    pub amplitude: f32,
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Fresnel coefficients.
    pub fresnel: FresnelParams,
    /// Water height along `up_axis`.
    pub height: f32,
    /// Ids of the host objects that take part in the reflection.
    pub reflectables: Vec<u64>,
    /// World up axis; the water plane normal. Must be unit length.
    pub up_axis: [f32; 3],
    /// Size of the off-screen reflection target in texels.
    pub target_size: (u32, u32),
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            color: [45.0 / 255.0, 95.0 / 255.0, 146.0 / 255.0, 1.0],
            frequency: 2000.0,
            animation_speed: 0.01,
            amplitude: 0.1,
            specular_intensity: 0.5,
            fresnel: FresnelParams::default(),
            height: 0.0,
            reflectables: Vec::new(),
            up_axis: [0.0, 1.0, 0.0],
            target_size: (1024, 1024),
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log the reflected camera's frustum outline every frame.
    pub show_frustum: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_frustum: false,
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for this application, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mirrorwater"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
