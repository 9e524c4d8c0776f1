//! Configuration for the water reflection system.
//!
//! Every setting has a documented default and omitted fields fall back to it,
//! so a partial `config.ron` (or a partial struct literal) is a shallow merge
//! over the defaults. Supports CLI overrides via clap and hot-reload detection.

mod cli;
mod color;
mod config;
mod error;

pub use cli::CliArgs;
pub use color::parse_rgba;
pub use config::{Config, DebugConfig, FresnelParams, WaterConfig, default_config_dir};
pub use error::ConfigError;
