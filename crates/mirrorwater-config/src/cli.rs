//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ConfigError, parse_rgba};

/// Water reflection demo command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "mirrorwater", about = "Planar water reflection demo")]
pub struct CliArgs {
    /// Water height along the up axis.
    #[arg(long)]
    pub height: Option<f32>,

    /// Water color, e.g. "rgba(45, 95, 146, 1.0)" or "#2d5f92".
    #[arg(long)]
    pub color: Option<String>,

    /// Reflection target width in texels.
    #[arg(long)]
    pub target_width: Option<u32>,

    /// Reflection target height in texels.
    #[arg(long)]
    pub target_height: Option<u32>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(h) = args.height {
            self.water.height = h;
        }
        if let Some(ref color) = args.color {
            self.water.color = parse_rgba(color)?;
        }
        if let Some(w) = args.target_width {
            self.water.target_size.0 = w;
        }
        if let Some(h) = args.target_height {
            self.water.target_size.1 = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> CliArgs {
        CliArgs {
            height: None,
            color: None,
            target_width: None,
            target_height: None,
            frames: 120,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            height: Some(3.5),
            color: Some("rgb(255, 255, 255)".to_string()),
            target_width: Some(512),
            ..no_overrides()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.water.height, 3.5);
        assert_eq!(config.water.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(config.water.target_size, (512, 1024));
        // Non-overridden fields retain defaults
        assert_eq!(config.water.frequency, 2000.0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_overrides()).unwrap();
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_bad_color_is_an_error() {
        let mut config = Config::default();
        let args = CliArgs {
            color: Some("sea green".to_string()),
            ..no_overrides()
        };
        assert!(matches!(
            config.apply_cli_overrides(&args),
            Err(ConfigError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_parse_from_argv() {
        let args = CliArgs::parse_from(["mirrorwater", "--height", "2", "--frames", "10"]);
        assert_eq!(args.height, Some(2.0));
        assert_eq!(args.frames, 10);
        assert!(args.config.is_none());
    }
}
