/// Configuration management
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment variables that override file settings,
/// e.g. `JEDI_PLAYER__TICK_INTERVAL_MS=250`
pub const ENV_PREFIX: &str = "JEDI";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub player: PlayerConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Theme name (light, dark)
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            theme: "light".to_string(),
        }
    }
}

/// Playback simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Milliseconds between progress ticks
    pub tick_interval_ms: u64,
    /// Percentage added to progress on every tick
    pub progress_step: f64,
    /// Progress of the first track when the player opens
    pub initial_progress: f64,
    pub initial_volume: u8,
    /// Volume restored when unmuting from zero
    pub unmute_volume: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            progress_step: 0.1,
            initial_progress: 30.0,
            initial_volume: 70,
            unmute_volume: 70,
        }
    }
}

impl PlayerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Config {
    /// Load and validate configuration, see [`Config::read`]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Ok(Self::read(path)?.validate())
    }

    /// Read configuration from `path` (or the default location) layered with
    /// `JEDI_*` environment variables, without validating it. A missing file
    /// yields the defaults; nothing is ever written back.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        tracing::debug!("Loading configuration from {}", path.display());

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Get configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| PlayerError::msg("Unable to determine config directory"))?
            .join("jedi-player");
        Ok(dir)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn validate(mut self) -> Self {
        let defaults = PlayerConfig::default();
        let player = &mut self.player;

        if player.tick_interval_ms == 0 {
            tracing::warn!("tick_interval_ms must be positive, using {}", defaults.tick_interval_ms);
            player.tick_interval_ms = defaults.tick_interval_ms;
        }
        if !player.progress_step.is_finite()
            || player.progress_step <= 0.0
            || player.progress_step > 100.0
        {
            tracing::warn!(
                "progress_step {} out of range, using {}",
                player.progress_step,
                defaults.progress_step
            );
            player.progress_step = defaults.progress_step;
        }
        if player.initial_progress.is_nan() {
            player.initial_progress = defaults.initial_progress;
        }
        player.initial_progress = player.initial_progress.clamp(0.0, 100.0);
        player.initial_volume = player.initial_volume.min(100);
        player.unmute_volume = match player.unmute_volume {
            0 => defaults.unmute_volume,
            v => v.min(100),
        };

        self
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlayerError::msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.player.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.player.progress_step, 0.1);
        assert_eq!(config.player.initial_volume, 70);
    }

    #[test]
    #[serial]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[player]\ntick_interval_ms = 250\n\n[general]\ntheme = \"dark\"").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.player.tick_interval_ms, 250);
        assert_eq!(config.player.initial_volume, 70);
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[player]\ninitial_volume = 20\n").unwrap();

        std::env::set_var("JEDI_PLAYER__INITIAL_VOLUME", "55");
        let result = Config::load(Some(&path));
        std::env::remove_var("JEDI_PLAYER__INITIAL_VOLUME");

        assert_eq!(result.unwrap().player.initial_volume, 55);
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[player\ntick_interval_ms = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, PlayerError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_read_skips_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[player]\ntick_interval_ms = 0\n").unwrap();

        assert_eq!(Config::read(Some(&path)).unwrap().player.tick_interval_ms, 0);
        assert_eq!(Config::load(Some(&path)).unwrap().player.tick_interval_ms, 1000);
    }

    #[test]
    fn test_validate_repairs_values() {
        let mut config = Config::default();
        config.player.tick_interval_ms = 0;
        config.player.progress_step = -1.0;
        config.player.initial_progress = 140.0;
        config.player.initial_volume = 200;
        config.player.unmute_volume = 0;

        let config = config.validate();
        assert_eq!(config.player.tick_interval_ms, 1000);
        assert_eq!(config.player.progress_step, 0.1);
        assert_eq!(config.player.initial_progress, 100.0);
        assert_eq!(config.player.initial_volume, 100);
        assert_eq!(config.player.unmute_volume, 70);
    }

    #[test]
    fn test_toml_output_round_trips() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("[player]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
