use std::{fs, path::Path};

use cfop::TwophaseConfig;
use color_eyre::eyre::WrapErr;
use playback::PlaybackConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    pub length: usize,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        ScrambleConfig { length: 25 }
    }
}

/// Contents of the optional TOML configuration file. Every field has a
/// default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: TwophaseConfig,
    pub playback: PlaybackConfig,
    pub scramble: ScrambleConfig,
}

impl Config {
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [solver]
            binary = "/opt/rob-twophase/twophase"

            [playback]
            ms_per_quarter_turn = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.solver.binary.to_str(), Some("/opt/rob-twophase/twophase"));
        assert_eq!(config.solver.max_length, 30);
        assert_eq!(config.playback.ms_per_quarter_turn, 200);
        assert_eq!(config.playback.seek_debounce_ms, 30);
        assert_eq!(config.scramble.length, 25);
    }

    #[test_log::test]
    fn no_file_is_the_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }
}
