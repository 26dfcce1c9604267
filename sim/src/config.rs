use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use diamond_heist_core::SessionConfig;
use serde::{Deserialize, Serialize};

/// Settings for the autoplay simulation, read from a TOML file. Missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: Option<u64>,
    pub games: u32,
    /// Cash out once this many diamonds were found on the current board.
    pub cash_out_after: u32,
    /// Move on to the next level when a board is cleared instead of cashing out.
    pub advance_on_clear: bool,
    /// Claim completed daily missions after every game.
    pub claim_rewards: bool,
    pub session: SessionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            games: 20,
            cash_out_after: 8,
            advance_on_clear: true,
            claim_rewards: true,
            session: SessionConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Invalid simulation config")?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn validate(self) -> Result<Self> {
        anyhow::ensure!(self.cash_out_after > 0, "cash_out_after must be at least 1");
        anyhow::ensure!(self.session.start_level > 0, "session.start_level must be at least 1");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diamond_heist_core::ScoreMode;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(SimConfig::from_toml_str("").unwrap(), SimConfig::default());
    }

    #[test]
    fn reads_nested_session_settings() {
        let config = SimConfig::from_toml_str(
            r#"
            seed = 42
            games = 3
            cash_out_after = 5

            [session]
            score_mode = "latest_reveal"
            start_level = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.games, 3);
        assert_eq!(config.cash_out_after, 5);
        assert!(config.advance_on_clear);
        assert_eq!(config.session.score_mode, ScoreMode::LatestReveal);
        assert_eq!(config.session.start_level, 5);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(SimConfig::from_toml_str("cash_out_after = 0").is_err());
        assert!(SimConfig::from_toml_str("[session]\nstart_level = 0").is_err());
        assert!(SimConfig::from_toml_str("games = \"many\"").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let path =
            std::env::temp_dir().join(format!("diamond-heist-sim-{}.toml", std::process::id()));
        fs::write(&path, "games = 7\n").unwrap();
        let config = SimConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.games, 7);
        assert!(SimConfig::load(&path).is_err());
    }
}
