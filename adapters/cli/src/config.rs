use std::{fs, path::Path};

use anyhow::{Context, Result};
use cops_and_robber_core::{AiMode, GameConfig};
use serde::{Deserialize, Serialize};

/// On-disk configuration document.
///
/// Every key is optional; missing keys fall back to [`GameConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    /// Rules and starting position of the game.
    pub(crate) game: GameConfig,
}

impl ConfigFile {
    /// Parses a configuration document from TOML text.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("configuration is not valid TOML")
    }

    /// Reads and parses the configuration document stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) smart: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) max_rounds: Option<u32>,
}

impl Overrides {
    fn apply(self, config: &mut GameConfig) {
        if self.smart {
            config.ai_mode = AiMode::Smart;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = max_rounds;
        }
    }
}

/// Resolves the game configuration from an optional file and overrides, then
/// validates it.
pub(crate) fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => ConfigFile::load(path)?.game,
        None => GameConfig::default(),
    };
    overrides.apply(&mut config);
    config
        .validate()
        .context("configuration describes an unplayable game")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use cops_and_robber_core::CellIndex;

    use super::*;

    #[test]
    fn parses_a_partial_document() {
        let file = ConfigFile::parse(
            r#"
            [game]
            rows = 5
            columns = 6
            initial_cops = [0, 5]
            initial_robber = 17
            ai_mode = "smart"
            "#,
        )
        .expect("document parses");

        assert_eq!(file.game.rows, 5);
        assert_eq!(file.game.columns, 6);
        assert_eq!(file.game.initial_cops, [CellIndex::new(0), CellIndex::new(5)]);
        assert_eq!(file.game.initial_robber, CellIndex::new(17));
        assert_eq!(file.game.ai_mode, AiMode::Smart);
        assert_eq!(file.game.max_rounds, GameConfig::default().max_rounds);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let file = ConfigFile::parse("").expect("empty document parses");

        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(ConfigFile::parse("[game]\nrows = \"five\"").is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let config = resolve(
            None,
            Overrides {
                smart: true,
                seed: Some(42),
                max_rounds: Some(3),
            },
        )
        .expect("defaults are playable");

        assert_eq!(config.ai_mode, AiMode::Smart);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_rounds, 3);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = resolve(Some(Path::new("/nonexistent/cops.toml")), Overrides::default())
            .expect_err("file does not exist");

        assert!(format!("{error:#}").contains("/nonexistent/cops.toml"));
    }
}
