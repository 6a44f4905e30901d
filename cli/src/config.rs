use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use memefield_core::{CellCount, Coord, GameConfig, mult};
use serde::Deserialize;

/// Board settings from a config file or the command line, any of them may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid board settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config {}", path.display()))
    }

    /// Fills whatever is missing here from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            mines: self.mines.or(fallback.mines),
            seed: self.seed.or(fallback.seed),
        }
    }

    /// Missing dimensions come from the default board, a missing mine count keeps its density.
    pub fn game_config(&self) -> Result<GameConfig> {
        let default = GameConfig::default();
        let width = self.width.unwrap_or(default.width);
        let height = self.height.unwrap_or(default.height);
        let mines = self.mines.unwrap_or_else(|| {
            let scaled = u32::from(mult(width, height)) * u32::from(default.mines)
                / u32::from(default.total_cells());
            scaled as CellCount
        });

        GameConfig::new(width, height, mines).with_context(|| {
            format!("cannot play {width}x{height} with {mines} mines")
        })
    }
}
