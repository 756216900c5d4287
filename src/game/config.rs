use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::geometry::{Grid, MAX_CELLS_PER_SIDE};
use super::palette::{Rgba, neon_palette};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square play-field, in pixels
    pub field_size: u32,
    /// Side length of one cell, in pixels
    pub grid_unit: u32,
    /// Period of the simulation tick
    pub tick_ms: u64,
    /// First number shown by the restart countdown
    pub countdown_from: u32,
    /// Period of one countdown step
    pub countdown_step_ms: u64,
    /// How long the color-change flash stays on screen
    pub flash_ms: u64,
    /// Points per food eaten
    pub score_increment: u32,
    /// Colors the snake cycles through as it eats
    pub palette: Vec<Rgba>,
    /// Fixed seed for food placement
    pub seed: Option<u64>,
    /// Random re-rolls before food placement scans for a free cell
    pub max_spawn_attempts: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: 400,
            grid_unit: 20,
            tick_ms: 100,
            countdown_from: 3,
            countdown_step_ms: 1000,
            flash_ms: 50,
            score_increment: 10,
            palette: neon_palette(),
            seed: None,
            max_spawn_attempts: Some(1024),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Reject geometry and timing that the game loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_unit == 0 {
            bail!("grid_unit must be positive");
        }
        if self.field_size < self.grid_unit || self.field_size % self.grid_unit != 0 {
            bail!(
                "field_size {} must be a positive multiple of grid_unit {}",
                self.field_size,
                self.grid_unit
            );
        }
        if self.field_size / self.grid_unit > MAX_CELLS_PER_SIDE {
            bail!(
                "field_size {} / grid_unit {} gives more than {} cells per side",
                self.field_size,
                self.grid_unit,
                MAX_CELLS_PER_SIDE
            );
        }
        if self.tick_ms == 0 || self.countdown_step_ms == 0 {
            bail!("tick_ms and countdown_step_ms must be positive");
        }
        if self.palette.is_empty() {
            bail!("palette needs at least one color");
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.field_size, self.grid_unit)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            field_size: 100,
            grid_unit: 10,
            ..Default::default()
        }
    }
}
