use std::{fs, path::Path};

use bracket_geometry::prelude::Point;
use serde::Deserialize;
use thiserror::Error;

// The smallest grid with a header row, a border ring, and room left over
// for the player plus at least one feature.
pub const MIN_GRID_WIDTH: i32 = 8;
pub const MIN_GRID_HEIGHT: i32 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    pub grid_width: i32,
    pub grid_height: i32,
    pub number_of_trees: u32,
    pub number_of_orcs: u32,
    // Settings files from earlier builds call this numberOfMountains.
    #[serde(alias = "numberOfMountains")]
    pub mountain_blobs: u32,
    pub mountain_max_size: u32,
    pub river_width: i32,
    pub orc_score: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 24,
            number_of_trees: 150,
            number_of_orcs: 20,
            mountain_blobs: 3,
            mountain_max_size: 12,
            river_width: 3,
            orc_score: 10,
        }
    }
}

impl GameSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_WIDTH || self.grid_height < MIN_GRID_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least {MIN_GRID_WIDTH}x{MIN_GRID_HEIGHT}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.river_width < 1 {
            return Err(ConfigError::Invalid(format!(
                "river width must be at least 1, got {}",
                self.river_width
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        Point::new(self.grid_width / 2, self.grid_height / 2)
    }
}
