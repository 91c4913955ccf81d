use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::Rgb;

/// Slowest accepted tick rate
pub const MIN_FPS: u32 = 1;
/// Fastest accepted tick rate
pub const MAX_FPS: u32 = 25;
/// Largest accepted width or height, so grid coordinates fit in i32 and
/// two terminal columns per tile plus a border fit in u16
pub const MAX_GRID_SIDE: usize = u16::MAX as usize / 2 - 1;

/// Invalid startup configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("fps must be in [{min}, {max}], got {value}")]
    FpsOutOfRange { value: u32, min: u32, max: u32 },

    #[error("a {width}x{height} grid cannot hold a snake of length {snake_length}")]
    GridTooSmall {
        width: usize,
        height: usize,
        snake_length: usize,
    },

    #[error("a {width}x{height} grid is too large, each side must be at most {max}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("no room for {fruits} fruit(s) on a {width}x{height} grid")]
    TooManyFruits {
        fruits: usize,
        width: usize,
        height: usize,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns
    pub grid_width: usize,
    /// Number of rows
    pub grid_height: usize,
    /// Ticks per second
    pub fps: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Fruits present on the board at once
    pub fruit_count: usize,

    pub fruit_color: Rgb,
    pub snake_head_color: Rgb,
    pub snake_body_color: Rgb,
    /// Checkerboard colors, the first one on cells where row + column is even
    pub checker_colors: (Rgb, Rgb),

    /// Ignore 180-degree turns instead of running into the neck
    pub forbid_reversal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            fps: 5,
            initial_snake_length: 3,
            fruit_count: 1,
            fruit_color: Rgb::RED,
            snake_head_color: Rgb::BLUE,
            snake_body_color: Rgb::GREEN,
            checker_colors: (Rgb::BLACK, Rgb::WHITE),
            forbid_reversal: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::FpsOutOfRange {
                value: self.fps,
                min: MIN_FPS,
                max: MAX_FPS,
            });
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }

        // The snake starts in the middle row with its head on the middle
        // column and the body trailing to the left.
        if self.grid_height == 0
            || self.initial_snake_length == 0
            || self.grid_width / 2 + 1 < self.initial_snake_length
        {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                snake_length: self.initial_snake_length,
            });
        }

        let free_cells = self
            .grid_width
            .checked_mul(self.grid_height)
            .and_then(|cells| cells.checked_sub(self.initial_snake_length))
            .unwrap_or(0);
        if self.fruit_count == 0 || self.fruit_count > free_cells {
            return Err(ConfigError::TooManyFruits {
                fruits: self.fruit_count,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }
}
