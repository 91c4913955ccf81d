//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board owns every object; moving the snake returns an explicit
//! [`MoveOutcome`] instead of calling back into the caller.

pub mod action;
pub mod board;
pub mod color;
pub mod config;
pub mod engine;
pub mod object;
pub mod snake;
pub mod tile;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use board::{Board, GameOverReason, MoveOutcome};
pub use color::Rgb;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepResult};
pub use object::{CheckerBoard, Fruit, GameObject, ObjectEvent, ObjectId, Tiled};
pub use snake::{Advance, Snake};
pub use tile::Tile;
