//! Checker Snake - the classic Snake game in a terminal
//!
//! This library provides:
//! - Core game logic: tiles, snake, fruits, checkerboard and the board that
//!   detects collisions (game module)
//! - High-score table persistence (scores module)
//! - TUI rendering and keyboard input (render and input modules)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod scores;
