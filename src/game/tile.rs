use std::hash::{Hash, Hasher};
use std::ops::Add;

use super::action::Direction;
use super::color::Rgb;

/// One grid cell. Equality and hashing only look at the position.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub row: i32,
    pub column: i32,
    pub color: Rgb,
}

impl Tile {
    pub fn new(row: i32, column: i32, color: Rgb) -> Self {
        Self { row, column, color }
    }

    /// Same position, different color
    pub fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    /// Move tile in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            row: self.row + dy,
            column: self.column + dx,
            color: self.color,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.column)
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl Add<Direction> for Tile {
    type Output = Tile;

    fn add(self, direction: Direction) -> Tile {
        self.moved_in_direction(direction)
    }
}
