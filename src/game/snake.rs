use std::collections::VecDeque;

use super::action::Direction;
use super::color::Rgb;
use super::object::{GameObject, ObjectEvent, ObjectId, Tiled};
use super::tile::Tile;

/// Result of advancing the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// The new head landed on the body as it was before the move
    SelfCollision,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    tiles: VecDeque<Tile>,
    direction: Direction,
    /// Length the body grows toward; never below the segment count after a move
    pending_length: usize,
    head_color: Rgb,
    body_color: Rgb,
}

impl Snake {
    /// Create a snake from (row, column) positions, head first
    pub fn new(
        positions: &[(i32, i32)],
        direction: Direction,
        head_color: Rgb,
        body_color: Rgb,
    ) -> Self {
        let tiles: VecDeque<Tile> = positions
            .iter()
            .enumerate()
            .map(|(i, &(row, column))| {
                let color = if i == 0 { head_color } else { body_color };
                Tile::new(row, column, color)
            })
            .collect();

        Self {
            pending_length: tiles.len(),
            tiles,
            direction,
            head_color,
            body_color,
        }
    }

    /// Create a straight snake of `length` segments trailing behind `head`
    pub fn straight(
        head: (i32, i32),
        direction: Direction,
        length: usize,
        head_color: Rgb,
        body_color: Rgb,
    ) -> Self {
        let mut positions = Vec::with_capacity(length);
        let mut tile = Tile::new(head.0, head.1, head_color);
        for _ in 0..length {
            positions.push(tile.position());
            tile = tile + direction.opposite();
        }

        Self::new(&positions, direction, head_color, body_color)
    }

    /// Get the head tile
    pub fn head(&self) -> Option<Tile> {
        self.tiles.front().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change direction unconditionally, reversals included
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Change direction unless it points straight back into the neck.
    /// Returns whether the direction was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn pending_length(&self) -> usize {
        self.pending_length
    }

    /// Get the number of segments
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if a tile's position is covered by any segment
    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.contains(tile)
    }

    /// Move one cell in the current direction.
    ///
    /// The self-collision check runs against the body before the move, so
    /// stepping onto the cell the tail is about to leave still counts.
    pub fn advance(&mut self) -> Advance {
        let Some(head) = self.head() else {
            return Advance::Moved;
        };

        let new_head = (head + self.direction).with_color(self.head_color);
        if self.contains(&new_head) {
            return Advance::SelfCollision;
        }

        if let Some(old_head) = self.tiles.front_mut() {
            old_head.color = self.body_color;
        }
        self.tiles.push_front(new_head);

        if self.tiles.len() > self.pending_length {
            self.tiles.pop_back();
        }

        Advance::Moved
    }

    /// React to the board reporting a collision with `other`
    pub fn on_collision(&mut self, other_id: ObjectId, other: &GameObject) -> Option<ObjectEvent> {
        match other {
            GameObject::Fruit(_) => {
                self.pending_length += 1;
                Some(ObjectEvent::Eaten(other_id))
            }
            _ => None,
        }
    }
}

impl Tiled for Snake {
    fn tiles(&self) -> Box<dyn Iterator<Item = Tile> + '_> {
        Box::new(self.tiles.iter().copied())
    }
}
