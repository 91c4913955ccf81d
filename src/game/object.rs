//! Everything that can sit on the board.
//!
//! Objects share one capability, [`Tiled`]: they expose the tiles they cover
//! and whether they take part in collisions. The board stores them as the
//! tagged [`GameObject`] enum under a stable [`ObjectId`].

use std::fmt;

use super::color::Rgb;
use super::snake::Snake;
use super::tile::Tile;

/// Stable identifier handed out by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something an object asks the board to do after a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    /// The fruit with this id was eaten
    Eaten(ObjectId),
}

pub trait Tiled {
    fn tiles(&self) -> Box<dyn Iterator<Item = Tile> + '_>;

    /// Background objects are skipped by collision detection
    fn is_background(&self) -> bool {
        false
    }

    fn occupies(&self, tile: &Tile) -> bool {
        self.tiles().any(|t| t == *tile)
    }
}

/// A fruit covering a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    tile: Tile,
}

impl Fruit {
    pub fn new(row: i32, column: i32, color: Rgb) -> Self {
        Self {
            tile: Tile::new(row, column, color),
        }
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn color(&self) -> Rgb {
        self.tile.color
    }
}

impl Tiled for Fruit {
    fn tiles(&self) -> Box<dyn Iterator<Item = Tile> + '_> {
        Box::new(std::iter::once(self.tile))
    }
}

/// Alternating-color background covering the whole grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerBoard {
    width: usize,
    height: usize,
    colors: (Rgb, Rgb),
}

impl CheckerBoard {
    pub fn new(width: usize, height: usize, colors: (Rgb, Rgb)) -> Self {
        Self {
            width,
            height,
            colors,
        }
    }

    pub fn color_at(&self, row: i32, column: i32) -> Rgb {
        if (row + column).rem_euclid(2) == 0 {
            self.colors.0
        } else {
            self.colors.1
        }
    }
}

impl Tiled for CheckerBoard {
    fn tiles(&self) -> Box<dyn Iterator<Item = Tile> + '_> {
        let (width, height) = (self.width as i32, self.height as i32);
        Box::new((0..height).flat_map(move |row| {
            (0..width).map(move |column| Tile::new(row, column, self.color_at(row, column)))
        }))
    }

    fn is_background(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameObject {
    Snake(Snake),
    Fruit(Fruit),
    CheckerBoard(CheckerBoard),
}

impl GameObject {
    pub fn as_snake(&self) -> Option<&Snake> {
        match self {
            GameObject::Snake(snake) => Some(snake),
            _ => None,
        }
    }

    pub fn as_snake_mut(&mut self) -> Option<&mut Snake> {
        match self {
            GameObject::Snake(snake) => Some(snake),
            _ => None,
        }
    }

    pub fn as_fruit(&self) -> Option<&Fruit> {
        match self {
            GameObject::Fruit(fruit) => Some(fruit),
            _ => None,
        }
    }

    /// Forward a collision reported by the board to this object
    pub fn on_collision(&mut self, other_id: ObjectId, other: &GameObject) -> Option<ObjectEvent> {
        match self {
            GameObject::Snake(snake) => snake.on_collision(other_id, other),
            GameObject::Fruit(_) | GameObject::CheckerBoard(_) => None,
        }
    }

    fn inner(&self) -> &dyn Tiled {
        match self {
            GameObject::Snake(snake) => snake,
            GameObject::Fruit(fruit) => fruit,
            GameObject::CheckerBoard(board) => board,
        }
    }
}

impl Tiled for GameObject {
    fn tiles(&self) -> Box<dyn Iterator<Item = Tile> + '_> {
        self.inner().tiles()
    }

    fn is_background(&self) -> bool {
        self.inner().is_background()
    }
}

impl From<Snake> for GameObject {
    fn from(snake: Snake) -> Self {
        GameObject::Snake(snake)
    }
}

impl From<Fruit> for GameObject {
    fn from(fruit: Fruit) -> Self {
        GameObject::Fruit(fruit)
    }
}

impl From<CheckerBoard> for GameObject {
    fn from(board: CheckerBoard) -> Self {
        GameObject::CheckerBoard(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit_is_single_tile() {
        let fruit = Fruit::new(3, 4, Rgb::RED);
        let tiles: Vec<Tile> = fruit.tiles().collect();
        assert_eq!(tiles, vec![Tile::new(3, 4, Rgb::BLACK)]);
        assert_eq!(fruit.color(), Rgb::RED);
        assert!(!fruit.is_background());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let board = CheckerBoard::new(3, 2, (Rgb::BLACK, Rgb::WHITE));
        let colors: Vec<((i32, i32), Rgb)> =
            board.tiles().map(|t| (t.position(), t.color)).collect();

        assert_eq!(
            colors,
            vec![
                ((0, 0), Rgb::BLACK),
                ((0, 1), Rgb::WHITE),
                ((0, 2), Rgb::BLACK),
                ((1, 0), Rgb::WHITE),
                ((1, 1), Rgb::BLACK),
                ((1, 2), Rgb::WHITE),
            ]
        );
        assert!(board.is_background());
    }

    #[test]
    fn test_game_object_delegates() {
        let object = GameObject::from(Fruit::new(1, 1, Rgb::RED));
        assert!(object.occupies(&Tile::new(1, 1, Rgb::WHITE)));
        assert!(!object.is_background());
        assert!(object.as_fruit().is_some());
        assert!(object.as_snake().is_none());

        let background = GameObject::from(CheckerBoard::new(2, 2, (Rgb::BLACK, Rgb::WHITE)));
        assert!(background.is_background());
        assert_eq!(background.tiles().count(), 4);
    }

    #[test]
    fn test_fruit_ignores_collisions() {
        let mut object = GameObject::from(Fruit::new(1, 1, Rgb::RED));
        let other = GameObject::from(Fruit::new(1, 1, Rgb::RED));
        assert_eq!(object.on_collision(ObjectId::new(0), &other), None);
    }
}
