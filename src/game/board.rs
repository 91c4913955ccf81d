use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, warn};

use super::color::Rgb;
use super::object::{Fruit, GameObject, ObjectEvent, ObjectId, Tiled};
use super::snake::{Advance, Snake};
use super::tile::Tile;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// A tile left the grid
    Wall,
    /// The snake ran into itself
    SelfCollision,
}

/// What happened when an object moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The fruit with this id was eaten and has been replaced
    Ate(ObjectId),
    GameOver(GameOverReason),
}

/// The playing field. Owns every object; draw order is insertion order.
pub struct Board {
    width: usize,
    height: usize,
    objects: Vec<(ObjectId, GameObject)>,
    next_id: u64,
    rng: StdRng,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Board with a reproducible fruit placement sequence
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: usize, height: usize, rng: StdRng) -> Self {
        Self {
            width,
            height,
            objects: Vec::new(),
            next_id: 0,
            rng,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Append an object and return its id
    pub fn add(&mut self, object: impl Into<GameObject>) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object.into()));
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index).1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, object)| object)
    }

    pub fn snake(&self, id: ObjectId) -> Option<&Snake> {
        self.get(id).and_then(GameObject::as_snake)
    }

    pub fn snake_mut(&mut self, id: ObjectId) -> Option<&mut Snake> {
        self.objects
            .iter_mut()
            .find(|(other, _)| *other == id)
            .and_then(|(_, object)| object.as_snake_mut())
    }

    /// All objects in draw order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn fruits(&self) -> impl Iterator<Item = (ObjectId, &Fruit)> + '_ {
        self.objects()
            .filter_map(|(id, object)| object.as_fruit().map(|fruit| (id, fruit)))
    }

    /// Check if a tile is within the grid bounds
    pub fn in_bounds(&self, tile: &Tile) -> bool {
        tile.row >= 0
            && tile.row < self.height as i32
            && tile.column >= 0
            && tile.column < self.width as i32
    }

    /// First non-background object, other than `id`, sharing a tile with it
    pub fn detect_collision(&self, id: ObjectId) -> Option<ObjectId> {
        let object = self.get(id)?;
        let covered: HashSet<Tile> = object.tiles().collect();

        self.objects
            .iter()
            .filter(|(other, candidate)| *other != id && !candidate.is_background())
            .find(|(_, candidate)| candidate.tiles().any(|t| covered.contains(&t)))
            .map(|(other, _)| *other)
    }

    fn is_occupied(&self, tile: &Tile) -> bool {
        self.objects
            .iter()
            .any(|(_, object)| !object.is_background() && object.occupies(tile))
    }

    /// Place a fruit on a random free cell. Returns `None` when the grid is full.
    pub fn create_fruit(&mut self, color: Rgb) -> Option<ObjectId> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let occupied: HashSet<Tile> = self
            .objects
            .iter()
            .filter(|(_, object)| !object.is_background())
            .flat_map(|(_, object)| object.tiles())
            .filter(|tile| self.in_bounds(tile))
            .collect();
        if occupied.len() >= self.width * self.height {
            warn!("no free cell left for a fruit");
            return None;
        }

        loop {
            let row = self.rng.gen_range(0..self.height) as i32;
            let column = self.rng.gen_range(0..self.width) as i32;
            let fruit = Fruit::new(row, column, color);

            if !self.is_occupied(&fruit.tile()) {
                let id = self.add(fruit);
                debug!(%id, row, column, "placed fruit");
                return Some(id);
            }
        }
    }

    /// Called after `id` has moved: route collisions to it, then check bounds
    pub fn on_object_moved(&mut self, id: ObjectId) -> MoveOutcome {
        let mut outcome = MoveOutcome::Moved;

        if let Some(other) = self.detect_collision(id) {
            if let Some(ObjectEvent::Eaten(fruit)) = self.notify_collision(id, other) {
                self.on_object_eaten(fruit);
                outcome = MoveOutcome::Ate(fruit);
            }
        }

        if let Some(object) = self.get(id) {
            if object.tiles().any(|t| !self.in_bounds(&t)) {
                return MoveOutcome::GameOver(GameOverReason::Wall);
            }
        }

        outcome
    }

    /// Remove an eaten fruit and put a new one of the same color elsewhere
    pub fn on_object_eaten(&mut self, fruit: ObjectId) -> Option<ObjectId> {
        let color = self.get(fruit)?.as_fruit()?.color();
        self.remove(fruit);
        debug!(%fruit, "fruit eaten");
        self.create_fruit(color)
    }

    /// Advance the snake `id` one cell and report the move.
    /// Returns `None` if `id` is not a snake on this board.
    pub fn move_snake(&mut self, id: ObjectId) -> Option<MoveOutcome> {
        let advance = self.snake_mut(id)?.advance();

        Some(match advance {
            Advance::SelfCollision => MoveOutcome::GameOver(GameOverReason::SelfCollision),
            Advance::Moved => self.on_object_moved(id),
        })
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|(other, _)| *other == id)
    }

    fn notify_collision(&mut self, id: ObjectId, other: ObjectId) -> Option<ObjectEvent> {
        let (i, j) = (self.index_of(id)?, self.index_of(other)?);
        if i == j {
            return None;
        }

        // Borrow the mover mutably and the other object shared at once.
        let (mover, target) = if i < j {
            let (left, right) = self.objects.split_at_mut(j);
            (&mut left[i].1, &right[0].1)
        } else {
            let (left, right) = self.objects.split_at_mut(i);
            (&mut right[0].1, &left[j].1)
        };

        mover.on_collision(other, target)
    }
}
