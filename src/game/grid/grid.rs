use std::collections::BTreeMap;

use crate::game::random::RandomSource;
use crate::game::types::{Direction, EntityId, Location};

/// Sparse spatial index of a bounded `rows x cols` board.
///
/// Holds at most one entity handle per location. This is the low-level map only:
/// `put` overwrites silently, and the ownership rules (eviction, back references)
/// live in [`World`](crate::game::world::World).
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: BTreeMap<Location, EntityId>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return `true` if `location` lies inside the board.
    pub fn is_valid(&self, location: Location) -> bool {
        location.row >= 0
            && location.col >= 0
            && (location.row as usize) < self.rows
            && (location.col as usize) < self.cols
    }

    pub fn get(&self, location: Location) -> Option<EntityId> {
        self.cells.get(&location).copied()
    }

    /// Store `id` at `location`, returning whatever was there before.
    pub fn put(&mut self, location: Location, id: EntityId) -> Option<EntityId> {
        self.cells.insert(location, id)
    }

    pub fn remove(&mut self, location: Location) -> Option<EntityId> {
        self.cells.remove(&location)
    }

    /// Occupied locations in row-major order.
    pub fn occupied_locations(&self) -> Vec<Location> {
        self.cells.keys().copied().collect()
    }

    /// Empty locations in row-major order.
    pub fn empty_locations(&self) -> Vec<Location> {
        let mut empty = Vec::new();
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let location = Location::new(row, col);
                if !self.cells.contains_key(&location) {
                    empty.push(location);
                }
            }
        }
        empty
    }

    /// Uniformly random empty location, or `None` if the board is full.
    pub fn random_empty_location(&self, rng: &mut dyn RandomSource) -> Option<Location> {
        let empty = self.empty_locations();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.index(empty.len())])
    }

    /// Occupants of the up-to-four cardinally adjacent in-bounds cells (N, E, S, W).
    pub fn neighbors(&self, location: Location) -> Vec<EntityId> {
        Direction::CARDINALS
            .iter()
            .map(|dir| location.adjacent(*dir))
            .filter(|adjacent| self.is_valid(*adjacent))
            .filter_map(|adjacent| self.get(adjacent))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
