//! Entity arena and the ownership protocol.
//!
//! The [`World`] owns every entity by [`EntityId`] together with the [`Grid`]
//! that maps locations to those handles. An entity's placement is the single
//! `Option<Location>` on its header, so "has a grid" and "has a location" can
//! never disagree. Detached entities stay in the arena so that handles held
//! elsewhere (player rosters, a bomb's owner, a block bug's trail) keep resolving.
//!
//! Removal comes in two tiers:
//! * [`World::detach`] is the public contract and runs the variant's side effect
//!   (wall ignores it, brick reveals its bonus, block bug clears its trail,
//!   player notifies the observer).
//! * [`World::force_detach`] only takes the entity off the board. It is used for
//!   evictions caused by placement and movement, and for entities whose owner
//!   cleans them up (a bomb's fire, a block bug's blocks).

use std::collections::HashMap;

use log::{debug, info, trace};

use crate::game::entities::{Bomb, Bonus, BomberBug, Entity, EntityKind, Removal};
use crate::game::error::EntityError;
use crate::game::grid::Grid;
use crate::game::observer::{GameObserver, NoopObserver};
use crate::game::random::{self, RandomSource};
use crate::game::types::{Direction, EntityId, Location};

pub struct World {
    grid: Grid,
    entities: HashMap<EntityId, Entity>,
    next_id: u64,
    rng: Box<dyn RandomSource>,
    observer: Box<dyn GameObserver>,
}

impl World {
    /// Empty world with a thread-local random source and no observer.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_ports(rows, cols, random::thread(), Box::new(NoopObserver))
    }

    pub fn with_ports(
        rows: usize,
        cols: usize,
        rng: Box<dyn RandomSource>,
        observer: Box<dyn GameObserver>,
    ) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            entities: HashMap::new(),
            next_id: 1,
            rng,
            observer,
        }
    }

    /// Drop every entity and start over on a fresh `rows x cols` board.
    ///
    /// Ports and the id counter survive, so handles from before never alias new
    /// entities.
    pub(crate) fn rebuild(&mut self, rows: usize, cols: usize) {
        self.grid = Grid::new(rows, cols);
        self.entities.clear();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn observer(&self) -> &dyn GameObserver {
        self.observer.as_ref()
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = observer;
    }

    // ---------- randomness ----------

    /// Uniform draw in `[0, 1)` from the injected source.
    pub fn random(&mut self) -> f64 {
        self.rng.next_f64()
    }

    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.index(len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        self.rng.shuffle(items);
    }

    /// The four cardinals in a random order.
    pub fn shuffled_cardinals(&mut self) -> [Direction; 4] {
        let mut directions = Direction::CARDINALS;
        self.shuffle(&mut directions);
        directions
    }

    pub fn random_empty_location(&mut self) -> Option<Location> {
        self.grid.random_empty_location(&mut *self.rng)
    }

    // ---------- arena ----------

    /// Create an unplaced entity with its variant's default colour, facing north.
    pub fn spawn(&mut self, kind: EntityKind) -> EntityId {
        self.spawn_facing(kind, Direction::North)
    }

    pub fn spawn_facing(&mut self, kind: EntityKind, direction: Direction) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let color = kind.default_color();
        self.entities
            .insert(id, Entity::new(id, color, direction, kind));
        id
    }

    /// Spawn and place in one step.
    pub fn spawn_at(&mut self, kind: EntityKind, location: Location) -> Result<EntityId, EntityError> {
        let id = self.spawn(kind);
        if let Err(err) = self.place(id, location) {
            self.entities.remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    /// Forget an entity entirely, pulling it off the board first if needed.
    pub(crate) fn discard(&mut self, id: EntityId) -> Option<Entity> {
        if self.is_placed(id) {
            // Placed entities always force-detach cleanly.
            let _ = self.force_detach(id);
        }
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub(crate) fn try_entity(&self, id: EntityId) -> Result<&Entity, EntityError> {
        self.entities.get(&id).ok_or(EntityError::UnknownEntity(id))
    }

    pub(crate) fn try_entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EntityError> {
        self.entities
            .get_mut(&id)
            .ok_or(EntityError::UnknownEntity(id))
    }

    /// The entity occupying `location`, if any.
    pub fn entity_at(&self, location: Location) -> Option<&Entity> {
        self.grid.get(location).and_then(|id| self.entities.get(&id))
    }

    pub fn is_placed(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(Entity::is_placed)
    }

    pub fn location_of(&self, id: EntityId) -> Option<Location> {
        self.entities.get(&id).and_then(Entity::location)
    }

    /// All entities known to the arena, placed or not, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    // ---------- ownership protocol ----------

    /// Put an unplaced entity on the board, evicting any occupant.
    pub fn place(&mut self, id: EntityId, location: Location) -> Result<(), EntityError> {
        if let Some(current) = self.try_entity(id)?.location() {
            return Err(EntityError::AlreadyPlaced { id, location: current });
        }
        if !self.grid.is_valid(location) {
            return Err(EntityError::OutOfBounds(location));
        }
        if let Some(occupant) = self.grid.get(location) {
            self.force_detach(occupant)?;
        }
        self.try_entity_mut(id)?.set_location(Some(location));
        self.grid.put(location, id);
        Ok(())
    }

    /// Public removal: runs the variant's removal side effect.
    pub fn detach(&mut self, id: EntityId) -> Result<(), EntityError> {
        let removal = self.try_entity(id)?.kind.removal();
        if removal == Removal::Indestructible {
            trace!("[World] detach ignored for indestructible {}", id);
            return Ok(());
        }
        let location = self.location_of(id).ok_or(EntityError::NotPlaced(id))?;

        match removal {
            Removal::Plain | Removal::Indestructible => self.force_detach(id),
            Removal::RevealBonus(kind) => {
                self.force_detach(id)?;
                let bonus = self.spawn(EntityKind::Bonus(Bonus::new(kind)));
                self.place(bonus, location)?;
                debug!("[World] brick {} revealed {:?} at {}", id, kind, location);
                Ok(())
            }
            Removal::ClearTrail(blocks) => {
                for block in blocks {
                    if self.is_placed(block) {
                        self.force_detach(block)?;
                    }
                }
                if let EntityKind::BlockBug(bug) = &mut self.try_entity_mut(id)?.kind {
                    bug.placed_blocks.clear();
                }
                self.force_detach(id)
            }
            Removal::NotifyDeath(player_index) => {
                info!("[World] player {} killed at {}", player_index + 1, location);
                self.observer.on_death(player_index, location);
                self.force_detach(id)
            }
        }
    }

    /// Low-level removal with no side effects.
    pub fn force_detach(&mut self, id: EntityId) -> Result<(), EntityError> {
        let entity = self.try_entity_mut(id)?;
        let location = entity.location().ok_or(EntityError::NotPlaced(id))?;
        entity.set_location(None);
        let removed = self.grid.remove(location);
        debug_assert_eq!(removed, Some(id), "grid and entity disagree about {location}");
        trace!("[World] {} left {}", id, location);
        Ok(())
    }

    /// Relocate a placed entity, force-evicting whatever sits at `destination`.
    pub fn move_to(&mut self, id: EntityId, destination: Location) -> Result<(), EntityError> {
        let origin = self.location_of(id).ok_or_else(|| match self.entities.get(&id) {
            Some(_) => EntityError::NotPlaced(id),
            None => EntityError::UnknownEntity(id),
        })?;
        if !self.grid.is_valid(destination) {
            return Err(EntityError::OutOfBounds(destination));
        }
        if origin == destination {
            return Ok(());
        }
        if let Some(occupant) = self.grid.get(destination) {
            self.force_detach(occupant)?;
        }
        self.grid.remove(origin);
        self.grid.put(destination, id);
        self.try_entity_mut(id)?.set_location(Some(destination));
        Ok(())
    }

    // ---------- typed access ----------

    pub fn bomb(&self, id: EntityId) -> Result<&Bomb, EntityError> {
        match &self.try_entity(id)?.kind {
            EntityKind::Bomb(bomb) => Ok(bomb),
            _ => Err(EntityError::WrongKind { id, expected: "bomb" }),
        }
    }

    pub fn bomb_mut(&mut self, id: EntityId) -> Result<&mut Bomb, EntityError> {
        match &mut self.try_entity_mut(id)?.kind {
            EntityKind::Bomb(bomb) => Ok(bomb),
            _ => Err(EntityError::WrongKind { id, expected: "bomb" }),
        }
    }

    pub fn player(&self, id: EntityId) -> Result<&BomberBug, EntityError> {
        match &self.try_entity(id)?.kind {
            EntityKind::BomberBug(player) => Ok(player),
            _ => Err(EntityError::WrongKind { id, expected: "bomber bug" }),
        }
    }

    pub fn player_mut(&mut self, id: EntityId) -> Result<&mut BomberBug, EntityError> {
        match &mut self.try_entity_mut(id)?.kind {
            EntityKind::BomberBug(player) => Ok(player),
            _ => Err(EntityError::WrongKind { id, expected: "bomber bug" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Brick, Fire, RandomBug};
    use crate::game::types::{BonusKind, FireStage};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn world() -> World {
        World::with_ports(5, 5, random::seeded(1), Box::new(NoopObserver))
    }

    fn fire(world: &mut World) -> EntityId {
        world.spawn(EntityKind::Fire(Fire::new(FireStage::Middle, None)))
    }

    /// Every entity's placement matches the grid, and no two share a cell.
    fn assert_consistent(world: &World) {
        for entity in world.entities() {
            if let Some(location) = entity.location() {
                assert_eq!(world.grid().get(location), Some(entity.id()));
            }
        }
        for location in world.grid().occupied_locations() {
            let id = world.grid().get(location).unwrap();
            assert_eq!(world.location_of(id), Some(location));
        }
    }

    #[test]
    fn place_sets_both_sides() {
        let mut world = world();
        let wall = world.spawn(EntityKind::Wall);
        assert!(!world.is_placed(wall));
        world.place(wall, Location::new(1, 1)).unwrap();
        assert_eq!(world.location_of(wall), Some(Location::new(1, 1)));
        assert_eq!(world.grid().get(Location::new(1, 1)), Some(wall));
        assert_consistent(&world);
    }

    #[test]
    fn placing_twice_is_an_error() {
        let mut world = world();
        let brick = world.spawn_at(EntityKind::Brick(Brick::new()), Location::new(0, 0)).unwrap();
        let err = world.place(brick, Location::new(0, 1)).unwrap_err();
        assert_eq!(
            err,
            EntityError::AlreadyPlaced { id: brick, location: Location::new(0, 0) }
        );
    }

    #[test]
    fn placing_out_of_bounds_is_an_error() {
        let mut world = world();
        let wall = world.spawn(EntityKind::Wall);
        assert_eq!(
            world.place(wall, Location::new(5, 0)),
            Err(EntityError::OutOfBounds(Location::new(5, 0)))
        );
        assert!(!world.is_placed(wall));
    }

    #[test]
    fn placing_evicts_even_a_wall() {
        let mut world = world();
        let here = Location::new(2, 2);
        let wall = world.spawn_at(EntityKind::Wall, here).unwrap();
        let brick = world.spawn_at(EntityKind::Brick(Brick::new()), here).unwrap();
        assert!(!world.is_placed(wall));
        assert_eq!(world.grid().get(here), Some(brick));
        assert_consistent(&world);
    }

    #[test]
    fn detaching_an_unplaced_entity_is_an_error() {
        let mut world = world();
        let bug = world.spawn(EntityKind::RandomBug(RandomBug::new(5)));
        assert_eq!(world.detach(bug), Err(EntityError::NotPlaced(bug)));
        assert_eq!(world.force_detach(bug), Err(EntityError::NotPlaced(bug)));
    }

    #[test]
    fn wall_ignores_public_detach() {
        let mut world = world();
        let wall = world.spawn_at(EntityKind::Wall, Location::new(1, 1)).unwrap();
        world.detach(wall).unwrap();
        assert_eq!(world.location_of(wall), Some(Location::new(1, 1)));
        world.force_detach(wall).unwrap();
        assert!(!world.is_placed(wall));
        // Still a no-op once off the board.
        assert_eq!(world.detach(wall), Ok(()));
    }

    #[test]
    fn brick_reveals_its_bonus() {
        let mut world = world();
        let here = Location::new(0, 2);
        let brick = world
            .spawn_at(EntityKind::Brick(Brick::with_bonus(BonusKind::AddBombs)), here)
            .unwrap();
        world.detach(brick).unwrap();
        assert!(!world.is_placed(brick));
        let revealed = world.entity_at(here).unwrap();
        assert!(matches!(
            revealed.kind,
            EntityKind::Bonus(Bonus { kind: BonusKind::AddBombs })
        ));
        assert_consistent(&world);
    }

    #[test]
    fn force_detached_brick_keeps_its_bonus_hidden() {
        let mut world = world();
        let here = Location::new(0, 2);
        let brick = world
            .spawn_at(EntityKind::Brick(Brick::with_bonus(BonusKind::SuperBomb)), here)
            .unwrap();
        world.force_detach(brick).unwrap();
        assert!(world.entity_at(here).is_none());
    }

    #[test]
    fn move_to_relocates_and_evicts() {
        let mut world = world();
        let bug = world
            .spawn_at(EntityKind::RandomBug(RandomBug::new(5)), Location::new(2, 2))
            .unwrap();
        let flame = fire(&mut world);
        world.place(flame, Location::new(2, 3)).unwrap();

        world.move_to(bug, Location::new(2, 3)).unwrap();
        assert_eq!(world.location_of(bug), Some(Location::new(2, 3)));
        assert!(!world.is_placed(flame));
        assert!(world.entity_at(Location::new(2, 2)).is_none());
        assert_consistent(&world);
    }

    #[test]
    fn move_to_does_not_reveal_bonus_of_displaced_brick() {
        let mut world = world();
        let bug = world
            .spawn_at(EntityKind::RandomBug(RandomBug::new(5)), Location::new(2, 2))
            .unwrap();
        world
            .spawn_at(
                EntityKind::Brick(Brick::with_bonus(BonusKind::ExpandRadius)),
                Location::new(3, 2),
            )
            .unwrap();
        world.move_to(bug, Location::new(3, 2)).unwrap();
        assert_eq!(world.grid().get(Location::new(3, 2)), Some(bug));
        assert_eq!(world.grid().len(), 1);
    }

    #[test]
    fn move_to_requires_placement() {
        let mut world = world();
        let bug = world.spawn(EntityKind::RandomBug(RandomBug::new(5)));
        assert_eq!(
            world.move_to(bug, Location::new(0, 0)),
            Err(EntityError::NotPlaced(bug))
        );
        assert_eq!(
            world.move_to(EntityId(999), Location::new(0, 0)),
            Err(EntityError::UnknownEntity(EntityId(999)))
        );
    }

    #[test]
    fn player_death_notifies_observer() {
        #[derive(Default)]
        struct Deaths(RefCell<Vec<(usize, Location)>>);
        impl GameObserver for Deaths {
            fn on_death(&self, player_index: usize, location: Location) {
                self.0.borrow_mut().push((player_index, location));
            }
        }

        let deaths = Rc::new(Deaths::default());
        let mut world = World::with_ports(5, 5, random::seeded(1), Box::new(deaths.clone()));
        let player = world
            .spawn_at(EntityKind::BomberBug(BomberBug::new(2)), Location::new(4, 4))
            .unwrap();
        world.detach(player).unwrap();
        assert_eq!(*deaths.0.borrow(), vec![(2, Location::new(4, 4))]);

        // Eviction is not a death.
        let other = world
            .spawn_at(EntityKind::BomberBug(BomberBug::new(1)), Location::new(0, 0))
            .unwrap();
        world.spawn_at(EntityKind::Wall, Location::new(0, 0)).unwrap();
        assert!(!world.is_placed(other));
        assert_eq!(deaths.0.borrow().len(), 1);
    }

    #[test]
    fn rebuild_keeps_ids_fresh() {
        let mut world = world();
        let first = world.spawn(EntityKind::Wall);
        world.rebuild(5, 5);
        assert!(world.entity(first).is_none());
        let second = world.spawn(EntityKind::Wall);
        assert_ne!(first, second);
    }
}
