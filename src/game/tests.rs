//! Entity scenarios: blasts, chains, bugs and players on hand-built boards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::game::entities::{bomb, bug, BlockBug, Bomb, BomberBug, Bonus, Brick, EntityKind, RandomBug};
use crate::game::observer::{GameObserver, NoopObserver};
use crate::game::random::{self, SequenceSource};
use crate::game::systems::run_actors;
use crate::game::types::{BonusKind, EntityId, FireStage, Location};
use crate::game::world::World;

#[derive(Default)]
struct Recorder {
    explosions: Cell<usize>,
    deaths: RefCell<Vec<(usize, Location)>>,
}

impl GameObserver for Recorder {
    fn on_explosion(&self) {
        self.explosions.set(self.explosions.get() + 1);
    }

    fn on_death(&self, player_index: usize, location: Location) {
        self.deaths.borrow_mut().push((player_index, location));
    }
}

fn world(size: usize) -> World {
    World::with_ports(size, size, random::seeded(17), Box::new(NoopObserver))
}

fn recorded_world(size: usize) -> (World, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    let world = World::with_ports(size, size, random::seeded(17), Box::new(recorder.clone()));
    (world, recorder)
}

fn bomb_at(world: &mut World, location: Location, timer: u32, radius: u32) -> EntityId {
    world
        .spawn_at(EntityKind::Bomb(Bomb::new(timer, radius)), location)
        .unwrap()
}

/// Every fire on the board with its stage, row-major.
fn fire(world: &World) -> Vec<(Location, FireStage)> {
    world
        .grid()
        .occupied_locations()
        .into_iter()
        .filter_map(|location| match &world.entity_at(location)?.kind {
            EntityKind::Fire(fire) => Some((location, fire.stage)),
            _ => None,
        })
        .collect()
}

fn loc(row: i32, col: i32) -> Location {
    Location::new(row, col)
}

#[test]
fn blast_on_an_empty_board_is_a_plus() {
    let mut world = world(7);
    let id = bomb_at(&mut world, loc(3, 3), 10, 2);
    bomb::detonate(&mut world, id).unwrap();

    use FireStage::{Leading, Middle};
    assert_eq!(
        fire(&world),
        vec![
            (loc(1, 3), Leading),
            (loc(2, 3), Middle),
            (loc(3, 1), Leading),
            (loc(3, 2), Middle),
            (loc(3, 4), Middle),
            (loc(3, 5), Leading),
            (loc(4, 3), Middle),
            (loc(5, 3), Leading),
        ]
    );
    let state = world.bomb(id).unwrap();
    assert!(state.exploding);
    assert_eq!(state.fire.len(), 8);
    assert_eq!(world.location_of(id), Some(loc(3, 3)));
}

#[test]
fn wall_stops_the_ray() {
    let mut world = world(7);
    let wall = world.spawn_at(EntityKind::Wall, loc(1, 3)).unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 10, 3);
    bomb::detonate(&mut world, id).unwrap();

    let north: Vec<_> = fire(&world).into_iter().filter(|(l, _)| l.col == 3 && l.row < 3).collect();
    assert_eq!(north, vec![(loc(2, 3), FireStage::Leading)]);
    assert_eq!(world.location_of(wall), Some(loc(1, 3)));
}

#[test]
fn brick_with_bonus_stops_a_normal_blast() {
    let mut world = world(7);
    let brick = world
        .spawn_at(EntityKind::Brick(Brick::with_bonus(BonusKind::AddBombs)), loc(2, 3))
        .unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 10, 3);
    bomb::detonate(&mut world, id).unwrap();

    assert!(!world.is_placed(brick));
    assert!(matches!(
        world.entity_at(loc(2, 3)).map(|e| &e.kind),
        Some(EntityKind::Bonus(b)) if b.kind == BonusKind::AddBombs
    ));
    assert!(world.entity_at(loc(1, 3)).is_none());
    assert!(world.entity_at(loc(0, 3)).is_none());
}

#[test]
fn super_bomb_burns_through_bricks() {
    let mut world = world(7);
    world.spawn_at(EntityKind::Brick(Brick::new()), loc(2, 3)).unwrap();
    let id = world
        .spawn_at(EntityKind::Bomb(Bomb::new(10, 2).with_super(true)), loc(3, 3))
        .unwrap();
    bomb::detonate(&mut world, id).unwrap();

    let north: Vec<_> = fire(&world).into_iter().filter(|(l, _)| l.col == 3 && l.row < 3).collect();
    assert_eq!(
        north,
        vec![(loc(1, 3), FireStage::Leading), (loc(2, 3), FireStage::Middle)]
    );
}

#[test]
fn normal_bomb_burns_a_plain_brick_and_stops() {
    let mut world = world(7);
    world.spawn_at(EntityKind::Brick(Brick::new()), loc(3, 4)).unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 10, 3);
    bomb::detonate(&mut world, id).unwrap();

    let east: Vec<_> = fire(&world).into_iter().filter(|(l, _)| l.row == 3 && l.col > 3).collect();
    assert_eq!(east, vec![(loc(3, 4), FireStage::Leading)]);
}

#[test]
fn detonating_twice_changes_nothing() {
    let (mut world, recorder) = recorded_world(7);
    let id = bomb_at(&mut world, loc(3, 3), 10, 2);
    bomb::detonate(&mut world, id).unwrap();
    let first = fire(&world);
    bomb::detonate(&mut world, id).unwrap();
    assert_eq!(fire(&world), first);
    assert_eq!(world.bomb(id).unwrap().fire.len(), 8);
    assert_eq!(recorder.explosions.get(), 1);
}

#[test]
fn bomb_counts_down_then_cleans_up() {
    let mut world = world(7);
    let id = bomb_at(&mut world, loc(3, 3), 2, 1);

    run_actors(&mut world).unwrap();
    assert_eq!(world.bomb(id).unwrap().timer, 1);
    assert!(fire(&world).is_empty());

    run_actors(&mut world).unwrap();
    assert!(world.bomb(id).unwrap().exploding);
    assert_eq!(fire(&world).len(), 4);
    let fire_ids: Vec<EntityId> = world.bomb(id).unwrap().fire.iter().map(|c| c.fire).collect();

    run_actors(&mut world).unwrap();
    assert!(!world.is_placed(id));
    assert!(world.grid().is_empty());
    assert!(fire_ids.iter().all(|fire| world.entity(*fire).is_none()));
}

#[test]
fn chained_bomb_explodes_in_the_same_tick() {
    for (a_at, b_at) in [(loc(3, 1), loc(3, 3)), (loc(3, 3), loc(3, 1))] {
        let (mut world, recorder) = recorded_world(7);
        let a = bomb_at(&mut world, a_at, 1, 2);
        let b = bomb_at(&mut world, b_at, 10, 2);

        run_actors(&mut world).unwrap();
        let chained = world.bomb(b).unwrap();
        assert!(chained.exploding);
        assert!(!chained.fire.is_empty());
        assert!(world.is_placed(b));
        assert_eq!(recorder.explosions.get(), 2);

        run_actors(&mut world).unwrap();
        assert!(!world.is_placed(a));
        assert!(!world.is_placed(b));
        assert!(world.grid().is_empty());
    }
}

#[test]
fn blast_kills_a_player_and_tells_the_observer() {
    let (mut world, recorder) = recorded_world(7);
    let player = world
        .spawn_at(EntityKind::BomberBug(BomberBug::new(3)), loc(3, 5))
        .unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 10, 2);
    bomb::detonate(&mut world, id).unwrap();

    assert!(!world.is_placed(player));
    assert_eq!(*recorder.deaths.borrow(), vec![(3, loc(3, 5))]);
    assert!(world.entity_at(loc(3, 5)).is_some_and(|e| e.kind.is_fire()));
}

#[test]
fn blast_destroys_a_bonus_on_the_floor() {
    let mut world = world(7);
    world
        .spawn_at(
            EntityKind::Bonus(Bonus::new(BonusKind::SuperBomb)),
            loc(4, 3),
        )
        .unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 10, 2);
    bomb::detonate(&mut world, id).unwrap();
    assert!(world.entity_at(loc(4, 3)).is_some_and(|e| e.kind.is_fire()));
    assert!(world.entity_at(loc(5, 3)).is_some_and(|e| e.kind.is_fire()));
}

#[test]
fn blast_clears_a_block_bugs_trail() {
    let mut world = world(7);
    let bug_id = world
        .spawn_at(EntityKind::BlockBug(BlockBug::new(50)), loc(1, 3))
        .unwrap();
    let far_block = world.spawn_at(EntityKind::Wall, loc(6, 6)).unwrap();
    if let EntityKind::BlockBug(state) = &mut world.entity_mut(bug_id).unwrap().kind {
        state.placed_blocks.push(far_block);
    }
    let id = bomb_at(&mut world, loc(3, 3), 10, 2);
    bomb::detonate(&mut world, id).unwrap();

    assert!(!world.is_placed(bug_id));
    // Walls survive blasts but not their bug's death.
    assert!(!world.is_placed(far_block));
}

#[test]
fn fire_overwritten_by_another_blast_is_still_cleaned_up() {
    let mut world = world(7);
    let a = bomb_at(&mut world, loc(3, 1), 10, 2);
    bomb::detonate(&mut world, a).unwrap();
    let b = bomb_at(&mut world, loc(1, 3), 10, 2);
    bomb::detonate(&mut world, b).unwrap();

    bomb::act(&mut world, a).unwrap();
    bomb::act(&mut world, b).unwrap();
    assert!(world.grid().is_empty());
}

#[test]
fn revealed_bonus_outlives_the_cleanup() {
    let mut world = world(7);
    world
        .spawn_at(EntityKind::Brick(Brick::with_bonus(BonusKind::ExpandRadius)), loc(3, 4))
        .unwrap();
    let id = bomb_at(&mut world, loc(3, 3), 1, 2);
    run_actors(&mut world).unwrap();
    run_actors(&mut world).unwrap();
    assert!(!world.is_placed(id));
    assert_eq!(world.grid().len(), 1);
    assert!(matches!(
        world.entity_at(loc(3, 4)).map(|e| &e.kind),
        Some(EntityKind::Bonus(_))
    ));
}

#[test]
fn random_bug_waits_for_its_interval() {
    let mut world = World::with_ports(
        5,
        5,
        Box::new(SequenceSource::constant(0.999)),
        Box::new(NoopObserver),
    );
    let id = world
        .spawn_at(EntityKind::RandomBug(RandomBug::new(3)), loc(2, 2))
        .unwrap();

    bug::act(&mut world, id).unwrap();
    bug::act(&mut world, id).unwrap();
    assert_eq!(world.location_of(id), Some(loc(2, 2)));
    bug::act(&mut world, id).unwrap();
    assert_eq!(world.location_of(id), Some(loc(1, 2)));
}

#[test]
fn bug_act_rejects_other_kinds() {
    let mut world = world(5);
    let wall = world.spawn_at(EntityKind::Wall, loc(0, 0)).unwrap();
    assert!(bug::act(&mut world, wall).is_err());
    assert!(bomb::act(&mut world, wall).is_err());
}

#[test]
fn placement_and_grid_always_agree() {
    let mut world = world(7);
    for row in 0..7 {
        world.spawn_at(EntityKind::RandomBug(RandomBug::new(1)), loc(row, row)).unwrap();
    }
    bomb_at(&mut world, loc(0, 6), 3, 3);
    for _ in 0..20 {
        run_actors(&mut world).unwrap();
        let mut seen = std::collections::HashSet::new();
        for entity in world.entities() {
            if let Some(location) = entity.location() {
                assert!(seen.insert(location), "two entities at {location}");
                assert_eq!(world.grid().get(location), Some(entity.id()));
            }
        }
        assert_eq!(seen.len(), world.grid().len());
    }
}
