//! Bomb entity logic.
//!
//! A bomb counts down, detonates, and spends exactly one tick exploding before
//! it cleans up its fire and leaves the board:
//!
//! ```text
//! armed (timer > 0) --timer hits 0 / chained--> exploding --next act--> removed
//! ```
//!
//! Detonation casts four independent rays (N, E, S, W) up to `radius` cells:
//! walls stop a ray cold, bricks are destroyed and stop it unless the bomb is a
//! super bomb, other bombs are chain-detonated and skipped over, and anything
//! else is removed and replaced by fire.

use log::debug;

use crate::config::game::{BOMB_TIMER, DEFAULT_BOMB_RADIUS};
use crate::game::entities::{EntityKind, Fire};
use crate::game::error::EntityError;
use crate::game::types::{Direction, EntityId, FireStage, Location};
use crate::game::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub timer: u32,
    pub radius: u32,
    pub is_super: bool,
    pub exploding: bool,
    /// Fire this bomb placed, in placement order. Cleanup removes exactly these.
    pub fire: Vec<FireCell>,
    /// Player that dropped the bomb.
    pub owner: Option<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireCell {
    pub location: Location,
    pub fire: EntityId,
}

impl Bomb {
    pub fn new(timer: u32, radius: u32) -> Self {
        Self {
            timer,
            radius,
            is_super: false,
            exploding: false,
            fire: Vec::new(),
            owner: None,
        }
    }

    pub fn with_super(mut self, is_super: bool) -> Self {
        self.is_super = is_super;
        self
    }

    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn fire_cells(&self) -> Vec<Location> {
        self.fire.iter().map(|cell| cell.location).collect()
    }
}

impl Default for Bomb {
    fn default() -> Self {
        Self::new(BOMB_TIMER, DEFAULT_BOMB_RADIUS)
    }
}

/// One behaviour step: clean up if already exploding, otherwise count down and
/// detonate when the timer runs out.
pub fn act(world: &mut World, bomb: EntityId) -> Result<(), EntityError> {
    let state = world.bomb_mut(bomb)?;
    if state.exploding {
        return cleanup(world, bomb);
    }
    state.timer = state.timer.saturating_sub(1);
    if state.timer == 0 {
        detonate(world, bomb)?;
    }
    Ok(())
}

/// Explode now, regardless of the timer. A bomb that is already exploding is
/// left alone.
pub fn detonate(world: &mut World, bomb: EntityId) -> Result<(), EntityError> {
    let state = world.bomb(bomb)?;
    if state.exploding {
        return Ok(());
    }
    let (radius, is_super) = (state.radius, state.is_super);
    let origin = world.location_of(bomb).ok_or(EntityError::NotPlaced(bomb))?;

    world.bomb_mut(bomb)?.exploding = true;
    debug!(
        "[Bomb] {} detonated at {} radius={} super={}",
        bomb, origin, radius, is_super
    );
    world.observer().on_explosion();

    for direction in Direction::CARDINALS {
        blast_ray(world, bomb, origin, direction, radius, is_super)?;
    }
    Ok(())
}

/// What a ray runs into.
enum Hit {
    Wall,
    Brick,
    Bomb,
    Other,
}

fn classify(kind: &EntityKind) -> Hit {
    match kind {
        EntityKind::Wall => Hit::Wall,
        EntityKind::Brick(_) => Hit::Brick,
        EntityKind::Bomb(_) => Hit::Bomb,
        _ => Hit::Other,
    }
}

fn blast_ray(
    world: &mut World,
    bomb: EntityId,
    origin: Location,
    direction: Direction,
    radius: u32,
    is_super: bool,
) -> Result<(), EntityError> {
    let mut placed = Vec::new();
    let mut current = origin;

    for _ in 0..radius {
        current = current.adjacent(direction);
        if !world.grid().is_valid(current) {
            break;
        }

        let hit = world
            .entity_at(current)
            .map(|entity| (entity.id(), classify(&entity.kind)));
        match hit {
            Some((_, Hit::Wall)) => break,
            Some((brick, Hit::Brick)) => {
                world.detach(brick)?;
                // A revealed bonus survives the blast that uncovered it.
                if world.grid().get(current).is_none() {
                    placed.push(place_fire(world, bomb, current, direction)?);
                }
                if !is_super {
                    break;
                }
            }
            Some((other, Hit::Bomb)) => {
                debug!("[Bomb] {} chained into {} at {}", bomb, other, current);
                detonate(world, other)?;
            }
            Some((victim, Hit::Other)) => {
                // Fire is simply overwritten by the placement below.
                let is_fire = world
                    .entity(victim)
                    .is_some_and(|entity| entity.kind.is_fire());
                if !is_fire {
                    world.detach(victim)?;
                }
                placed.push(place_fire(world, bomb, current, direction)?);
            }
            None => placed.push(place_fire(world, bomb, current, direction)?),
        }
    }

    let last = placed.len().saturating_sub(1);
    for (i, fire) in placed.into_iter().enumerate() {
        let stage = if i == last {
            FireStage::Leading
        } else {
            FireStage::Middle
        };
        if let Some(entity) = world.entity_mut(fire) {
            if let EntityKind::Fire(cell) = &mut entity.kind {
                cell.stage = stage;
            }
        }
    }
    Ok(())
}

fn place_fire(
    world: &mut World,
    bomb: EntityId,
    location: Location,
    direction: Direction,
) -> Result<EntityId, EntityError> {
    let fire = world.spawn_facing(
        EntityKind::Fire(Fire::new(FireStage::Middle, Some(bomb))),
        direction,
    );
    world.place(fire, location)?;
    world.bomb_mut(bomb)?.fire.push(FireCell { location, fire });
    Ok(fire)
}

/// Remove this bomb's fire (whatever of it is still burning) and the bomb itself.
fn cleanup(world: &mut World, bomb: EntityId) -> Result<(), EntityError> {
    let fire = std::mem::take(&mut world.bomb_mut(bomb)?.fire);
    for cell in &fire {
        world.discard(cell.fire);
    }
    if world.is_placed(bomb) {
        world.force_detach(bomb)?;
    }
    debug!("[Bomb] {} burnt out, cleared {} fire cells", bomb, fire.len());
    Ok(())
}
