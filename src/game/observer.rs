//! Effect notifications the engine emits for renderers, audio and the like.

use std::rc::Rc;

use log::{debug, info};

use super::types::Location;

/// Receives explosion and death notifications synchronously, mid-tick.
///
/// Both methods default to doing nothing; implement only what you need.
pub trait GameObserver {
    /// Called once per bomb detonation, chained ones included.
    fn on_explosion(&self) {}

    /// Called once when a player dies, with the cell it died on.
    fn on_death(&self, _player_index: usize, _location: Location) {}
}

/// Observer used when none is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// Reports every notification through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl GameObserver for LoggingObserver {
    fn on_explosion(&self) {
        debug!("[Observer] explosion");
    }

    fn on_death(&self, player_index: usize, location: Location) {
        info!("[Observer] player {} died at {}", player_index + 1, location);
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Rc<T> {
    fn on_explosion(&self) {
        (**self).on_explosion()
    }

    fn on_death(&self, player_index: usize, location: Location) {
        (**self).on_death(player_index, location)
    }
}
