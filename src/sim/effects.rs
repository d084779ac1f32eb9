//! Power-up effect controller
//!
//! Timed effects are deadlines on the fast-tick clock. They are checked at
//! the start of every tick, so an expiry is always visible to the whole tick
//! that follows it and never lands halfway through collision resolution.

use serde::{Deserialize, Serialize};

use super::catalog::PowerUpKind;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_LIVES;
use crate::ms_to_ticks;

/// Active timed modifiers; `Some(deadline)` means active until that tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_until: Option<u64>,
    pub rapid_fire_until: Option<u64>,
}

impl ActiveEffects {
    pub fn shielded(&self) -> bool {
        self.shield_until.is_some()
    }

    pub fn rapid_fire(&self) -> bool {
        self.rapid_fire_until.is_some()
    }

    /// Clear every effect whose deadline has been reached; returns what ended
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        if self.shield_until.is_some_and(|until| now >= until) {
            self.shield_until = None;
            expired.push(PowerUpKind::Shield);
        }
        if self.rapid_fire_until.is_some_and(|until| now >= until) {
            self.rapid_fire_until = None;
            expired.push(PowerUpKind::RapidFire);
        }
        expired
    }

    /// Drop all pending deadlines (teardown / restart)
    pub fn cancel_all(&mut self) {
        *self = Self::default();
    }
}

/// Apply a collected power-up.
///
/// Timed effects restart their deadline when re-collected; they never stack.
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    let now = state.time_ticks;
    let until = kind
        .archetype()
        .duration_ms
        .map(|ms| now + ms_to_ticks(ms, state.tuning.fast_hz));

    match kind {
        PowerUpKind::ExtraLife => {
            let cap = state.tuning.max_lives.min(MAX_LIVES);
            state.lives = state.lives.saturating_add(1).min(cap);
            log::debug!("Extra life: {} lives", state.lives);
        }
        PowerUpKind::Shield => {
            state.effects.shield_until = until;
            log::debug!("Shield active until tick {until:?}");
        }
        PowerUpKind::RapidFire => {
            state.effects.rapid_fire_until = until;
            log::debug!("Rapid fire active until tick {until:?}");
        }
    }
    state.events.push(GameEvent::PowerUpCollected { kind });
}

/// Expire timed effects at the current tick, recording an event for each
pub fn expire(state: &mut GameState) {
    for kind in state.effects.expire(state.time_ticks) {
        log::debug!("{kind} expired at tick {}", state.time_ticks);
        state.events.push(GameEvent::EffectExpired { kind });
    }
}
