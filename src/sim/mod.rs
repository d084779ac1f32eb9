//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{EnemyArchetype, EnemyKind, PowerUpArchetype, PowerUpKind};
pub use collision::{Rect, intersects};
pub use effects::ActiveEffects;
pub use snapshot::{EnemyView, PlayerView, PowerUpView, SessionState, Snapshot};
pub use spawn::{maybe_spawn_power_up, spawn_wave, wave_size};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Player, PowerUp};
pub use tick::{Command, TickInput, autopilot_commands, tick};
