//! Space Attack - simulation core of a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, power-ups)
//! - `game_loop`: Fixed-timestep driver with command buffering and teardown
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors
//!
//! Rendering, input capture and the on-screen UI live in the presentation
//! layer; they read [`sim::Snapshot`] and push [`sim::Command`]s.

pub mod error;
pub mod game_loop;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use game_loop::GameLoop;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fast cadence (bullets, collisions, commands)
    pub const FAST_TICK_HZ: u32 = 60;
    /// Slow cadence (enemy and power-up translation)
    pub const SLOW_TICK_HZ: u32 = 20;
    /// Maximum fast ticks per `GameLoop::advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 225.0;
    pub const PLAYER_START_Y: f32 = 450.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Upward travel per fast tick
    pub const BULLET_STEP: f32 = 7.0;
    /// Horizontal offset of the side bullets while rapid fire is active
    pub const RAPID_FIRE_SPREAD: f32 = 10.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    /// Wavelength divisor of the horizontal drift (`sin(y / 30)`)
    pub const ENEMY_DRIFT_PERIOD: f32 = 30.0;
    /// Amplitude of the horizontal drift per slow tick
    pub const ENEMY_DRIFT_AMPLITUDE: f32 = 2.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;

    /// Session
    pub const INITIAL_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
}

/// Convert a millisecond duration to whole fast ticks, rounding up so an
/// effect never ends early.
#[inline]
pub fn ms_to_ticks(ms: u32, fast_hz: u32) -> u64 {
    (ms as u64 * fast_hz as u64).div_ceil(1000)
}
