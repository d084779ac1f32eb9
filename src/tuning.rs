//! Data-driven game balance
//!
//! Every number that shapes a run lives here so a presentation layer can ship
//! its own JSON without recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Cadence ===
    /// Fast ticks per second (bullets, collisions, commands)
    pub fast_hz: u32,
    /// Slow ticks per second (enemy and power-up translation)
    pub slow_hz: u32,

    // === Player ===
    /// Horizontal distance per move command
    pub player_speed: f32,
    /// Bullet rise per fast tick
    pub bullet_step: f32,
    /// Side bullet offset while rapid fire is active
    pub rapid_fire_spread: f32,

    // === Spawning ===
    /// Enemies in a wave before the level bonus (`base + level / 2`)
    pub wave_base_size: u32,
    /// Enemies spawn with y uniform in [0, wave_spawn_band)
    pub wave_spawn_band: f32,
    /// First draw: chance the enemy is a tank
    pub tank_chance: f64,
    /// Second, independent draw: chance a non-tank is fast
    pub fast_chance: f64,
    /// Chance a kill drops a power-up
    pub power_up_drop_chance: f64,
    /// Power-up fall per slow tick
    pub power_up_fall_speed: f32,

    // === Lives ===
    pub initial_lives: u8,
    pub max_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            fast_hz: FAST_TICK_HZ,
            slow_hz: SLOW_TICK_HZ,

            player_speed: PLAYER_SPEED,
            bullet_step: BULLET_STEP,
            rapid_fire_spread: RAPID_FIRE_SPREAD,

            wave_base_size: 3,
            wave_spawn_band: 150.0,
            tank_chance: 0.2,
            fast_chance: 0.4,
            power_up_drop_chance: 0.2,
            power_up_fall_speed: 1.0,

            initial_lives: INITIAL_LIVES,
            max_lives: MAX_LIVES,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fast ticks per slow tick
    pub fn slow_divisor(&self) -> u64 {
        (self.fast_hz / self.slow_hz.max(1)).max(1) as u64
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
            SimError::InvalidTuning {
                field,
                reason: reason.into(),
            }
        }

        if self.playfield_width < PLAYER_WIDTH || self.playfield_width < ENEMY_WIDTH {
            return Err(invalid("playfield_width", "narrower than the player or an enemy"));
        }
        if self.playfield_height < PLAYER_START_Y + PLAYER_HEIGHT {
            return Err(invalid("playfield_height", "player row does not fit"));
        }
        if self.fast_hz == 0 || self.slow_hz == 0 {
            return Err(invalid("fast_hz", "tick rates must be non-zero"));
        }
        if self.fast_hz % self.slow_hz != 0 {
            return Err(invalid(
                "slow_hz",
                format!("{} Hz does not divide {} Hz", self.slow_hz, self.fast_hz),
            ));
        }
        if self.player_speed <= 0.0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        if self.bullet_step <= 0.0 {
            return Err(invalid("bullet_step", "bullets must move up"));
        }
        if self.wave_base_size == 0 {
            return Err(invalid("wave_base_size", "a wave needs at least one enemy"));
        }
        if self.wave_spawn_band <= 0.0 {
            return Err(invalid("wave_spawn_band", "must be positive"));
        }
        if self.power_up_fall_speed <= 0.0 {
            return Err(invalid("power_up_fall_speed", "power-ups must fall"));
        }
        for (field, p) in [
            ("tank_chance", self.tank_chance),
            ("fast_chance", self.fast_chance),
            ("power_up_drop_chance", self.power_up_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("{p} is not a probability")));
            }
        }
        if self.max_lives > MAX_LIVES {
            return Err(invalid(
                "max_lives",
                format!("{} is above the cap of {MAX_LIVES}", self.max_lives),
            ));
        }
        if self.initial_lives == 0 || self.initial_lives > self.max_lives {
            return Err(invalid("initial_lives", "must be within 1..=max_lives"));
        }
        Ok(())
    }
}
