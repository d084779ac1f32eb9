//! Game state and core simulation types
//!
//! Everything a session needs to continue deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{EnemyKind, PowerUpKind};
use super::collision::Rect;
use super::effects::ActiveEffects;
use super::snapshot::SessionState;
use super::spawn;
use crate::consts::*;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Lives ran out; only a restart leaves this phase
    GameOver,
}

/// Something that happened during a tick, for sound/visual cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { level: u32, size: usize },
    EnemyKilled { id: u32, kind: EnemyKind, points: u32 },
    EnemyDamaged { id: u32, health: u32 },
    PowerUpDropped { id: u32, kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    EffectExpired { kind: PowerUpKind },
    /// Enemy left the bottom of the playfield
    Breach { id: u32 },
    PlayerHit { lives: u8 },
    HitAbsorbed,
    LevelUp { level: u32 },
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// Hands out entity IDs in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal distance per move command
    pub speed: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move horizontally by `dir * speed`, clamped to [0, width - player width].
    /// Returns false when already pinned at that edge.
    pub fn nudge(&mut self, dir: f32, playfield_width: f32) -> bool {
        let max_x = (playfield_width - self.size.x).max(0.0);
        let new_x = (self.pos.x + dir * self.speed).clamp(0.0, max_x);
        let moved = new_x != self.pos.x;
        self.pos.x = new_x;
        moved
    }

    /// Spawn x of a centered bullet
    pub fn muzzle_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0
    }
}

/// A player projectile, moving straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// An enemy; stats are copied from its archetype at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub points: u32,
    /// Fall per slow tick
    pub speed: f32,
    pub color: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let archetype = kind.archetype();
        Self {
            id,
            kind,
            pos,
            health: archetype.health,
            max_health: archetype.health,
            points: archetype.points,
            speed: archetype.speed,
            color: archetype.color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    /// Fall by `speed` with a wavy sideways drift keyed off the pre-move y.
    /// x stays inside the playfield.
    pub fn advance(&mut self, playfield_width: f32) {
        let drift = (self.pos.y / ENEMY_DRIFT_PERIOD).sin() * ENEMY_DRIFT_AMPLITUDE;
        self.pos.y += self.speed;
        self.pos.x = (self.pos.x + drift).clamp(0.0, (playfield_width - ENEMY_WIDTH).max(0.0));
    }

    /// Take one point of damage. Returns true when destroyed.
    pub fn damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self { id, kind, pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner randomness
    pub rng: Pcg32,
    /// Balance values fixed for the session
    pub tuning: Tuning,
    /// Fast tick counter; doubles as the virtual clock for effect deadlines
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Shield / rapid-fire deadlines
    pub effects: ActiveEffects,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    ids: EntityIds,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        let mut state = Self::blank(seed, Tuning::default());
        state.spawn_wave();
        state
    }

    /// Create a new session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        let mut state = Self::blank(seed, tuning);
        state.spawn_wave();
        Ok(state)
    }

    fn blank(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            level: 1,
            score: 0,
            lives: tuning.initial_lives,
            player: Player::new(tuning.player_speed),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            events: Vec::new(),
            ids: EntityIds::default(),
            tuning,
        }
    }

    /// Reset every piece of session state and spawn the level-1 wave.
    ///
    /// The RNG keeps running so consecutive runs get different waves.
    pub fn restart(&mut self) {
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.level = 1;
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.player = Player::new(self.tuning.player_speed);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.effects.cancel_all();
        log::info!("Session restarted (seed {})", self.seed);
        self.events.push(GameEvent::Restarted);
        self.spawn_wave();
    }

    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Replace the enemy collection with a wave sized for the current level
    pub fn spawn_wave(&mut self) {
        self.enemies = spawn::spawn_wave(self.level, &self.tuning, &mut self.rng, &mut self.ids);
        log::info!("Level {}: spawned wave of {}", self.level, self.enemies.len());
        self.events.push(GameEvent::WaveSpawned {
            level: self.level,
            size: self.enemies.len(),
        });
    }

    /// Roll the drop table at a kill location; returns the new power-up's ID
    pub fn roll_power_up_drop(&mut self, pos: Vec2) -> Option<u32> {
        let power_up = spawn::maybe_spawn_power_up(pos, &self.tuning, &mut self.rng, &mut self.ids)?;
        let id = power_up.id;
        self.events.push(GameEvent::PowerUpDropped {
            id,
            kind: power_up.kind,
        });
        self.power_ups.push(power_up);
        Some(id)
    }

    /// Place an enemy by archetype tag (design-time seeding)
    pub fn seed_enemy(&mut self, tag: &str, x: f32, y: f32) -> Result<u32, SimError> {
        let kind: EnemyKind = tag.parse()?;
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, Vec2::new(x, y)));
        Ok(id)
    }

    /// Place a power-up by archetype tag (design-time seeding)
    pub fn seed_power_up(&mut self, tag: &str, x: f32, y: f32) -> Result<u32, SimError> {
        let kind: PowerUpKind = tag.parse()?;
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, kind, Vec2::new(x, y)));
        Ok(id)
    }

    /// Score/level/lives/flags by value
    pub fn session(&self) -> SessionState {
        SessionState {
            score: self.score,
            level: self.level,
            lives: self.lives,
            is_game_over: self.is_game_over(),
            shielded: self.effects.shielded(),
            rapid_fire: self.effects.rapid_fire(),
        }
    }
}
