//! Fixed-timestep driver
//!
//! Owns the authoritative `GameState`, buffers input commands between ticks,
//! converts wall-clock time into fast ticks, and tears everything down on
//! `stop()`. Collaborators only ever see copies (`Snapshot`, `SessionState`).

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::error::SimError;
use crate::sim::{Command, GameEvent, GameState, SessionState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Longest frame gap fed to the accumulator; longer stalls are dropped
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

pub struct GameLoop {
    state: GameState,
    /// Commands received since the last tick
    pending: Vec<Command>,
    /// Events from every tick since the last drain
    events: Vec<GameEvent>,
    accumulator: Duration,
    tick_len: Duration,
    autopilot: bool,
    running: bool,
}

impl GameLoop {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        Ok(Self::from_state(GameState::with_tuning(seed, tuning)?))
    }

    fn from_state(mut state: GameState) -> Self {
        let tick_len = Duration::from_secs(1) / state.tuning.fast_hz;
        // Keep the initial wave announcement
        let events = std::mem::take(&mut state.events);
        Self {
            state,
            pending: Vec::new(),
            events,
            accumulator: Duration::ZERO,
            tick_len,
            autopilot: false,
            running: true,
        }
    }

    // === Input collaborator ===

    /// Queue a command for the next tick. Ignored after `stop()`.
    pub fn push(&mut self, command: Command) {
        if self.running {
            self.pending.push(command);
        }
    }

    pub fn move_left(&mut self) {
        self.push(Command::MoveLeft);
    }

    pub fn move_right(&mut self) {
        self.push(Command::MoveRight);
    }

    pub fn shoot(&mut self) {
        self.push(Command::Shoot);
    }

    /// Request a restart; applied at the next tick boundary, and only once the
    /// game is over
    pub fn restart(&mut self) {
        self.push(Command::Restart);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    // === Scheduling ===

    /// Run exactly one fast tick with the buffered commands.
    /// Returns false once the loop has been stopped.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let input = TickInput {
            commands: std::mem::take(&mut self.pending),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input);
        self.events.append(&mut self.state.events);
        true
    }

    /// Feed elapsed wall time; runs as many fast ticks as fit (at most
    /// `MAX_SUBSTEPS`) and returns how many ran
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed.min(MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.tick_len && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= self.tick_len;
            substeps += 1;
        }
        substeps
    }

    /// Tear down: no further ticks, buffered commands dropped, pending effect
    /// deadlines cancelled
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.pending.clear();
        self.accumulator = Duration::ZERO;
        self.state.effects.cancel_all();
        log::info!(
            "Game loop stopped at tick {} (score {})",
            self.state.time_ticks,
            self.state.score
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // === Render / UI collaborators ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn session(&self) -> SessionState {
        self.state.session()
    }

    /// Take every event produced since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for design-time seeding between ticks
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tick_len(&self) -> Duration {
        self.tick_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use crate::sim::effects;

    fn quiet_loop() -> GameLoop {
        let mut game = GameLoop::with_tuning(
            5,
            Tuning {
                power_up_drop_chance: 0.0,
                ..Default::default()
            },
        )
        .unwrap();
        let state = game.state_mut();
        state.enemies.clear();
        state.seed_enemy("tank", 0.0, 0.0).unwrap();
        game
    }

    #[test]
    fn test_tick_length() {
        let game = GameLoop::new(1);
        assert_eq!(game.tick_len(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut game = quiet_loop();
        assert_eq!(game.advance(Duration::from_millis(10)), 0);
        assert_eq!(game.advance(Duration::from_millis(10)), 1);
        assert_eq!(game.advance(Duration::from_millis(50)), 3);
        assert_eq!(game.state().time_ticks, 4);
    }

    #[test]
    fn test_advance_caps_long_stalls() {
        let mut game = quiet_loop();
        let ran = game.advance(Duration::from_secs(5));
        assert!(ran <= MAX_SUBSTEPS);
        assert_eq!(ran, 6);
    }

    #[test]
    fn test_commands_applied_on_next_tick() {
        let mut game = quiet_loop();
        game.shoot();
        game.move_left();
        assert!(game.state().bullets.is_empty());

        game.advance(Duration::ZERO);
        assert!(game.state().bullets.is_empty());

        assert!(game.step());
        assert_eq!(game.state().bullets.len(), 1);
        assert_eq!(game.state().player.pos.x, 220.0);

        // Buffer is consumed; the next tick fires nothing new
        game.step();
        assert_eq!(game.state().bullets.len(), 1);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut game = quiet_loop();
        effects::activate(game.state_mut(), PowerUpKind::Shield);
        assert!(game.session().shielded);

        game.shoot();
        game.stop();
        assert!(!game.is_running());
        assert!(!game.session().shielded);

        assert!(!game.step());
        assert_eq!(game.advance(Duration::from_secs(1)), 0);
        game.shoot();
        assert!(game.state().bullets.is_empty());
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_events_accumulate_until_drained() {
        let mut game = quiet_loop();
        let initial = game.drain_events();
        assert!(matches!(initial[0], GameEvent::WaveSpawned { level: 1, size: 3 }));

        game.state_mut().seed_power_up("rapidFire", 230.0, 455.0).unwrap();
        game.step();
        game.step();
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::RapidFire
        }));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_restart_through_ui() {
        let mut game = quiet_loop();
        let state = game.state_mut();
        state.lives = 1;
        state.seed_enemy("basic", 225.0, 425.0).unwrap();
        game.step();
        assert!(game.session().is_game_over);

        game.restart();
        game.step();
        let session = game.session();
        assert!(!session.is_game_over);
        assert_eq!((session.level, session.score, session.lives), (1, 0, 3));
        assert_eq!(game.snapshot().enemies.len(), 3);
    }

    #[test]
    fn test_autopilot_plays() {
        let mut game = GameLoop::new(31337);
        game.set_autopilot(true);
        for _ in 0..120 {
            game.step();
        }
        // Fires on every 8th tick; the shot from tick 120 is still in flight
        assert_eq!(game.state().time_ticks, 120);
        assert!(!game.state().bullets.is_empty());
    }
}
