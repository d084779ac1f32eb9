//! Read-only views handed to the render and UI collaborators
//!
//! Everything is copied out of `GameState`, so a presentation layer can hold
//! a snapshot across frames without borrowing the simulation.

use serde::{Deserialize, Serialize};

use super::catalog::{EnemyKind, PowerUpKind};
use super::collision::Rect;
use super::state::GameState;

/// Score/level/lives/flags passed by value to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub is_game_over: bool,
    pub shielded: bool,
    pub rapid_fire: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub shielded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub rect: Rect,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    pub color: u32,
}

impl EnemyView {
    /// Health bar fill in [0, 1]; only multi-hit enemies show a bar
    pub fn health_fraction(&self) -> Option<f32> {
        (self.max_health > 1).then(|| self.health as f32 / self.max_health as f32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub color: u32,
    pub symbol: String,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub bullets: Vec<Rect>,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUpView>,
    pub session: SessionState,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let session = state.session();
        Self {
            tick: state.time_ticks,
            player: PlayerView {
                rect: state.player.rect(),
                shielded: session.shielded,
            },
            bullets: state.bullets.iter().map(|b| b.rect()).collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    rect: e.rect(),
                    kind: e.kind,
                    health: e.health,
                    max_health: e.max_health,
                    color: e.color,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| {
                    let archetype = p.kind.archetype();
                    PowerUpView {
                        id: p.id,
                        rect: p.rect(),
                        kind: p.kind,
                        color: archetype.color,
                        symbol: archetype.symbol.to_string(),
                    }
                })
                .collect(),
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_initial() {
        let state = GameState::new(3);
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.player.rect, Rect::new(225.0, 450.0, 60.0, 40.0));
        assert!(!snap.player.shielded);
        assert_eq!(snap.enemies.len(), 3);
        assert_eq!(
            snap.session,
            SessionState {
                score: 0,
                level: 1,
                lives: 3,
                is_game_over: false,
                shielded: false,
                rapid_fire: false,
            }
        );
    }

    #[test]
    fn test_power_up_view_uses_catalog() {
        let mut state = GameState::new(3);
        state.seed_power_up("extraLife", 10.0, 20.0).unwrap();
        let snap = Snapshot::capture(&state);
        let view = &snap.power_ups[0];
        assert_eq!(view.color, 0xFF69B4);
        assert_eq!(view.rect, Rect::new(10.0, 20.0, 20.0, 20.0));
    }

    #[test]
    fn test_health_fraction() {
        let mut state = GameState::new(3);
        state.enemies.clear();
        state.seed_enemy("tank", 0.0, 0.0).unwrap();
        state.seed_enemy("basic", 100.0, 0.0).unwrap();
        state.enemies[0].health = 2;
        let snap = Snapshot::capture(&state);
        assert!((snap.enemies[0].health_fraction().unwrap() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(snap.enemies[1].health_fraction(), None);
    }

    #[test]
    fn test_snapshot_json() {
        let snap = Snapshot::capture(&GameState::new(3));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["session"]["lives"], 3);
        assert_eq!(json["enemies"].as_array().unwrap().len(), 3);
    }
}
