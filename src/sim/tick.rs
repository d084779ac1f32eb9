//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! fast tick; enemy and power-up translation run on every `slow_divisor`-th
//! tick of the same counter.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects};
use super::effects;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A discrete command from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Shoot,
    /// Only honored once the game is over
    Restart,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands buffered since the previous tick, applied in order
    pub commands: Vec<Command>,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fast tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Game over is terminal until an explicit restart
    if state.phase == GamePhase::GameOver {
        if input.commands.contains(&Command::Restart) {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;

    // Deadlines that passed between ticks take effect before anything moves
    effects::expire(state);

    for &command in &input.commands {
        apply_command(state, command);
    }
    if input.autopilot {
        for command in autopilot_commands(state) {
            apply_command(state, command);
        }
    }

    // 1. Bullets
    let step = state.tuning.bullet_step;
    for bullet in &mut state.bullets {
        bullet.pos.y -= step;
    }
    state.bullets.retain(|b| b.pos.y > 0.0);

    // 2-3. Enemies and power-ups on the slow cadence
    if state.time_ticks % state.tuning.slow_divisor() == 0 {
        let width = state.tuning.playfield_width;
        for enemy in &mut state.enemies {
            enemy.advance(width);
        }
        // Enemies past the bottom stay until the player-hit check has seen them

        let fall = state.tuning.power_up_fall_speed;
        let height = state.tuning.playfield_height;
        for power_up in &mut state.power_ups {
            power_up.pos.y += fall;
        }
        state.power_ups.retain(|p| p.pos.y < height);
    }

    // 4. Bullet vs enemy
    resolve_bullet_hits(state);

    // 5. Player vs power-up
    collect_power_ups(state);

    // 6. Player vs enemy (including breaches)
    resolve_player_hits(state);
    if state.phase == GamePhase::GameOver {
        return;
    }

    // 7. Level progression
    if state.enemies.is_empty() {
        state.level += 1;
        log::info!("Level up: {} (score {})", state.level, state.score);
        state.events.push(GameEvent::LevelUp { level: state.level });
        state.spawn_wave();
    }
}

fn apply_command(state: &mut GameState, command: Command) {
    let width = state.tuning.playfield_width;
    match command {
        Command::MoveLeft => {
            state.player.nudge(-1.0, width);
        }
        Command::MoveRight => {
            state.player.nudge(1.0, width);
        }
        Command::Shoot => shoot(state),
        Command::Restart => log::warn!("Restart ignored: game is still running"),
    }
}

/// Fire from the ship's nose; rapid fire adds two side bullets
fn shoot(state: &mut GameState) {
    let x = state.player.muzzle_x();
    let y = state.player.pos.y;
    let spread = state.tuning.rapid_fire_spread;

    let mut offsets = vec![0.0];
    if state.effects.rapid_fire() {
        offsets.extend([-spread, spread]);
    }
    for dx in offsets {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::new(id, Vec2::new(x + dx, y)));
    }
}

/// One health point per enemy per tick, from the first live bullet that
/// overlaps it. That bullet is spent; any others overlapping the same enemy
/// survive into the next tick.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];
    let mut kills = Vec::new();

    for enemy in &mut state.enemies {
        let target = enemy.rect();
        let hit = state
            .bullets
            .iter()
            .enumerate()
            .find(|&(i, bullet)| !spent[i] && intersects(bullet.rect(), target))
            .map(|(i, _)| i);

        if let Some(i) = hit {
            spent[i] = true;
            if enemy.damage() {
                kills.push((enemy.id, enemy.kind, enemy.points, enemy.pos));
            } else {
                state.events.push(GameEvent::EnemyDamaged {
                    id: enemy.id,
                    health: enemy.health,
                });
            }
        }
    }

    if spent.iter().any(|&s| s) {
        let mut index = 0;
        state.bullets.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
    }

    if kills.is_empty() {
        return;
    }
    state.enemies.retain(|e| e.health > 0);
    for (id, kind, points, pos) in kills {
        state.score += points as u64;
        state.events.push(GameEvent::EnemyKilled { id, kind, points });
        state.roll_power_up_drop(pos);
    }
}

fn collect_power_ups(state: &mut GameState) {
    let player = state.player.rect();
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        if intersects(player, power_up.rect()) {
            collected.push(power_up.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        effects::activate(state, kind);
    }
}

/// An enemy hits the player once its bottom edge reaches the player's top
/// edge while their horizontal spans overlap
pub fn enemy_hits_player(enemy: &Rect, player: &Rect) -> bool {
    enemy.bottom() >= player.y && enemy.overlaps_horizontally(player)
}

fn resolve_player_hits(state: &mut GameState) {
    let player = state.player.rect();
    let height = state.tuning.playfield_height;

    let hit = state
        .enemies
        .iter()
        .any(|e| enemy_hits_player(&e.rect(), &player));

    for enemy in state.enemies.iter().filter(|e| e.pos.y >= height) {
        state.events.push(GameEvent::Breach { id: enemy.id });
    }

    if hit {
        if state.effects.shielded() {
            log::debug!("Hit absorbed by shield");
            state.events.push(GameEvent::HitAbsorbed);
        } else {
            state.lives = state.lives.saturating_sub(1);
            // Wave wipe: the whole field resets, not just the colliding enemy
            state.enemies.clear();
            log::info!("Player hit: {} lives left", state.lives);
            state.events.push(GameEvent::PlayerHit { lives: state.lives });

            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                state.effects.cancel_all();
                log::info!("Game over: score {} at level {}", state.score, state.level);
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    level: state.level,
                });
            }
        }
    }

    state.enemies.retain(|e| e.pos.y < height);
}

/// Demo-mode controller: collect a low-falling power-up when one is within
/// reach, otherwise line up under the lowest enemy and keep firing
pub fn autopilot_commands(state: &GameState) -> Vec<Command> {
    let player = state.player.rect();
    let center = player.x + player.w / 2.0;

    let pickup_x = state
        .power_ups
        .iter()
        .filter(|p| p.pos.y > player.y - 150.0)
        .min_by(|a, b| {
            let da = (a.pos.x - center).abs();
            let db = (b.pos.x - center).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .map(|p| p.pos.x + POWER_UP_SIZE / 2.0);

    let lowest_enemy = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));
    let enemy_x = lowest_enemy.map(|e| e.pos.x + ENEMY_WIDTH / 2.0);

    let mut commands = Vec::new();
    if let Some(target) = pickup_x.or(enemy_x) {
        let tolerance = state.player.speed / 2.0;
        if target < center - tolerance {
            commands.push(Command::MoveLeft);
        } else if target > center + tolerance {
            commands.push(Command::MoveRight);
        }
    }
    if lowest_enemy.is_some() && state.time_ticks % 8 == 0 {
        commands.push(Command::Shoot);
    }
    commands
}
