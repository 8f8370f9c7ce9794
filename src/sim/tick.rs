//! Per-frame simulation tick
//!
//! Order within a frame is fixed: input, timers, hazards, magnetic pull,
//! food expiry, then the snake step with collision resolved before
//! consumption so a fatal move never pays out.

use super::autopilot;
use super::collision::CollisionOutcome;
use super::food::FoodKind;
use super::grid::Direction;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, SimError};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction presses since the last tick, oldest first
    pub directions: Vec<Direction>,
    /// Start the round (leaves `Ready`)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot steers the snake
    pub idle_mode: bool,
}

/// Advance the game to wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> Result<(), SimError> {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause(now_ms);
                return Ok(());
            }
            GamePhase::Paused => state.resume(now_ms),
            _ => {}
        }
    }

    if input.start && state.phase == GamePhase::Ready {
        state.start(now_ms)?;
    }

    // Don't tick unless playing
    if state.phase != GamePhase::Playing {
        return Ok(());
    }

    state.clock.sync(now_ms);
    let now = state.clock.active_ms();
    let wall = state.clock.wall_ms();

    for &dir in &input.directions {
        turn(state, dir, now);
    }
    if input.idle_mode {
        if let Some(dir) = autopilot::steer(state) {
            turn(state, dir, now);
        }
    }

    state.snake.update_sprint(now);
    for kind in state.effects.expire(now) {
        log::debug!("{} ended", kind.label());
        state.push_event(GameEvent::EffectExpired { kind });
    }

    advance_hazards(state, now, wall);
    if state.is_over() {
        return Ok(());
    }

    if state.effects.is_magnetic(now) {
        let head = state.snake.head().as_vec2();
        state.food.attract_toward(head);
    }

    if state.food.is_expired(&state.clock) {
        let kind = state.food.kind;
        state.push_event(GameEvent::ItemExpired { kind });
        // Missing a power-up is free
        if !kind.is_special() {
            state.passes = state.passes.saturating_sub(1);
            state.push_event(GameEvent::PassesChanged {
                passes: state.passes,
            });
            if state.passes == 0 {
                state.end_round(GameOverReason::Passes);
                return Ok(());
            }
        }
        state.respawn_food()?;
    }

    state.snake.sync_length_to_score(state.score);
    if !state.snake.step(now) {
        return Ok(());
    }

    let intangible = state.effects.is_intangible(now);
    match state.snake.resolve_collision(&state.bounds, intangible) {
        CollisionOutcome::Fatal(reason) => {
            state.end_round(reason);
            return Ok(());
        }
        CollisionOutcome::Bounced(wall) => {
            log::debug!("Ghost bounced off {:?} wall", wall);
            state.push_event(GameEvent::Bounced { wall });
        }
        CollisionOutcome::Clear => {}
    }

    if !intangible && state.hazards.has_obstacle(state.snake.head()) {
        state.end_round(GameOverReason::Block);
        return Ok(());
    }

    if state.snake.head() == state.food.cell() {
        consume_food(state, now)?;
    }

    Ok(())
}

fn turn(state: &mut GameState, dir: Direction, now: u64) {
    let result = state.snake.set_direction(dir, now);
    if result.sprint_started {
        state.push_event(GameEvent::SprintStarted);
    }
}

fn advance_hazards(state: &mut GameState, now: u64, wall: u64) {
    let snake = &state.snake;
    let food_cell = state.food.cell();
    let report = state.hazards.advance(
        state.rng.as_mut(),
        &state.bounds,
        |p| snake.occupies(p) || p == food_cell,
        snake.head(),
        now,
        wall,
    );

    if let Some(pos) = report.obstacle {
        state.push_event(GameEvent::ObstacleSpawned { pos });
    }
    if let Some(pos) = report.bomb {
        state.push_event(GameEvent::BombPlanted { pos });
    }
    for detonation in &report.detonations {
        state.push_event(GameEvent::BombExploded { pos: detonation.pos });
    }
    if report.fatal() {
        state.end_round(GameOverReason::Bomb);
    }
}

/// Apply the reward or power-up of the item under the head, then replace it
fn consume_food(state: &mut GameState, now: u64) -> Result<(), SimError> {
    let kind = state.food.kind;
    let cell = state.food.cell();
    state.push_event(GameEvent::FoodEaten { kind });

    match kind {
        FoodKind::Special(special) => {
            match special.effect() {
                Some(effect) => {
                    state.effects.activate(effect, now, EFFECT_DURATION_MS);
                    state.push_event(GameEvent::EffectActivated {
                        kind: effect,
                        duration_ms: EFFECT_DURATION_MS,
                    });
                }
                None => {
                    state.passes += 1;
                    state.push_event(GameEvent::PassesChanged {
                        passes: state.passes,
                    });
                }
            }
            state.push_event(GameEvent::FloatingText {
                text: special.banner().to_string(),
                pos: cell,
            });
            state.snake.sync_length_to_score(state.score);
        }
        FoodKind::Regular(regular) => {
            let delta = regular.score_delta() * state.effects.score_multiplier(now);
            state.push_event(GameEvent::FloatingText {
                text: format!("{:+}", delta),
                pos: cell,
            });
            state.add_score(delta);

            let health_delta = regular.health_delta();
            if health_delta != 0 {
                let health = state.snake.apply_health(health_delta);
                state.push_event(GameEvent::HealthChanged { health });
                if health == 0 {
                    state.end_round(GameOverReason::Health);
                    return Ok(());
                }
            }
        }
    }

    state.respawn_food()
}
