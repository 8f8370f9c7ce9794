//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context: `tick` receives it by
//! `&mut` and nothing else holds gameplay state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::collision::Wall;
use super::effects::{ActiveEffects, EffectKind};
use super::food::{Food, FoodKind};
use super::grid::{Bounds, Position};
use super::hazards::{Hazards, TimerBasis};
use super::random::{RandomSource, seeded};
use super::snake::Snake;
use crate::consts::*;
use crate::settings::{MapSize, Settings};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake placed, waiting for the start input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Round ended
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Wall,
    SelfHit,
    Block,
    Bomb,
    Health,
    Passes,
    /// No free cell left for the next item
    BoardFull,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "wall",
            GameOverReason::SelfHit => "self",
            GameOverReason::Block => "block",
            GameOverReason::Bomb => "bomb",
            GameOverReason::Health => "health",
            GameOverReason::Passes => "passes",
            GameOverReason::BoardFull => "full",
        }
    }

    /// Player-facing death message
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "You hit the wall!",
            GameOverReason::SelfHit => "You bit your own tail!",
            GameOverReason::Block => "You crashed into an obstacle!",
            GameOverReason::Bomb => "A bomb went off!",
            GameOverReason::Health => "Out of health!",
            GameOverReason::Passes => "Too much food slipped away!",
            GameOverReason::BoardFull => "No room left on the board!",
        }
    }
}

/// Notifications for UI/audio collaborators, drained by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Paused,
    Resumed,
    ScoreChanged { score: i64 },
    HealthChanged { health: i32 },
    PassesChanged { passes: u32 },
    FoodEaten { kind: FoodKind },
    ItemSpawned { kind: FoodKind, pos: Position },
    ItemExpired { kind: FoodKind },
    EffectActivated { kind: EffectKind, duration_ms: u64 },
    EffectExpired { kind: EffectKind },
    SprintStarted,
    Bounced { wall: Wall },
    ObstacleSpawned { pos: Position },
    BombPlanted { pos: Vec2 },
    BombExploded { pos: Vec2 },
    FloatingText { text: String, pos: Position },
    GameOver { reason: GameOverReason, score: i64 },
    /// Final score made the leaderboard (1-based rank)
    NewHighScore { rank: usize },
}

/// Faults that are not game states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Every cell is taken; nothing more can be placed
    BoardSaturated { cells: usize },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::BoardSaturated { cells } => {
                write!(f, "no free cell left to spawn on ({} cells)", cells)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Complete game state for one round
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub map_size: MapSize,
    pub bounds: Bounds,
    pub phase: GamePhase,
    pub clock: SimClock,
    pub snake: Snake,
    pub food: Food,
    pub hazards: Hazards,
    pub effects: ActiveEffects,
    pub score: i64,
    pub passes: u32,
    /// Set once when the round ends
    pub game_over: Option<GameOverReason>,
    /// Pending notifications (oldest first)
    pub events: Vec<GameEvent>,
    pub(crate) rng: Box<dyn RandomSource>,
}

impl GameState {
    /// Create a round with a seeded RNG
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, seed, seeded(seed))
    }

    /// Create a round drawing randomness from `rng`
    pub fn with_rng(settings: &Settings, seed: u64, rng: Box<dyn RandomSource>) -> Self {
        let map_size = settings.map_size;
        let (width, height) = map_size.dimensions();
        let bounds = Bounds::new(width, height);
        let fuse_basis = if settings.hazards_respect_pause {
            TimerBasis::Active
        } else {
            TimerBasis::Wall
        };

        Self {
            seed,
            map_size,
            bounds,
            phase: GamePhase::Ready,
            clock: SimClock::new(),
            snake: Snake::new(&bounds, map_size.speed(), settings.double_press_window_ms),
            food: Food::new(),
            hazards: Hazards::new(map_size.obstacle_interval_ms(), fuse_basis),
            effects: ActiveEffects::default(),
            score: 0,
            passes: STARTING_PASSES,
            game_over: None,
            events: Vec::new(),
            rng,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Active time of the round so far
    pub fn active_ms(&self) -> u64 {
        self.clock.active_ms()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Replace the live food item. A full board ends the round and the
    /// fault is still returned to the host.
    pub fn respawn_food(&mut self) -> Result<(), SimError> {
        let now = self.clock.active_ms();
        let snake = &self.snake;
        let hazards = &self.hazards;
        let spawned = self.food.spawn(
            self.rng.as_mut(),
            &self.bounds,
            |p| snake.occupies(p) || hazards.has_obstacle(p),
            now,
        );
        if let Err(e) = spawned {
            self.end_round(GameOverReason::BoardFull);
            return Err(e);
        }
        self.events.push(GameEvent::ItemSpawned {
            kind: self.food.kind,
            pos: self.food.cell(),
        });
        Ok(())
    }

    /// Begin the round: start the clock, release the snake, place food
    pub fn start(&mut self, now_ms: u64) -> Result<(), SimError> {
        if self.phase != GamePhase::Ready {
            return Ok(());
        }
        self.clock.start(now_ms);
        self.snake.start_moving();
        self.food.reset();
        self.respawn_food()?;
        self.phase = GamePhase::Playing;
        log::info!(
            "Round started on {} map ({}x{})",
            self.map_size.as_str(),
            self.bounds.width,
            self.bounds.height
        );
        self.events.push(GameEvent::RoundStarted);
        Ok(())
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.phase == GamePhase::Playing {
            self.clock.pause(now_ms);
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if self.phase == GamePhase::Paused {
            self.clock.resume(now_ms);
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    /// End the round. Only the first call has any effect.
    pub fn end_round(&mut self, reason: GameOverReason) {
        if self.game_over.is_some() {
            return;
        }
        self.game_over = Some(reason);
        self.phase = GamePhase::GameOver;
        self.snake.kill();
        self.effects.clear();
        log::info!("Game over ({}), score {}", reason.as_str(), self.score);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
    }

    /// Change score and keep the body length in step with it
    pub fn add_score(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        self.score += delta;
        self.snake.sync_length_to_score(self.score);
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }
}
