//! Frame driver
//!
//! `Session` owns one round plus the host-facing collaborators' state: it
//! buffers input between frames, runs `tick`, forwards events to the
//! presenter, settles the leaderboard once per round and hands the state to
//! the renderer.

use glam::Vec2;
use serde::Serialize;

use crate::format_elapsed;
use crate::platform::{Presenter, Renderer, ScoreBoard};
use crate::settings::Settings;
use crate::sim::{
    Direction, EffectKind, FoodKind, GameEvent, GameOverReason, GamePhase, GameState, Position,
    SimError, TickInput, tick,
};

/// How a finished round went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub reason: GameOverReason,
    pub score: i64,
    /// Leaderboard rank, if the score made it
    pub rank: Option<usize>,
    pub elapsed_ms: u64,
}

pub struct Session<B: ScoreBoard> {
    pub state: GameState,
    pub board: B,
    settings: Settings,
    input: TickInput,
    summary: Option<RoundSummary>,
}

impl<B: ScoreBoard> Session<B> {
    pub fn new(settings: Settings, seed: u64, board: B) -> Self {
        Self {
            state: GameState::new(&settings, seed),
            board,
            settings,
            input: TickInput::default(),
            summary: None,
        }
    }

    /// Buffer a direction press for the next frame
    pub fn queue_direction(&mut self, dir: Direction) {
        self.input.directions.push(dir);
    }

    pub fn request_start(&mut self) {
        self.input.start = true;
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Idle mode persists across frames and restarts
    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    pub fn is_idle(&self) -> bool {
        self.input.idle_mode
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    /// Run one frame at wall time `now_ms`
    pub fn frame(
        &mut self,
        now_ms: u64,
        renderer: &mut dyn Renderer,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SimError> {
        let result = tick(&mut self.state, &self.input, now_ms);

        // Clear one-shot inputs after processing
        self.input.directions.clear();
        self.input.start = false;
        self.input.pause = false;

        if let Err(e) = &result {
            log::error!("Simulation fault: {}", e);
        }

        if self.state.is_over() && self.summary.is_none() {
            self.settle_round();
        }

        for event in self.state.drain_events() {
            presenter.present(&event);
        }
        renderer.draw(&self.state, now_ms);
        result
    }

    /// Consult the leaderboard for the finished round
    fn settle_round(&mut self) {
        let Some(reason) = self.state.game_over else {
            return;
        };
        let score = self.state.score;
        let rank = if self.board.is_high_score(score) {
            self.board.add_score(score)
        } else {
            None
        };
        if let Some(rank) = rank {
            log::info!("New high score {} (rank {})", score, rank);
            self.state.push_event(GameEvent::NewHighScore { rank });
        }
        self.summary = Some(RoundSummary {
            reason,
            score,
            rank,
            elapsed_ms: self.state.active_ms(),
        });
    }

    /// Fresh round on the same map
    pub fn restart(&mut self, seed: u64) {
        self.state = GameState::new(&self.settings, seed);
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..Default::default()
        };
        self.summary = None;
        log::info!("Round reset with seed {}", seed);
    }
}

/// Serializable view of a frame for external renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub phase: GamePhase,
    pub score: i64,
    pub health: i32,
    pub passes: u32,
    /// `MM:SS` of active time
    pub elapsed: String,
    pub snake: Vec<Position>,
    pub food: FoodView,
    pub obstacles: Vec<Position>,
    pub bombs: Vec<BombView>,
    pub effects: Vec<EffectView>,
    pub sprinting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodView {
    pub pos: Vec2,
    pub kind: FoodKind,
    pub time_remaining_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BombView {
    pub pos: Vec2,
    pub fuse_remaining_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub remaining_ms: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let active = state.clock.active_ms();
        let wall = state.clock.wall_ms();
        Self {
            width: state.bounds.width,
            height: state.bounds.height,
            phase: state.phase,
            score: state.score,
            health: state.snake.health,
            passes: state.passes,
            elapsed: format_elapsed(active),
            snake: state.snake.body.clone(),
            food: FoodView {
                pos: state.food.pos,
                kind: state.food.kind,
                time_remaining_ms: state.food.time_remaining(&state.clock),
            },
            obstacles: state.hazards.obstacles.clone(),
            bombs: state
                .hazards
                .bombs
                .iter()
                .map(|b| BombView {
                    pos: b.pos,
                    fuse_remaining_ms: b.fuse_remaining(active, wall),
                })
                .collect(),
            effects: EffectKind::ALL
                .into_iter()
                .filter(|&kind| state.effects.is_active(kind, active))
                .map(|kind| EffectView {
                    kind,
                    remaining_ms: state.effects.remaining(kind, active),
                })
                .collect(),
            sprinting: state.snake.is_sprinting(),
        }
    }
}

/// Renderer that keeps the latest frame as JSON
#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    pub latest: Option<String>,
    pub frames: u64,
}

impl Renderer for SnapshotRenderer {
    fn draw(&mut self, state: &GameState, _time_ms: u64) {
        match serde_json::to_string(&Snapshot::capture(state)) {
            Ok(json) => self.latest = Some(json),
            Err(e) => log::warn!("Snapshot failed: {}", e),
        }
        self.frames += 1;
    }
}
