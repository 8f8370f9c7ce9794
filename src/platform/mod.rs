//! Platform abstraction layer
//!
//! The simulation never talks to a canvas, speaker or storage directly.
//! Hosts plug these in and `game::Session` drives them once per frame.

use crate::sim::{GameEvent, GameState};

/// Draws the current frame
pub trait Renderer {
    /// `time_ms` is the host's wall clock reading, for animation only
    fn draw(&mut self, state: &GameState, time_ms: u64);
}

/// High-score storage, consulted once when a round ends
pub trait ScoreBoard {
    fn is_high_score(&self, score: i64) -> bool;
    /// Record `score` and return its 1-based rank
    fn add_score(&mut self, score: i64) -> Option<usize>;
}

/// Consumes presentation events (HUD, floating text, sound)
pub trait Presenter {
    fn present(&mut self, event: &GameEvent);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &GameState, _time_ms: u64) {}
}

/// Presenter that forwards events to the log
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { reason, score } => {
                log::info!("Game over: {} (score {})", reason.message(), score)
            }
            GameEvent::FloatingText { text, pos } => {
                log::debug!("\"{}\" at ({}, {})", text, pos.x, pos.y)
            }
            other => log::trace!("{:?}", other),
        }
    }
}
