//! Snake Rush - A grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, effects, game state)
//! - `game`: Frame driver that wires the simulation to its collaborators
//! - `platform`: Boundary traits for rendering, scores and presentation
//! - `settings`: Map size and gameplay preferences
//! - `highscores`: Top-5 leaderboard

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{RoundSummary, Session, Snapshot};
pub use highscores::Leaderboard;
pub use settings::{MapSize, Settings, SpeedProfile};

/// Game configuration constants (all times in milliseconds)
pub mod consts {
    /// Size of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;

    /// Snake health bounds
    pub const MAX_HEALTH: i32 = 100;
    /// Score needed for each tail segment
    pub const POINTS_PER_SEGMENT: i64 = 40;

    /// Sprint triggered by a double press
    pub const SPRINT_DURATION_MS: u64 = 500;
    pub const DOUBLE_PRESS_WINDOW_MS: u64 = 200;

    /// Food lifetime, in active time
    pub const FOOD_TIME_LIMIT_MS: u64 = 7_000;
    /// A special item is forced once this much active time passes without one
    pub const SPECIAL_ITEM_INTERVAL_MS: u64 = 15_000;
    /// Chance of a special item on an ordinary spawn
    pub const SPECIAL_ITEM_CHANCE: f64 = 0.15;
    /// Random placement attempts per grid cell before scanning for a free one
    pub const SPAWN_ATTEMPTS_PER_CELL: usize = 4;

    /// Timed effects (double score, ghost, magnetic)
    pub const EFFECT_DURATION_MS: u64 = 15_000;
    /// Magnetic pull reaches food closer than this (pixels)
    pub const MAGNET_RADIUS: f32 = 100.0;
    /// Magnetic pull per tick (pixels)
    pub const MAGNET_STEP: f32 = 2.0;

    /// Bombs
    pub const BOMB_INTERVAL_MS: u64 = 20_000;
    pub const BOMB_FUSE_MS: u64 = 3_000;
    /// Side of the square blast box anchored at the bomb (pixels)
    pub const BOMB_BLAST_SIZE: f32 = 4.0;

    /// Passes at round start
    pub const STARTING_PASSES: u32 = 3;
}

/// Format active round time as `MM:SS` for the HUD timer
pub fn format_elapsed(active_ms: u64) -> String {
    let seconds = active_ms / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// WASM start hook: logging and panic reporting
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Snake Rush core loaded");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59_999), "00:59");
        assert_eq!(format_elapsed(61_000), "01:01");
        assert_eq!(format_elapsed(600_000), "10:00");
    }
}
