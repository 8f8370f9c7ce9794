//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DOUBLE_PRESS_WINDOW_MS;

/// Selectable map sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MapSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Movement timings for a map (ms per step, lower = faster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedProfile {
    /// Normal step interval
    pub base: u64,
    /// Step interval while sprinting
    pub sprint: u64,
    /// Fastest allowed step interval
    pub max: u64,
}

impl MapSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapSize::Small => "Small",
            MapSize::Medium => "Medium",
            MapSize::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Some(MapSize::Small),
            "medium" | "med" | "m" => Some(MapSize::Medium),
            "large" | "l" => Some(MapSize::Large),
            _ => None,
        }
    }

    /// Map extent in pixels (width, height)
    pub fn dimensions(&self) -> (i32, i32) {
        match self {
            MapSize::Small => (800, 450),
            MapSize::Medium => (1200, 675),
            MapSize::Large => (1600, 900),
        }
    }

    /// Bigger maps move faster so crossing time stays reasonable
    pub fn speed(&self) -> SpeedProfile {
        match self {
            MapSize::Small => SpeedProfile {
                base: 65,
                sprint: 45,
                max: 40,
            },
            MapSize::Medium => SpeedProfile {
                base: 55,
                sprint: 40,
                max: 35,
            },
            MapSize::Large => SpeedProfile {
                base: 35,
                sprint: 25,
                max: 20,
            },
        }
    }

    /// Active time between obstacle spawns
    pub fn obstacle_interval_ms(&self) -> u64 {
        match self {
            MapSize::Small => 20_000,
            MapSize::Medium => 15_000,
            MapSize::Large => 10_000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Map used for new rounds
    pub map_size: MapSize,

    // === Rules ===
    /// Bomb fuses run on active time (frozen while paused).
    /// When false, fuses burn on wall-clock time like the arcade original.
    #[serde(default = "default_true")]
    pub hazards_respect_pause: bool,
    /// Two presses of the same direction within this window start a sprint
    #[serde(default = "default_double_press_window")]
    pub double_press_window_ms: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all sound cues
    pub muted: bool,
}

fn default_true() -> bool {
    true
}

fn default_double_press_window() -> u64 {
    DOUBLE_PRESS_WINDOW_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_size: MapSize::Medium,

            hazards_respect_pause: true,
            double_press_window_ms: DOUBLE_PRESS_WINDOW_MS,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings for a map size (everything else default)
    pub fn for_map(map_size: MapSize) -> Self {
        Self {
            map_size,
            ..Self::default()
        }
    }

    /// Effective audio volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake_rush_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not persist settings");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
