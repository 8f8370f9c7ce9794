//! Active-time clock with pause/resume
//!
//! The host feeds wall-clock readings (ms, e.g. `performance.now()`); every
//! gameplay timer reads active time, which excludes all paused spans.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Wall time the round started at (None until started)
    origin_ms: Option<u64>,
    /// Latest wall reading
    wall_ms: u64,
    /// Wall time the current pause began
    paused_at: Option<u64>,
    /// Sum of all completed pauses
    total_paused_ms: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting active time from `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.origin_ms = Some(now_ms);
        self.wall_ms = now_ms;
        self.paused_at = None;
        self.total_paused_ms = 0;
    }

    pub fn is_started(&self) -> bool {
        self.origin_ms.is_some()
    }

    /// Record a wall reading; readings that go backwards are ignored
    pub fn sync(&mut self, now_ms: u64) {
        self.wall_ms = self.wall_ms.max(now_ms);
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.sync(now_ms);
        if self.paused_at.is_none() {
            self.paused_at = Some(self.wall_ms);
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.sync(now_ms);
        if let Some(start) = self.paused_at.take() {
            self.total_paused_ms += self.wall_ms - start;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn wall_ms(&self) -> u64 {
        self.wall_ms
    }

    /// Active time since start; frozen while paused
    pub fn active_ms(&self) -> u64 {
        let Some(origin) = self.origin_ms else {
            return 0;
        };
        let now = self.paused_at.unwrap_or(self.wall_ms);
        now.saturating_sub(origin)
            .saturating_sub(self.total_paused_ms)
    }
}
