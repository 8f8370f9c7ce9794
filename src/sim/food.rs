//! Food spawning and expiry
//!
//! Exactly one item is live at a time. Every spawn rolls a category: a
//! special item is forced once `SPECIAL_ITEM_INTERVAL_MS` of active time has
//! passed since the last one, otherwise it is a `SPECIAL_ITEM_CHANCE` roll.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::effects::EffectKind;
use super::grid::{Bounds, Position};
use super::random::{RandomSource, WeightedTable};
use super::state::SimError;
use crate::consts::*;

/// Ordinary food tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularKind {
    /// Spoiled: costs score and health
    Red,
    /// Heals
    Green,
    /// Plain points
    Yellow,
}

impl RegularKind {
    /// Score change before the double-score multiplier
    pub fn score_delta(&self) -> i64 {
        match self {
            RegularKind::Red => -25,
            RegularKind::Green => 5,
            RegularKind::Yellow => 20,
        }
    }

    pub fn health_delta(&self) -> i32 {
        match self {
            RegularKind::Red => -25,
            RegularKind::Green => 20,
            RegularKind::Yellow => 0,
        }
    }
}

/// Power-up items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKind {
    DoubleScore,
    ExtraLife,
    Ghost,
    Magnetic,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 4] = [
        SpecialKind::DoubleScore,
        SpecialKind::ExtraLife,
        SpecialKind::Ghost,
        SpecialKind::Magnetic,
    ];

    /// Timed effect this item starts (extra life is one-shot)
    pub fn effect(&self) -> Option<EffectKind> {
        match self {
            SpecialKind::DoubleScore => Some(EffectKind::DoubleScore),
            SpecialKind::ExtraLife => None,
            SpecialKind::Ghost => Some(EffectKind::Ghost),
            SpecialKind::Magnetic => Some(EffectKind::Magnetic),
        }
    }

    /// Floating text shown on pickup
    pub fn banner(&self) -> &'static str {
        match self {
            SpecialKind::DoubleScore => "2X SCORE!",
            SpecialKind::ExtraLife => "+1 PASS",
            SpecialKind::Ghost => "GHOST MODE!",
            SpecialKind::Magnetic => "MAGNET MODE!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Regular(RegularKind),
    Special(SpecialKind),
}

impl FoodKind {
    pub fn is_special(&self) -> bool {
        matches!(self, FoodKind::Special(_))
    }
}

fn regular_table() -> WeightedTable<RegularKind> {
    WeightedTable::new(vec![
        (0.1, RegularKind::Red),
        (0.1, RegularKind::Green),
        (0.8, RegularKind::Yellow),
    ])
}

fn special_table() -> WeightedTable<SpecialKind> {
    WeightedTable::uniform(&SpecialKind::ALL)
}

/// The live food item plus the spawner bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    /// Pixel position; drifts off-grid under magnetic pull
    pub pos: Vec2,
    pub kind: FoodKind,
    /// Active time of the last spawn
    pub spawned_at: u64,
    pub time_limit: u64,
    /// Active time the last special item appeared
    last_special_at: u64,
}

impl Default for Food {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            kind: FoodKind::Regular(RegularKind::Yellow),
            spawned_at: 0,
            time_limit: FOOD_TIME_LIMIT_MS,
            last_special_at: 0,
        }
    }
}

impl Food {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget special-item history (round reset)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Grid cell the item currently counts as occupying
    pub fn cell(&self) -> Position {
        Position::containing(self.pos)
    }

    pub fn is_special(&self) -> bool {
        self.kind.is_special()
    }

    /// Place a new item on a free cell and roll its category.
    /// `blocked` reports cells the item may not use (snake body, obstacles).
    pub fn spawn(
        &mut self,
        rng: &mut dyn RandomSource,
        bounds: &Bounds,
        blocked: impl Fn(Position) -> bool,
        now: u64,
    ) -> Result<(), SimError> {
        let cell = bounds.random_free_cell(rng, blocked)?;
        self.pos = cell.as_vec2();
        self.kind = self.roll_kind(rng, now);
        self.spawned_at = now;
        log::debug!("Food {:?} at ({}, {})", self.kind, cell.x, cell.y);
        Ok(())
    }

    fn roll_kind(&mut self, rng: &mut dyn RandomSource, now: u64) -> FoodKind {
        let overdue = now.saturating_sub(self.last_special_at) >= SPECIAL_ITEM_INTERVAL_MS;
        if overdue || rng.next_f64() < SPECIAL_ITEM_CHANCE {
            self.last_special_at = now;
            FoodKind::Special(special_table().sample(rng))
        } else {
            FoodKind::Regular(regular_table().sample(rng))
        }
    }

    /// Active time elapsed since the last special item
    pub fn time_since_special(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_special_at)
    }

    /// Never true while the clock is paused
    pub fn is_expired(&self, clock: &SimClock) -> bool {
        !clock.is_paused() && self.time_remaining(clock) == 0
    }

    /// Time left before expiry, frozen while paused
    pub fn time_remaining(&self, clock: &SimClock) -> u64 {
        let alive = clock.active_ms().saturating_sub(self.spawned_at);
        self.time_limit.saturating_sub(alive)
    }

    /// Magnetic pull: step toward `head` when within range. Returns true if moved.
    pub fn attract_toward(&mut self, head: Vec2) -> bool {
        let offset = self.pos - head;
        let distance = offset.length();
        if distance > 0.0 && distance < MAGNET_RADIUS {
            self.pos -= offset / distance * MAGNET_STEP;
            true
        } else {
            false
        }
    }
}
