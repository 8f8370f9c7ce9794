//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time comes in through `tick` only
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod food;
pub mod grid;
pub mod hazards;
pub mod random;
pub mod snake;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::{CollisionOutcome, Wall};
pub use effects::{ActiveEffects, EffectKind};
pub use food::{Food, FoodKind, RegularKind, SpecialKind};
pub use grid::{Bounds, Direction, Position};
pub use hazards::{Bomb, BombState, Hazards, TimerBasis};
pub use random::{RandomSource, WeightedTable};
pub use snake::{Snake, SnakePhase};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState, SimError};
pub use tick::{TickInput, tick};
