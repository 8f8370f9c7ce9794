//! The player's snake
//!
//! Owns the body, heading, speed and health. Moves one cell per step once
//! enough active time has passed; growth is driven by score through
//! `sync_length_to_score`, never by the step itself.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionOutcome, clamp_inside, wall_breach};
use super::grid::{Bounds, Direction, Position};
use super::state::GameOverReason;
use crate::consts::*;
use crate::settings::SpeedProfile;

/// Snake lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    /// Waiting for the round to start
    Idle,
    Moving,
    Dead,
}

/// Temporary speed boost from a double press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Active time the boost ends
    pub until: u64,
    /// Speed to return to
    pub restore_speed: u64,
}

/// What a direction press did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnResult {
    /// Queued (false for a 180° reversal)
    pub accepted: bool,
    /// Heading changed before the next step
    pub immediate: bool,
    pub sprint_started: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first
    pub body: Vec<Position>,
    pub direction: Direction,
    pub next_direction: Direction,
    pub health: i32,
    /// Milliseconds per step (lower = faster)
    pub speed: u64,
    pub phase: SnakePhase,
    pub sprint: Option<Sprint>,
    profile: SpeedProfile,
    double_press_window_ms: u64,
    last_step_at: Option<u64>,
    last_press: Option<(Direction, u64)>,
}

impl Snake {
    /// New single-segment snake in the middle of the map, facing right
    pub fn new(bounds: &Bounds, profile: SpeedProfile, double_press_window_ms: u64) -> Self {
        Self {
            body: vec![bounds.center_cell()],
            direction: Direction::Right,
            next_direction: Direction::Right,
            health: MAX_HEALTH,
            speed: profile.base.max(profile.max),
            phase: SnakePhase::Idle,
            sprint: None,
            profile,
            double_press_window_ms,
            last_step_at: None,
            last_press: None,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprint.is_some()
    }

    /// Leave `Idle`; the next `step` call only records the reference time
    pub fn start_moving(&mut self) {
        if self.phase == SnakePhase::Idle {
            self.phase = SnakePhase::Moving;
            self.last_step_at = None;
        }
    }

    /// Terminal: no further steps or turns
    pub fn kill(&mut self) {
        self.phase = SnakePhase::Dead;
        if let Some(sprint) = self.sprint.take() {
            self.speed = sprint.restore_speed;
        }
    }

    /// Advance one cell if `speed` ms of active time passed since the last step
    pub fn step(&mut self, now: u64) -> bool {
        if self.phase != SnakePhase::Moving {
            return false;
        }
        let Some(last) = self.last_step_at else {
            self.last_step_at = Some(now);
            return false;
        };
        if now.saturating_sub(last) < self.speed {
            return false;
        }

        let head = self.head().step(self.direction);
        self.body.insert(0, head);
        self.body.pop();
        self.last_step_at = Some(now);
        self.direction = self.next_direction;
        true
    }

    /// Queue a turn; reversals are ignored, safe turns apply at once
    pub fn set_direction(&mut self, dir: Direction, now: u64) -> TurnResult {
        let mut result = TurnResult::default();
        if self.phase == SnakePhase::Dead {
            return result;
        }

        if dir != self.direction.opposite() {
            self.next_direction = dir;
            result.accepted = true;
            if self.can_turn_now(dir) {
                self.direction = dir;
                result.immediate = true;
            }
        }

        if let Some((last_dir, at)) = self.last_press {
            if last_dir == dir && now.saturating_sub(at) < self.double_press_window_ms {
                self.start_sprint(now);
                result.sprint_started = true;
            }
        }
        self.last_press = Some((dir, now));

        result
    }

    /// Turning now must not put the next head on the neck
    fn can_turn_now(&self, dir: Direction) -> bool {
        match self.body.get(1) {
            Some(&neck) => self.head().step(dir) != neck,
            None => true,
        }
    }

    fn start_sprint(&mut self, now: u64) {
        let restore_speed = match self.sprint {
            Some(sprint) => sprint.restore_speed,
            None => self.speed,
        };
        self.speed = self.profile.sprint.max(self.profile.max);
        self.sprint = Some(Sprint {
            until: now + SPRINT_DURATION_MS,
            restore_speed,
        });
        log::debug!("Sprint until {}ms", now + SPRINT_DURATION_MS);
    }

    /// Drop the sprint boost once its deadline passes. Returns true on revert.
    pub fn update_sprint(&mut self, now: u64) -> bool {
        match self.sprint {
            Some(sprint) if now >= sprint.until => {
                self.speed = sprint.restore_speed;
                self.sprint = None;
                true
            }
            _ => false,
        }
    }

    /// Resolve walls then self. Ghosts bounce off walls and pass through themselves.
    pub fn resolve_collision(&mut self, bounds: &Bounds, intangible: bool) -> CollisionOutcome {
        let head = self.head();

        if let Some(wall) = wall_breach(head, bounds) {
            if !intangible {
                return CollisionOutcome::Fatal(GameOverReason::Wall);
            }
            self.body[0] = clamp_inside(head, wall, bounds);
            let toward = wall.outward();
            if self.direction == toward {
                self.direction = toward.opposite();
            }
            if self.next_direction == toward {
                self.next_direction = toward.opposite();
            }
            return CollisionOutcome::Bounced(wall);
        }

        if !intangible && self.body[1..].contains(&head) {
            return CollisionOutcome::Fatal(GameOverReason::SelfHit);
        }

        CollisionOutcome::Clear
    }

    /// Grow or shrink until length is `floor(score / POINTS_PER_SEGMENT) + 1`
    pub fn sync_length_to_score(&mut self, score: i64) {
        let target = target_length(score);
        while self.body.len() < target {
            let tail = self.body[self.body.len() - 1];
            self.body.push(tail);
        }
        while self.body.len() > target {
            self.body.pop();
        }
    }

    /// Apply a health change clamped to [0, MAX_HEALTH]; returns the new value
    pub fn apply_health(&mut self, delta: i32) -> i32 {
        self.health = (self.health + delta).clamp(0, MAX_HEALTH);
        self.health
    }
}

/// Body length a score maps to (never below 1)
pub fn target_length(score: i64) -> usize {
    (score.max(0) / POINTS_PER_SEGMENT) as usize + 1
}
