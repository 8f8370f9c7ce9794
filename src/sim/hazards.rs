//! Obstacles and bombs
//!
//! Obstacles appear on a map-dependent cadence and stay until the round
//! resets. Bombs appear every `BOMB_INTERVAL_MS` at a random pixel and
//! detonate once after `BOMB_FUSE_MS`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::bomb_blast_hits;
use super::grid::{Bounds, Position};
use super::random::RandomSource;
use crate::consts::*;

/// Which clock a deadline is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerBasis {
    /// Active time (frozen while paused)
    Active,
    /// Wall-clock time (keeps running while paused)
    Wall,
}

impl TimerBasis {
    fn pick(self, active: u64, wall: u64) -> u64 {
        match self {
            TimerBasis::Active => active,
            TimerBasis::Wall => wall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    Armed,
    Exploded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    /// Pixel position (not grid aligned)
    pub pos: Vec2,
    pub state: BombState,
    /// Deadline measured in `basis`
    pub detonates_at: u64,
    pub basis: TimerBasis,
}

impl Bomb {
    /// Time left on the fuse
    pub fn fuse_remaining(&self, active: u64, wall: u64) -> u64 {
        self.detonates_at
            .saturating_sub(self.basis.pick(active, wall))
    }
}

/// A bomb that went off this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detonation {
    pub pos: Vec2,
    /// Head was inside the blast box
    pub hit: bool,
}

/// What the hazard spawner did during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardReport {
    pub obstacle: Option<Position>,
    pub bomb: Option<Vec2>,
    pub detonations: Vec<Detonation>,
}

impl HazardReport {
    pub fn fatal(&self) -> bool {
        self.detonations.iter().any(|d| d.hit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazards {
    pub obstacles: Vec<Position>,
    pub bombs: Vec<Bomb>,
    obstacle_interval_ms: u64,
    /// Cadence reference, snapped to a multiple of the interval
    last_obstacle_at: u64,
    last_bomb_at: u64,
    fuse_basis: TimerBasis,
}

impl Hazards {
    pub fn new(obstacle_interval_ms: u64, fuse_basis: TimerBasis) -> Self {
        Self {
            obstacles: Vec::new(),
            bombs: Vec::new(),
            obstacle_interval_ms: obstacle_interval_ms.max(1),
            last_obstacle_at: 0,
            last_bomb_at: 0,
            fuse_basis,
        }
    }

    pub fn has_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Spawn what is due and detonate expired fuses.
    ///
    /// `active` drives spawn cadence; fuses compare against their own basis.
    /// `blocked` marks cells an obstacle may not take (snake, food). An
    /// obstacle with nowhere to go is skipped until the next slot.
    pub fn advance(
        &mut self,
        rng: &mut dyn RandomSource,
        bounds: &Bounds,
        blocked: impl Fn(Position) -> bool,
        head: Position,
        active: u64,
        wall: u64,
    ) -> HazardReport {
        let mut report = HazardReport::default();

        if active >= self.last_obstacle_at + self.obstacle_interval_ms {
            self.last_obstacle_at = (active / self.obstacle_interval_ms) * self.obstacle_interval_ms;
            let obstacles = &self.obstacles;
            match bounds.random_free_cell(rng, |p| blocked(p) || obstacles.contains(&p)) {
                Ok(pos) => {
                    self.obstacles.push(pos);
                    log::debug!("Obstacle #{} at ({}, {})", self.obstacles.len(), pos.x, pos.y);
                    report.obstacle = Some(pos);
                }
                Err(e) => log::warn!("Obstacle skipped: {}", e),
            }
        }

        if active >= self.last_bomb_at + BOMB_INTERVAL_MS {
            let pos = Vec2::new(
                rng.below(bounds.width.max(1) as u32) as f32,
                rng.below(bounds.height.max(1) as u32) as f32,
            );
            let now = self.fuse_basis.pick(active, wall);
            self.bombs.push(Bomb {
                pos,
                state: BombState::Armed,
                detonates_at: now + BOMB_FUSE_MS,
                basis: self.fuse_basis,
            });
            self.last_bomb_at = (active / BOMB_INTERVAL_MS) * BOMB_INTERVAL_MS;
            log::debug!("Bomb planted at ({}, {})", pos.x, pos.y);
            report.bomb = Some(pos);
        }

        report.detonations = self.detonate(head, active, wall);
        report
    }

    /// Explode every armed bomb whose fuse ran out; each explodes exactly once
    pub fn detonate(&mut self, head: Position, active: u64, wall: u64) -> Vec<Detonation> {
        let mut detonations = Vec::new();
        for bomb in &mut self.bombs {
            if bomb.state == BombState::Armed && bomb.fuse_remaining(active, wall) == 0 {
                bomb.state = BombState::Exploded;
                let hit = bomb_blast_hits(bomb.pos, head);
                log::debug!("Bomb at ({}, {}) exploded (hit: {})", bomb.pos.x, bomb.pos.y, hit);
                detonations.push(Detonation { pos: bomb.pos, hit });
            }
        }
        self.bombs.retain(|b| b.state == BombState::Armed);
        detonations
    }
}
