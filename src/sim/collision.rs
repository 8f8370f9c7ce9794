//! Collision tests for grid entities
//!
//! Everything on the grid is compared by cell; bombs are the exception and
//! use a small pixel box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Bounds, Direction, Position};
use super::state::GameOverReason;
use crate::consts::BOMB_BLAST_SIZE;

/// A side of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Direction that runs into this wall
    pub fn outward(self) -> Direction {
        match self {
            Wall::Left => Direction::Left,
            Wall::Right => Direction::Right,
            Wall::Top => Direction::Up,
            Wall::Bottom => Direction::Down,
        }
    }
}

/// Result of resolving the snake's head after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    /// Ghost head was reflected off a wall
    Bounced(Wall),
    Fatal(GameOverReason),
}

impl CollisionOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CollisionOutcome::Fatal(_))
    }
}

/// Which wall (if any) a cell lies beyond
pub fn wall_breach(pos: Position, bounds: &Bounds) -> Option<Wall> {
    if pos.x < 0 {
        Some(Wall::Left)
    } else if pos.x >= bounds.width {
        Some(Wall::Right)
    } else if pos.y < 0 {
        Some(Wall::Top)
    } else if pos.y >= bounds.height {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Move an out-of-bounds cell back onto the inner edge of `wall`
pub fn clamp_inside(pos: Position, wall: Wall, bounds: &Bounds) -> Position {
    let max = bounds.max_cell();
    match wall {
        Wall::Left => Position::new(0, pos.y),
        Wall::Right => Position::new(max.x, pos.y),
        Wall::Top => Position::new(pos.x, 0),
        Wall::Bottom => Position::new(pos.x, max.y),
    }
}

/// Head lies within the blast box anchored at the bomb's position
pub fn bomb_blast_hits(bomb: Vec2, head: Position) -> bool {
    let head = head.as_vec2();
    head.x >= bomb.x
        && head.x < bomb.x + BOMB_BLAST_SIZE
        && head.y >= bomb.y
        && head.y < bomb.y + BOMB_BLAST_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_breach_each_side() {
        let bounds = Bounds::new(800, 450);
        assert_eq!(wall_breach(Position::new(-20, 100), &bounds), Some(Wall::Left));
        assert_eq!(wall_breach(Position::new(800, 100), &bounds), Some(Wall::Right));
        assert_eq!(wall_breach(Position::new(100, -20), &bounds), Some(Wall::Top));
        assert_eq!(wall_breach(Position::new(100, 460), &bounds), Some(Wall::Bottom));
        // Partial bottom row is still inside
        assert_eq!(wall_breach(Position::new(100, 440), &bounds), None);
    }

    #[test]
    fn test_clamp_inside_lands_on_edge_cell() {
        let bounds = Bounds::new(800, 450);
        assert_eq!(
            clamp_inside(Position::new(800, 100), Wall::Right, &bounds),
            Position::new(780, 100)
        );
        assert_eq!(
            clamp_inside(Position::new(100, 460), Wall::Bottom, &bounds),
            Position::new(100, 440)
        );
        assert_eq!(
            clamp_inside(Position::new(-20, 60), Wall::Left, &bounds),
            Position::new(0, 60)
        );
    }

    #[test]
    fn test_bomb_blast_box() {
        let bomb = Vec2::new(100.0, 200.0);
        assert!(bomb_blast_hits(bomb, Position::new(100, 200)));
        assert!(!bomb_blast_hits(bomb, Position::new(120, 200)));
        assert!(bomb_blast_hits(Vec2::new(97.0, 197.0), Position::new(100, 200)));
        assert!(!bomb_blast_hits(Vec2::new(96.0, 200.0), Position::new(100, 200)));
    }
}
