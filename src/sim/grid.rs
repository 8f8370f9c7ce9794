//! Grid coordinates and directions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::SimError;
use crate::consts::{CELL_SIZE, SPAWN_ATTEMPTS_PER_CELL};

/// A grid cell's top-left corner in pixels (multiple of `CELL_SIZE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in the given direction
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx * CELL_SIZE,
            y: self.y + dy * CELL_SIZE,
        }
    }

    /// Cell containing a free (pixel) position
    pub fn containing(pos: Vec2) -> Self {
        let cell = CELL_SIZE as f32;
        Self {
            x: ((pos.x / cell).floor() * cell) as i32,
            y: ((pos.y / cell).floor() * cell) as i32,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in cells
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "w" | "arrowup" => Some(Direction::Up),
            "down" | "s" | "arrowdown" => Some(Direction::Down),
            "left" | "a" | "arrowleft" => Some(Direction::Left),
            "right" | "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Playfield extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn columns(&self) -> i32 {
        self.width / CELL_SIZE
    }

    pub fn rows(&self) -> i32 {
        self.height / CELL_SIZE
    }

    pub fn cell_count(&self) -> usize {
        (self.columns().max(0) * self.rows().max(0)) as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Cell nearest the middle of the map
    pub fn center_cell(&self) -> Position {
        Position::new(
            (self.width / 2 / CELL_SIZE) * CELL_SIZE,
            (self.height / 2 / CELL_SIZE) * CELL_SIZE,
        )
    }

    /// Last in-bounds cell origin on each axis (may be a partial cell)
    pub fn max_cell(&self) -> Position {
        Position::new(
            ((self.width - 1) / CELL_SIZE) * CELL_SIZE,
            ((self.height - 1) / CELL_SIZE) * CELL_SIZE,
        )
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| Position::new(col * CELL_SIZE, row * CELL_SIZE))
        })
    }

    /// Uniformly random cell that `blocked` rejects as free.
    ///
    /// Random attempts are capped; after that the free cells are scanned so a
    /// nearly full board still succeeds and a full one reports an error.
    pub fn random_free_cell(
        &self,
        rng: &mut dyn RandomSource,
        blocked: impl Fn(Position) -> bool,
    ) -> Result<Position, SimError> {
        let cells = self.cell_count();
        if cells == 0 {
            return Err(SimError::BoardSaturated { cells });
        }

        for _ in 0..cells * SPAWN_ATTEMPTS_PER_CELL {
            let col = rng.below(self.columns() as u32) as i32;
            let row = rng.below(self.rows() as u32) as i32;
            let pos = Position::new(col * CELL_SIZE, row * CELL_SIZE);
            if !blocked(pos) {
                return Ok(pos);
            }
        }

        let free: Vec<Position> = self.cells().filter(|&p| !blocked(p)).collect();
        if free.is_empty() {
            log::error!("No free cell left on a {}x{} board", self.columns(), self.rows());
            return Err(SimError::BoardSaturated { cells });
        }
        Ok(free[rng.below(free.len() as u32) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_one_cell() {
        let p = Position::new(100, 100);
        assert_eq!(p.step(Direction::Right), Position::new(120, 100));
        assert_eq!(p.step(Direction::Up), Position::new(100, 80));
    }

    #[test]
    fn test_containing_floors_to_cell() {
        assert_eq!(Position::containing(Vec2::new(119.9, 100.0)), Position::new(100, 100));
        assert_eq!(Position::containing(Vec2::new(-0.5, 0.0)), Position::new(-20, 0));
    }

    #[test]
    fn test_medium_map_geometry() {
        // 675 is not a multiple of 20: the partial last row is in bounds
        // but never used for spawning
        let bounds = Bounds::new(1200, 675);
        assert_eq!(bounds.columns(), 60);
        assert_eq!(bounds.rows(), 33);
        assert_eq!(bounds.center_cell(), Position::new(600, 320));
        assert_eq!(bounds.max_cell(), Position::new(1180, 660));
        assert_eq!(bounds.cells().count(), bounds.cell_count());
    }

    #[test]
    fn test_random_free_cell_scans_when_nearly_full() {
        use crate::sim::random::ScriptedRandom;

        let bounds = Bounds::new(60, 40);
        let free = Position::new(40, 20);
        // Every random draw lands on (0, 0), so only the scan can succeed
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let cell = bounds.random_free_cell(&mut rng, |p| p != free).unwrap();
        assert_eq!(cell, free);

        let full = bounds.random_free_cell(&mut rng, |_| true);
        assert!(matches!(full, Err(SimError::BoardSaturated { cells: 6 })));
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }
}
