//! Idle-mode steering
//!
//! Greedy: head for the food cell along whichever safe axis closes the
//! distance, never reversing and never stepping straight into something
//! fatal. Good enough for an attract screen, not a solver.

use super::grid::{Direction, Position};
use super::state::GameState;

/// Direction the snake should turn to, or `None` to keep the current heading
pub fn steer(state: &GameState) -> Option<Direction> {
    let snake = &state.snake;
    let head = snake.head();
    let target = state.food.cell();
    let ghost = state.effects.is_intangible(state.active_ms());

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| dir != snake.direction.opposite())
        .filter(|&dir| ghost || is_safe(state, head.step(dir)))
        .min_by_key(|&dir| (distance(head.step(dir), target), dir != snake.direction))?;

    (best != snake.next_direction).then_some(best)
}

/// Cell can be entered without dying
fn is_safe(state: &GameState, pos: Position) -> bool {
    if !state.bounds.contains(pos) || state.hazards.has_obstacle(pos) {
        return false;
    }
    // The tail moves out of the way on the same step
    let body = &state.snake.body;
    let solid = &body[..body.len().saturating_sub(1)];
    !solid.contains(&pos)
}

fn distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MapSize, Settings};

    fn playing() -> GameState {
        let mut state = GameState::new(&Settings::for_map(MapSize::Small), 21);
        state.start(0).unwrap();
        state
    }

    #[test]
    fn test_turns_toward_food() {
        let mut state = playing();
        state.snake.body = vec![Position::new(100, 100)];
        state.food.pos = Position::new(100, 300).as_vec2();
        assert_eq!(steer(&state), Some(Direction::Down));
    }

    #[test]
    fn test_keeps_heading_when_already_closing_in() {
        let mut state = playing();
        state.snake.body = vec![Position::new(100, 100)];
        state.food.pos = Position::new(300, 100).as_vec2();
        assert_eq!(steer(&state), None);
    }

    #[test]
    fn test_avoids_wall() {
        let mut state = playing();
        // Top-right corner heading right: only down is survivable
        state.snake.body = vec![Position::new(780, 0), Position::new(760, 0)];
        state.food.pos = Position::new(780, 0).as_vec2();
        assert_eq!(steer(&state), Some(Direction::Down));
    }

    #[test]
    fn test_avoids_obstacle() {
        let mut state = playing();
        state.snake.body = vec![Position::new(100, 100)];
        state.food.pos = Position::new(300, 100).as_vec2();
        state.hazards.obstacles.push(Position::new(120, 100));
        let dir = steer(&state);
        assert!(matches!(dir, Some(Direction::Up) | Some(Direction::Down)));
    }

    #[test]
    fn test_never_suggests_reversal() {
        let mut state = playing();
        state.snake.body = vec![Position::new(300, 100)];
        state.food.pos = Position::new(100, 100).as_vec2();
        assert_ne!(steer(&state), Some(Direction::Left));
    }
}
