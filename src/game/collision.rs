use super::geometry::Grid;
use super::state::Snake;

/// Outcome of checking the snake after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionVerdict {
    None,
    /// Head left the grid
    Wall,
    /// Head ran into the body
    SelfCollision,
}

impl CollisionVerdict {
    pub fn is_collision(&self) -> bool {
        !matches!(self, CollisionVerdict::None)
    }
}

/// Wall is checked before self so the verdict is deterministic.
pub fn detect(snake: &Snake, grid: &Grid) -> CollisionVerdict {
    let head = snake.head();

    if !grid.is_in_bounds(head) {
        return CollisionVerdict::Wall;
    }

    if snake.body().any(|segment| segment == head) {
        return CollisionVerdict::SelfCollision;
    }

    CollisionVerdict::None
}
