use std::collections::VecDeque;

use super::action::{Direction, Heading};
use super::geometry::Grid;
use super::palette::ColorCycle;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: VecDeque<Cell>,
    heading: Heading,
    pending_growth: bool,
}

impl Snake {
    /// Create a one-segment snake that waits for its first direction
    pub fn new(initial: Cell) -> Self {
        Self {
            segments: VecDeque::from([initial]),
            heading: Heading::Neutral,
            pending_growth: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    /// Segments excluding the head
    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Apply a direction change. Reversals are silently ignored.
    pub fn set_heading(&mut self, requested: Direction) -> bool {
        if self.heading.accepts(requested) {
            self.heading = requested.into();
            true
        } else {
            false
        }
    }

    /// Where the head would land on the next step, if the snake is moving
    pub fn next_head(&self) -> Option<Cell> {
        self.heading.direction().map(|direction| {
            let (dx, dy) = direction.delta();
            self.head().moved_by(dx, dy)
        })
    }

    /// Keep the tail on the next step
    pub fn mark_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Advance one cell along the heading and return the new head.
    ///
    /// Does nothing while the heading is neutral.
    pub fn step(&mut self) -> Option<Cell> {
        let new_head = self.next_head()?;
        self.segments.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.segments.pop_back();
        }

        Some(new_head)
    }

    pub fn reset(&mut self, initial: Cell) {
        *self = Self::new(initial);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (never true: a snake always has a head)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Everything a tick reads and writes, owned as one aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Option<Cell>,
    pub score: u32,
    pub colors: ColorCycle,
    /// Running ticks since the last reset
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state with the snake at the grid center and no food yet
    pub fn new(grid: Grid, colors: ColorCycle) -> Self {
        Self {
            snake: Snake::new(grid.center()),
            grid,
            food: None,
            score: 0,
            colors,
            ticks: 0,
        }
    }

    /// Return snake, score, colors and food to their initial values
    pub fn reset(&mut self) {
        self.snake.reset(self.grid.center());
        self.food = None;
        self.score = 0;
        self.colors.reset();
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::palette::Rgba;

    fn snake_moving(start: Cell, moves: &[Direction]) -> Snake {
        let mut snake = Snake::new(start);
        for &direction in moves {
            snake.set_heading(direction);
            snake.mark_growth();
            snake.step();
        }
        snake
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_by(0, 1), Cell::new(5, 6));
        assert_eq!(cell.moved_by(0, -1), Cell::new(5, 4));
    }

    #[test]
    fn test_neutral_snake_does_not_move() {
        let mut snake = Snake::new(Cell::new(10, 10));
        assert_eq!(snake.next_head(), None);
        assert_eq!(snake.step(), None);
        assert_eq!(snake.head(), Cell::new(10, 10));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_step_without_growth_keeps_length() {
        let mut snake = Snake::new(Cell::new(10, 10));
        snake.set_heading(Direction::Right);

        assert_eq!(snake.step(), Some(Cell::new(11, 10)));
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![Cell::new(11, 10)]);
    }

    #[test]
    fn test_growth_keeps_tail_once() {
        let mut snake = Snake::new(Cell::new(10, 10));
        snake.set_heading(Direction::Right);
        snake.mark_growth();

        snake.step();
        assert_eq!(snake.len(), 2);
        assert!(!snake.has_pending_growth());

        snake.step();
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Cell::new(12, 10), Cell::new(11, 10)]
        );
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = snake_moving(Cell::new(5, 5), &[Direction::Right, Direction::Right]);
        assert!(!snake.set_heading(Direction::Left));
        assert_eq!(snake.heading(), Heading::Right);
        assert_eq!(snake.step(), Some(Cell::new(8, 5)));
    }

    #[test]
    fn test_body_excludes_head() {
        let snake = snake_moving(Cell::new(5, 5), &[Direction::Down, Direction::Down]);
        assert_eq!(snake.head(), Cell::new(5, 7));
        assert_eq!(
            snake.body().collect::<Vec<_>>(),
            vec![Cell::new(5, 6), Cell::new(5, 5)]
        );
        assert!(snake.contains(Cell::new(5, 5)));
        assert!(!snake.contains(Cell::new(6, 5)));
    }

    #[test]
    fn test_state_reset() {
        let grid = Grid::default();
        let mut state = GameState::new(grid, ColorCycle::new(vec![Rgba::WHITE, Rgba::BLACK]));
        state.snake = snake_moving(Cell::new(3, 3), &[Direction::Up]);
        state.food = Some(Cell::new(1, 1));
        state.score = 40;
        state.colors.advance();
        state.ticks = 12;

        state.reset();

        assert_eq!(state.snake, Snake::new(Cell::new(10, 10)));
        assert_eq!(state.food, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.colors.index(), 0);
        assert_eq!(state.ticks, 0);
    }
}
