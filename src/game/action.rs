use serde::{Deserialize, Serialize};

/// Direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Current direction of travel. `Neutral` until the first directional input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    #[default]
    Neutral,
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Heading::Neutral => None,
            Heading::Up => Some(Direction::Up),
            Heading::Down => Some(Direction::Down),
            Heading::Left => Some(Direction::Left),
            Heading::Right => Some(Direction::Right),
        }
    }

    /// Whether `requested` may replace this heading.
    ///
    /// Any direction is accepted from `Neutral`; afterwards the reverse of the
    /// axis the snake is moving along is refused.
    pub fn accepts(&self, requested: Direction) -> bool {
        match self.direction() {
            None => true,
            Some(current) => !current.is_opposite(requested),
        }
    }

    /// Returns the delta (dx, dy) applied per step, zero while neutral
    pub fn delta(&self) -> (i32, i32) {
        self.direction().map(|d| d.delta()).unwrap_or((0, 0))
    }
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Heading::Up,
            Direction::Down => Heading::Down,
            Direction::Left => Heading::Left,
            Direction::Right => Heading::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_neutral_accepts_everything() {
        let heading = Heading::Neutral;
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(heading.accepts(direction));
        }
        assert_eq!(heading.delta(), (0, 0));
    }

    #[test]
    fn test_moving_heading_refuses_reversal() {
        let heading = Heading::from(Direction::Right);
        assert!(!heading.accepts(Direction::Left));
        assert!(heading.accepts(Direction::Up));
        assert!(heading.accepts(Direction::Down));
        assert!(heading.accepts(Direction::Right));
    }
}
