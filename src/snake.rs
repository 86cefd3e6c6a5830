use std::collections::VecDeque;

use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that has stepped off the board is still
/// representable for the wall check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside an N×N board.
    #[must_use]
    pub fn is_within_bounds(self, grid_size: u16) -> bool {
        let size = i32::from(grid_size);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Snake body plus its in-effect and pending directions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` unless the body is non-empty, free of duplicates and
    /// edge-connected, and `direction` does not point back into the neck.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        let (&head, rest) = segments.split_first()?;

        let connected = segments.windows(2).all(|pair| {
            (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs() == 1
        });
        let distinct = segments
            .iter()
            .enumerate()
            .all(|(idx, segment)| !segments[idx + 1..].contains(segment));
        let faces_away = rest.first() != Some(&head.step(direction));

        if !(connected && distinct && faces_away) {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        })
    }

    /// Records `direction` for the next tick unless it reverses the current one.
    ///
    /// Returns whether the request was accepted. Later accepted requests
    /// overwrite earlier ones; only one turn is applied per tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Makes the pending direction the in-effect one and returns the head
    /// position it leads to.
    pub fn turn_and_peek(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.head().step(self.direction)
    }

    /// Returns true if moving the head onto `next_head` would hit the body.
    ///
    /// When the snake is not growing this tick, the tail cell is about to be
    /// vacated and does not count.
    #[must_use]
    pub fn would_collide(&self, next_head: Position, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        self.body.iter().take(checked).any(|segment| *segment == next_head)
    }

    /// Pushes a new head; drops the tail unless `grow` is set.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the in-effect movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next tick will adopt.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn step_moves_one_cell_along_the_axis() {
        let origin = Position::new(5, 5);

        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn bounds_check_covers_both_axes() {
        assert!(Position::new(0, 0).is_within_bounds(20));
        assert!(Position::new(19, 19).is_within_bounds(20));
        assert!(!Position::new(20, 3).is_within_bounds(20));
        assert!(!Position::new(3, -1).is_within_bounds(20));
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

        let next = snake.turn_and_peek();
        snake.advance(next, false);

        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

        let next = snake.turn_and_peek();
        snake.advance(next, true);

        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![Position::new(6, 5), Position::new(5, 5)]
        );
    }

    #[test]
    fn reversal_request_is_rejected() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up);

        assert!(!snake.request_direction(Direction::Down));
        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn last_valid_request_wins() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

        assert!(snake.request_direction(Direction::Up));
        assert!(snake.request_direction(Direction::Down));
        // Left still reverses the in-effect direction, not the pending one.
        assert!(!snake.request_direction(Direction::Left));

        assert_eq!(snake.pending_direction(), Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn vacating_tail_is_not_a_collision() {
        // Square loop: head at (2,2), tail at (2,3) directly below it.
        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 3),
            ],
            Direction::Left,
        )
        .expect("square loop is a valid body");

        assert!(!snake.would_collide(Position::new(2, 3), false));
        assert!(snake.would_collide(Position::new(2, 3), true));
        assert!(snake.would_collide(Position::new(3, 3), false));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());

        let duplicate = vec![
            Position::new(2, 2),
            Position::new(2, 2),
            Position::new(3, 2),
        ];
        assert!(Snake::from_segments(duplicate, Direction::Left).is_none());

        let gap = vec![Position::new(2, 2), Position::new(4, 2)];
        assert!(Snake::from_segments(gap, Direction::Left).is_none());

        let diagonal = vec![Position::new(2, 2), Position::new(3, 3)];
        assert!(Snake::from_segments(diagonal, Direction::Left).is_none());
    }

    #[test]
    fn heading_into_the_neck_is_rejected() {
        let body = vec![Position::new(2, 2), Position::new(3, 2)];

        assert!(Snake::from_segments(body.clone(), Direction::Right).is_none());
        assert!(Snake::from_segments(body, Direction::Up).is_some());
    }
}
