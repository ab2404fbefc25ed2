use std::collections::VecDeque;

use Direction::*;

/// A cell on the grid, as (row, column). Rows grow downwards.
///
/// Coordinates are signed so that a proposed head position can leave the
/// grid before the collision checks reject it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub row: i16,
    pub col: i16,
}

impl Position {
    pub fn new(row: i16, col: i16) -> Self {
        Position { row, col }
    }

    /// The cell one step away in the given direction.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Position { row: self.row + d_row, col: self.col + d_col }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector as (Δrow, Δcol).
    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// The snake body, head first. Never empty.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Builds a horizontal snake with its head at `head` and `length - 1`
    /// segments trailing in the direction opposite to `heading`.
    pub fn new(head: Position, length: i16, heading: Direction) -> Self {
        let (d_row, d_col) = heading.delta();
        let body = (0..length)
            .map(|i| Position::new(head.row - d_row * i, head.col - d_col * i))
            .collect();
        Snake { body }
    }

    pub fn head(&self) -> Position {
        // Construction and advance() both keep the body non-empty
        *self.body.front().unwrap()
    }

    pub fn tail(&self) -> Position {
        *self.body.back().unwrap()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Pushes `new_head` at the front; pops the tail unless `grow`.
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.push_front(new_head);
        if grow { None } else { self.body.pop_back() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_up() {
        for &dir in &[Up, Down, Left, Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dr, dc) = dir.delta();
            let (or, oc) = dir.opposite().delta();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }

    #[test]
    fn new_snake_trails_behind_the_head() {
        let snake = Snake::new(Position::new(10, 25), 3, Right);
        let body: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(10, 25),
                Position::new(10, 24),
                Position::new(10, 23),
            ]
        );
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Right);
        let vacated = snake.advance(Position::new(5, 6), false);
        assert_eq!(vacated, Some(Position::new(5, 3)));
        assert_eq!(snake.head(), Position::new(5, 6));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_with_growth_keeps_the_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Right);
        let vacated = snake.advance(Position::new(5, 6), true);
        assert_eq!(vacated, None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(5, 3));
    }
}
