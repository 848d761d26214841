use std::collections::{TryReserveError, VecDeque};

use crate::board::{Coord, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
    None,
}

impl Heading {
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
            Heading::None => Heading::None,
        }
    }

    fn delta(self) -> (Coord, Coord) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
            Heading::None => (0, 0),
        }
    }
}

pub enum Step {
    Moved { new_head: Position, old_tail: Position },
    Stayed,
}

/// Body segments ordered tail first, head last. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Heading,
    last_moved: Heading,
    old_tail: Position,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::with_capacity(crate::board::CELLS);
        body.push_back(start);
        Snake { body, heading: Heading::None, last_moved: Heading::None, old_tail: start }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Changes the heading unless that would fold the snake back onto itself.
    ///
    /// A request is dropped when it reverses the current heading. It is also
    /// dropped when it reverses the heading of the last step taken, which is
    /// stricter than a plain reverse check: moving Right, then Up followed by
    /// Left before the next step keeps Up, so two quick presses in one tick
    /// cannot turn the snake around.
    pub fn set_heading(&mut self, requested: Heading) {
        if requested == Heading::None {
            return;
        }

        let reverses = |h: Heading| h != Heading::None && requested == h.opposite();
        if reverses(self.heading) || reverses(self.last_moved) {
            return;
        }

        self.heading = requested;
    }

    /// Every segment takes its successor's place and the head moves one cell.
    /// Nothing is clamped; leaving the board is for the caller to detect.
    pub fn advance(&mut self) -> Step {
        if self.heading == Heading::None {
            self.old_tail = self.tail();
            return Step::Stayed;
        }

        let (dx, dy) = self.heading.delta();
        let new_head = self.head().offset(dx, dy);

        self.body.push_back(new_head);
        let old_tail = self.body.pop_front().unwrap_or(new_head);

        self.old_tail = old_tail;
        self.last_moved = self.heading;
        Step::Moved { new_head, old_tail }
    }

    /// Appends a segment where the tail was before the last `advance`.
    pub fn grow_at_tail(&mut self) -> Result<(), TryReserveError> {
        self.body.try_reserve(1)?;
        self.body.push_front(self.old_tail);
        Ok(())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True when the head sits on any other segment.
    pub fn head_collides(&self) -> bool {
        let head = self.head();
        self.body.iter().take(self.body.len() - 1).any(|seg| *seg == head)
    }
}
