use rand::Rng;

use crate::board::{self, Position, HEIGHT, WIDTH};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Apple {
    position: Position,
}

impl Apple {
    /// The caller is responsible for keeping `position` off the snake.
    pub(crate) fn at(position: Position) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Rolls random cells until one is not covered by the snake.
    ///
    /// Returns `false` (and leaves the apple where it was) when no free cell
    /// is left, since the sampling loop could never finish in that case.
    pub fn relocate<R: Rng>(&mut self, snake: &Snake, rng: &mut R) -> bool {
        if snake.len() >= board::CELLS {
            return false;
        }

        loop {
            let candidate = Position::new(rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT));
            if !snake.contains(candidate) {
                self.position = candidate;
                return true;
            }
        }
    }
}
