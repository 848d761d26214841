pub type Coord = i8;

pub const WIDTH: Coord = 8;
pub const HEIGHT: Coord = 8;
pub const CELLS: usize = WIDTH as usize * HEIGHT as usize;

/// Where a fresh snake is placed after every reset.
pub const START: Position = Position { x: 2, y: 3 };

/// A cell on the matrix. Coordinates are signed so that a head which walked
/// off an edge can still be represented and caught as a collision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        in_bounds(self.x, self.y)
    }

    pub fn offset(&self, dx: Coord, dy: Coord) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// Row-major index into an 8x8 buffer, if the position is on the board.
    pub fn index(&self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * WIDTH as usize + self.x as usize)
        } else {
            None
        }
    }
}

pub fn in_bounds(x: Coord, y: Coord) -> bool {
    (0..WIDTH).contains(&x) && (0..HEIGHT).contains(&y)
}

pub fn cells() -> impl Iterator<Item = Position> {
    (0..HEIGHT).flat_map(|y| (0..WIDTH).map(move |x| Position::new(x, y)))
}
