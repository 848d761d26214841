use crate::board::{Position, CELLS};

/// A pixel in the 16-bit RGB565 layout used by the Sense HAT framebuffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const WHITE: Color = Color(0xFFFF);

    /// Expands to 8 bits per channel, replicating the high bits into the low ones.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    pub fn is_blank(self) -> bool {
        self == Color::BLACK
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Color; CELLS],
}

impl Grid {
    pub fn blank() -> Self {
        Grid::filled(Color::BLACK)
    }

    pub fn filled(color: Color) -> Self {
        Grid { cells: [color; CELLS] }
    }

    /// Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, color: Color) {
        if let Some(i) = pos.index() {
            self.cells[i] = color;
        }
    }

    pub fn get(&self, pos: Position) -> Option<Color> {
        pos.index().map(|i| self.cells[i])
    }

    /// The 64 values in the order a framebuffer expects them.
    pub fn words(&self) -> impl Iterator<Item = Color> + '_ {
        self.cells.iter().copied()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::blank()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub apple: Color,
    pub body: Color,
    pub head: Color,
    pub blank: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette { apple: Color::RED, body: Color::GREEN, head: Color::BLUE, blank: Color::BLACK }
    }
}

/// Anything that can show an 8x8 frame.
pub trait DisplaySink {
    fn present(&mut self, grid: &Grid);

    fn clear(&mut self) {
        self.present(&Grid::blank());
    }
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn present(&mut self, grid: &Grid) {
        (**self).present(grid);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
