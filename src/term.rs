use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use crossterm::style::{self, Color as TermColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use log::warn;

use crate::board::{self, Position, HEIGHT, WIDTH};
use crate::display::{Color, DisplaySink, Grid};
use crate::input::{InputEvent, InputSource};

const CELL: &str = "\u{2588}\u{2588}";
const CELL_WIDTH: u16 = 2;
const HINT: &str = "arrows/WASD move, Enter/Esc/q quit";

/// Draws the matrix in the middle of the terminal, one cell per two columns.
///
/// Once `setup` has started, the terminal is put back on `restore` or, failing
/// that, when the manager is dropped.
pub struct TermManager {
    stdout: Stdout,
    origin: (u16, u16),
    shown: Option<Grid>,
    active: bool,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let matrix_w = WIDTH as u16 * CELL_WIDTH + 2;
        let matrix_h = HEIGHT as u16 + 2;
        let origin = (
            width.saturating_sub(matrix_w) / 2,
            height.saturating_sub(matrix_h + 1) / 2,
        );
        Ok(TermManager { stdout: stdout(), origin, shown: None, active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leaves raw mode and the alternate screen. Does nothing if `setup`
    /// never ran or the terminal was already restored.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let (ox, oy) = self.origin;
        let inner = WIDTH as u16 * CELL_WIDTH;
        let edge = format!("+{}+", "-".repeat(inner as usize));

        queue!(self.stdout, cursor::MoveTo(ox, oy), style::Print(&edge))?;
        for row in 1..=HEIGHT as u16 {
            queue!(
                self.stdout,
                cursor::MoveTo(ox, oy + row),
                style::Print('|'),
                cursor::MoveTo(ox + inner + 1, oy + row),
                style::Print('|')
            )?;
        }
        queue!(
            self.stdout,
            cursor::MoveTo(ox, oy + HEIGHT as u16 + 1),
            style::Print(&edge),
            cursor::MoveTo(ox, oy + HEIGHT as u16 + 2),
            style::Print(HINT)
        )?;
        self.stdout.flush()
    }

    fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        let (ox, oy) = self.origin;

        for pos in board::cells() {
            let color = grid.get(pos).unwrap_or_default();
            let unchanged = self.shown.and_then(|shown| shown.get(pos)) == Some(color);
            if unchanged {
                continue;
            }

            let (x, y) = screen_cell(pos);
            queue!(self.stdout, cursor::MoveTo(ox + 1 + x, oy + 1 + y))?;
            if color.is_blank() {
                queue!(self.stdout, style::Print("  "))?;
            } else {
                queue!(self.stdout, style::SetForegroundColor(term_color(color)), style::Print(CELL))?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        self.shown = Some(*grid);
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("failed to restore terminal: {}", err);
        }
    }
}

impl DisplaySink for TermManager {
    fn present(&mut self, grid: &Grid) {
        if let Err(err) = self.draw(grid) {
            warn!("failed to draw frame: {}", err);
            // Force a full redraw next time.
            self.shown = None;
        }
    }
}

/// Reads pending key presses from the terminal without waiting.
#[derive(Default)]
pub struct Keyboard;

impl InputSource for Keyboard {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = vec![];

        loop {
            match poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    warn!("failed to poll terminal events: {}", err);
                    break;
                }
            }

            match read() {
                Ok(Event::Key(ev)) => events.extend(map_key(&ev)),
                Ok(_) => {}
                Err(err) => {
                    warn!("failed to read terminal event: {}", err);
                    break;
                }
            }
        }

        events
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Right),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        _ => None,
    }
}

fn screen_cell(pos: Position) -> (u16, u16) {
    (pos.x as u16 * CELL_WIDTH, pos.y as u16)
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb();
    TermColor::Rgb { r, g, b }
}
