use std::{collections::TryReserveError, fmt, thread::sleep, time::Duration};

use log::{debug, error, info, warn};
use rand::rngs::StdRng;

use crate::apple::Apple;
use crate::board::{Position, START};
use crate::display::{DisplaySink, Grid, Palette};
use crate::input::{InputEvent, InputSource};
use crate::snake::{Snake, Step};

pub const DEFAULT_TICK: Duration = Duration::from_millis(250);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Stopped,
}

#[derive(Debug)]
pub enum GameError {
    /// No memory for another body segment.
    Grow(TryReserveError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Grow(err) => write!(f, "could not grow the snake: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Grow(err) => Some(err),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub apples_eaten: u32,
    pub best_length: usize,
    pub resets: u32,
}

/// Everything one game needs. Independent instances don't share anything.
pub struct GameState {
    snake: Snake,
    apple: Apple,
    status: Status,
    stats: Stats,
    rng: StdRng,
    #[cfg(test)]
    refuse_growth: bool,
}

impl GameState {
    pub fn new(mut rng: StdRng) -> Self {
        let snake = Snake::new(START);
        let mut apple = Apple::at(START);
        let placed = apple.relocate(&snake, &mut rng);
        debug_assert!(placed);

        let stats = Stats { best_length: snake.len(), ..Stats::default() };
        GameState {
            snake,
            apple,
            status: Status::Running,
            stats,
            rng,
            #[cfg(test)]
            refuse_growth: false,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Position {
        self.apple.position()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn stop(&mut self) {
        self.status = Status::Stopped;
    }

    /// Puts the apple on `pos` if that cell is on the board and free.
    pub fn place_apple(&mut self, pos: Position) -> bool {
        if !pos.in_bounds() || self.snake.contains(pos) {
            return false;
        }
        self.apple = Apple::at(pos);
        true
    }

    /// Back to a single still segment at the start cell with a fresh apple.
    pub fn reset(&mut self) {
        self.stats.resets += 1;
        self.snake = Snake::new(START);
        let placed = self.apple.relocate(&self.snake, &mut self.rng);
        debug_assert!(placed);
    }

    #[cfg(not(test))]
    fn grow(&mut self) -> Result<(), TryReserveError> {
        self.snake.grow_at_tail()
    }

    #[cfg(test)]
    fn grow(&mut self) -> Result<(), TryReserveError> {
        if self.refuse_growth {
            return Vec::<u8>::new().try_reserve(usize::MAX);
        }
        self.snake.grow_at_tail()
    }

    fn eat_apple(&mut self) -> Result<(), GameError> {
        self.grow().map_err(GameError::Grow)?;
        self.stats.apples_eaten += 1;
        self.stats.best_length = self.stats.best_length.max(self.snake.len());
        debug!("apple eaten at {:?}, length now {}", self.apple.position(), self.snake.len());

        if !self.apple.relocate(&self.snake, &mut self.rng) {
            info!("board filled at length {}, starting over", self.snake.len());
            self.reset();
        }
        Ok(())
    }
}

/// Paints apple, body and head onto an otherwise blank frame.
pub fn render(state: &GameState, palette: &Palette) -> Grid {
    let mut grid = Grid::filled(palette.blank);
    grid.set(state.apple(), palette.apple);
    for pos in state.snake.segments() {
        grid.set(*pos, palette.body);
    }
    grid.set(state.snake.head(), palette.head);
    grid
}

pub struct GameLoop<I: InputSource, D: DisplaySink> {
    state: GameState,
    input: I,
    display: D,
    palette: Palette,
    tick: Duration,
}

impl<I: InputSource, D: DisplaySink> GameLoop<I, D> {
    pub fn new(state: GameState, input: I, display: D) -> Self {
        GameLoop { state, input, display, palette: Palette::default(), tick: DEFAULT_TICK }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs ticks at a fixed rate until a quit event or a fatal error.
    /// The display is left blank either way.
    pub fn run(&mut self) -> Result<(), GameError> {
        info!("game started, tick every {:?}", self.tick);

        while self.state.is_running() {
            if let Err(err) = self.tick() {
                error!("stopping: {}", err);
                return Err(err);
            }

            if !self.state.is_running() {
                break;
            }
            sleep(self.tick);
        }

        self.display.clear();
        let stats = self.state.stats();
        info!(
            "game stopped: {} apples eaten, best length {}, {} resets",
            stats.apples_eaten, stats.best_length, stats.resets
        );
        Ok(())
    }

    /// One update: drain input, move, resolve collisions, draw.
    ///
    /// On a growth failure the state is stopped and the display cleared
    /// before the error is returned.
    pub fn tick(&mut self) -> Result<(), GameError> {
        if !self.state.is_running() {
            return Ok(());
        }

        for event in self.input.poll_events() {
            match event.heading() {
                Some(heading) => self.state.snake.set_heading(heading),
                None => {
                    debug_assert_eq!(event, InputEvent::Quit);
                    info!("quit requested");
                    self.state.stop();
                    return Ok(());
                }
            }
        }

        if let Step::Moved { new_head, .. } = self.state.snake.advance() {
            let state = &mut self.state;
            if !new_head.in_bounds() || state.snake.head_collides() {
                warn!(
                    "crashed at ({}, {}) with length {}, resetting",
                    new_head.x,
                    new_head.y,
                    state.snake.len()
                );
                state.reset();
            } else if new_head == state.apple.position() {
                if let Err(err) = state.eat_apple() {
                    return self.fail(err);
                }
            }
        }

        let grid = render(&self.state, &self.palette);
        self.display.present(&grid);
        Ok(())
    }

    /// Stops the game and blanks the display before handing `err` back.
    fn fail(&mut self, err: GameError) -> Result<(), GameError> {
        self.state.stop();
        self.display.clear();
        Err(err)
    }
}
