use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};

use sense_snake::board::START;
use sense_snake::display::{Color, DisplaySink, Grid, Palette};
use sense_snake::game::{GameLoop, GameState, Status};
use sense_snake::input::{InputEvent, InputSource};
use sense_snake::snake::Heading;
use sense_snake::Position;

#[derive(Default)]
struct Script {
    ticks: VecDeque<Vec<InputEvent>>,
}

impl Script {
    fn new(ticks: Vec<Vec<InputEvent>>) -> Self {
        Script { ticks: ticks.into() }
    }
}

impl InputSource for Script {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.ticks.pop_front().unwrap_or_default()
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<Grid>,
}

impl DisplaySink for Recorder {
    fn present(&mut self, grid: &Grid) {
        self.frames.push(*grid);
    }
}

fn new_game(seed: u64, ticks: Vec<Vec<InputEvent>>) -> GameLoop<Script, Recorder> {
    let state = GameState::new(StdRng::seed_from_u64(seed));
    GameLoop::new(state, Script::new(ticks), Recorder::default())
}

#[test]
fn crossing_the_right_wall_resets_the_snake() {
    let mut ticks = vec![vec![InputEvent::Right]];
    ticks.extend(vec![vec![]; 4]);
    ticks.push(vec![InputEvent::Down]);
    ticks.extend(vec![vec![]; 3]);
    ticks.push(vec![InputEvent::Right]);

    let mut game = new_game(1, ticks);
    assert!(game.state_mut().place_apple(Position::new(0, 0)));

    for _ in 0..9 {
        game.tick().unwrap();
    }
    assert_eq!(game.state().snake().head(), Position::new(7, 7));

    game.tick().unwrap();
    let snake = game.state().snake();
    assert_eq!(snake.len(), 1);
    assert_eq!(snake.head(), START);
    assert_eq!(snake.heading(), Heading::None);
    assert_eq!(game.state().stats().resets, 1);
}

#[test]
fn eating_an_apple_at_4_4() {
    let ticks = vec![vec![InputEvent::Down], vec![InputEvent::Right], vec![]];
    let mut game = new_game(2, ticks);
    assert!(game.state_mut().place_apple(Position::new(4, 4)));

    game.tick().unwrap();
    game.tick().unwrap();
    assert_eq!(game.state().snake().len(), 1);

    game.tick().unwrap();
    let state = game.state();
    assert_eq!(state.snake().head(), Position::new(4, 4));
    assert_eq!(state.snake().len(), 2);
    assert_eq!(state.snake().tail(), Position::new(3, 4));
    assert_ne!(state.apple(), Position::new(4, 4));
    assert!(!state.snake().contains(state.apple()));
}

#[test]
fn empty_polls_change_nothing() {
    let mut game = new_game(3, vec![]);
    let head = game.state().snake().head();
    let apple = game.state().apple();
    let stats = game.state().stats();

    for _ in 0..5 {
        game.tick().unwrap();
    }

    assert_eq!(game.state().snake().head(), head);
    assert_eq!(game.state().apple(), apple);
    assert_eq!(game.state().stats(), stats);
    assert_eq!(game.state().status(), Status::Running);

    let frames = &game.display().frames;
    assert_eq!(frames.len(), 5);
    assert!(frames.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn reversing_is_ignored_by_the_loop() {
    let ticks = vec![vec![InputEvent::Up], vec![InputEvent::Down]];
    let mut game = new_game(4, ticks);
    assert!(game.state_mut().place_apple(Position::new(7, 7)));

    game.tick().unwrap();
    game.tick().unwrap();

    assert_eq!(game.state().snake().heading(), Heading::Up);
    assert_eq!(game.state().snake().head(), Position::new(2, 1));
}

#[test]
fn quit_stops_the_loop_and_blanks_the_display() {
    let ticks = vec![vec![InputEvent::Left], vec![InputEvent::Quit]];
    let mut game = new_game(5, ticks).with_tick(std::time::Duration::from_millis(1));
    assert!(game.state_mut().place_apple(Position::new(7, 0)));

    game.run().unwrap();

    assert_eq!(game.state().status(), Status::Stopped);
    let frames = &game.display().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames.last(), Some(&Grid::blank()));

    // Further ticks are no-ops once stopped.
    game.tick().unwrap();
    assert_eq!(game.display().frames.len(), 2);
}

#[test]
fn palette_decides_the_frame_colors() {
    let palette = Palette { apple: Color::WHITE, body: Color::RED, head: Color::GREEN, blank: Color::BLACK };
    let mut game = new_game(6, vec![vec![InputEvent::Right]]).with_palette(palette);
    assert!(game.state_mut().place_apple(Position::new(3, 3)));

    game.tick().unwrap();

    let frame = game.display().frames[0];
    assert_eq!(frame.get(Position::new(3, 3)), Some(Color::GREEN));
    assert_eq!(frame.get(START), Some(Color::RED));
    assert_eq!(frame.get(game.state().apple()), Some(Color::WHITE));
}

#[test]
fn random_play_keeps_the_invariants() {
    let mut driver = StdRng::seed_from_u64(99);
    let ticks: Vec<Vec<InputEvent>> = (0..3_000)
        .map(|_| {
            if driver.gen_bool(0.3) {
                let pick = [InputEvent::Up, InputEvent::Down, InputEvent::Left, InputEvent::Right];
                vec![pick[driver.gen_range(0..pick.len())]]
            } else {
                vec![]
            }
        })
        .collect();

    let mut game = new_game(7, ticks);

    for _ in 0..3_000 {
        let before_len = game.state().snake().len();
        let before = game.state().stats();

        game.tick().unwrap();

        let state = game.state();
        let snake = state.snake();
        let after = state.stats();

        assert!(snake.head().in_bounds());
        assert!(snake.segments().all(|seg| seg.in_bounds()));
        assert!(!snake.contains(state.apple()));

        if after.resets > before.resets {
            assert_eq!(snake.len(), 1);
            assert_eq!(snake.head(), START);
            assert_eq!(snake.heading(), Heading::None);
        } else if after.apples_eaten > before.apples_eaten {
            assert_eq!(snake.len(), before_len + 1);
        } else {
            assert_eq!(snake.len(), before_len);
        }
    }

    assert!(game.state().stats().apples_eaten > 0);
}
