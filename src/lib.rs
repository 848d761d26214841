pub mod apple;
pub mod board;
pub mod config;
pub mod display;
pub mod game;
pub mod input;
pub mod snake;
pub mod term;

pub use board::Position;
