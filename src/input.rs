use crate::snake::Heading;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Quit,
}

impl InputEvent {
    /// The heading a directional event asks for; `None` for `Quit`.
    pub fn heading(self) -> Option<Heading> {
        match self {
            InputEvent::Up => Some(Heading::Up),
            InputEvent::Down => Some(Heading::Down),
            InputEvent::Left => Some(Heading::Left),
            InputEvent::Right => Some(Heading::Right),
            InputEvent::Quit => None,
        }
    }
}

/// A source of joystick-like events.
///
/// `poll_events` must return immediately with whatever is pending, which may
/// be nothing. The game loop relies on this to keep a steady tick.
pub trait InputSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        (**self).poll_events()
    }
}
