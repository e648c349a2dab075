// Keyboard model and the paddle-direction input state.

/// Platform-neutral key identity produced by the terminal adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Space,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed(Key),
    Released(Key),
}

/// Continuous paddle input; sent whole on every direction-key transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
}

/// One-shot commands fired on key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SpeedUp,
    SpeedDown,
    Reset,
}

impl Command {
    /// Speed delta carried on the wire, if this is a speed command.
    pub fn speed_delta(self) -> Option<i8> {
        match self {
            Command::SpeedUp => Some(1),
            Command::SpeedDown => Some(-1),
            Command::Reset => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Up,
    Down,
    Command(Command),
}

impl KeyBinding {
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(KeyBinding::Up),
            Key::ArrowDown => Some(KeyBinding::Down),
            Key::Space => Some(KeyBinding::Command(Command::Reset)),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(KeyBinding::Up),
                's' => Some(KeyBinding::Down),
                '+' | '=' => Some(KeyBinding::Command(Command::SpeedUp)),
                '-' => Some(KeyBinding::Command(Command::SpeedDown)),
                ' ' => Some(KeyBinding::Command(Command::Reset)),
                _ => None,
            },
            Key::Escape => None,
        }
    }

    pub fn is_direction(self) -> bool {
        matches!(self, KeyBinding::Up | KeyBinding::Down)
    }
}
