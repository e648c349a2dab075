// Key transitions -> outbound messages.

use super::types::Outbound;
use crate::domain::{Command, InputState, KeyBinding, KeyTransition};

#[derive(Debug, Default)]
pub struct InputHandler {
    state: InputState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Applies one key transition. Direction keys always yield the current
    /// input state; command keys yield their command on key-down only.
    pub fn on_key(&mut self, transition: KeyTransition) -> Option<Outbound> {
        let (key, pressed) = match transition {
            KeyTransition::Pressed(key) => (key, true),
            KeyTransition::Released(key) => (key, false),
        };

        match KeyBinding::for_key(key)? {
            KeyBinding::Up => {
                self.state.up = pressed;
                Some(Outbound::Input(self.state))
            }
            KeyBinding::Down => {
                self.state.down = pressed;
                Some(Outbound::Input(self.state))
            }
            KeyBinding::Command(command) if pressed => Some(command_message(command)),
            KeyBinding::Command(_) => None,
        }
    }
}

fn command_message(command: Command) -> Outbound {
    match command.speed_delta() {
        Some(delta) => Outbound::Speed { delta },
        None => Outbound::Reset,
    }
}
