// crossterm key events -> domain key transitions.

use crate::domain::{Key, KeyBinding, KeyTransition};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Local quit keys; never forwarded to the server.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    // The terminal reports key release events (keyboard enhancement enabled).
    Reported,
    // Presses only; a held direction key counts as released after `hold`
    // without a press/repeat.
    Emulated { hold: Duration },
}

#[derive(Debug)]
pub struct KeyTranslator {
    mode: ReleaseMode,
    held: HashMap<Key, Instant>,
}

impl KeyTranslator {
    pub fn new(mode: ReleaseMode) -> Self {
        Self {
            mode,
            held: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Auto-repeat counts as another key-down, as in a browser.
    pub fn translate(&mut self, event: &KeyEvent, now: Instant) -> Option<KeyTransition> {
        let key = map_key(event.code)?;

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if matches!(self.mode, ReleaseMode::Emulated { .. }) && is_direction(key) {
                    self.held.insert(key, now);
                }
                Some(KeyTransition::Pressed(key))
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                Some(KeyTransition::Released(key))
            }
        }
    }

    /// Synthesized releases for keys whose hold timeout ran out.
    pub fn expire(&mut self, now: Instant) -> Vec<KeyTransition> {
        let ReleaseMode::Emulated { hold } = self.mode else {
            return Vec::new();
        };

        let mut expired: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, pressed_at)| now.saturating_duration_since(**pressed_at) >= hold)
            .map(|(key, _)| *key)
            .collect();
        // Stable order keeps the outbound sequence deterministic.
        expired.sort();

        for key in &expired {
            self.held.remove(key);
        }
        expired.into_iter().map(KeyTransition::Released).collect()
    }

    pub fn has_held_keys(&self) -> bool {
        !self.held.is_empty()
    }
}

fn is_direction(key: Key) -> bool {
    KeyBinding::for_key(key).is_some_and(KeyBinding::is_direction)
}
