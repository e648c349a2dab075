// Raw-mode terminal setup; restored on drop, including during a panic unwind.

use crate::interface_adapters::terminal::ReleaseMode;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;

pub struct TerminalGuard {
    key_release_reported: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Construct first so an error below still restores the terminal.
        let mut guard = Self {
            key_release_reported: false,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.key_release_reported = true;
        }

        Ok(guard)
    }

    pub fn release_mode(&self, hold: Duration) -> ReleaseMode {
        if self.key_release_reported {
            ReleaseMode::Reported
        } else {
            ReleaseMode::Emulated { hold }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.key_release_reported {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
