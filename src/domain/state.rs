// Server-pushed game state and the client's display-only identity/status.

use std::fmt;
use std::time::Duration;

/// Full game state at one instant, as pushed by the server.
///
/// Replaced wholesale on every state message; never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: f64,
    pub height: f64,
    pub left_y: f64,
    pub right_y: f64,
    pub paddle_w: f64,
    pub paddle_h: f64,
    pub ball_x: f64,
    pub ball_y: f64,
    pub ball_size: f64,
    pub score_left: u32,
    pub score_right: u32,
    pub game_over: bool,
    // `None` while the match is running.
    pub winner: Option<String>,
}

impl Snapshot {
    pub fn left_won(&self) -> bool {
        self.winner.as_deref() == Some("left")
    }
}

/// Side assigned by the server ("left", "right", "spectator", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected { retry_in: Duration },
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connecting => f.write_str("Connecting..."),
            ConnectionStatus::Connected => f.write_str("Connected"),
            ConnectionStatus::Disconnected { retry_in } => write!(
                f,
                "Disconnected - reconnecting in {} ms",
                retry_in.as_millis()
            ),
        }
    }
}
