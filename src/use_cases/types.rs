// Use-case level inputs/outputs for the client event loop.

use crate::domain::{InputState, Role, Snapshot};
use std::time::Duration;

/// Events the connection manager feeds into the session.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Connected,
    Disconnected { retry_in: Duration },
    Role(Role),
    State(Snapshot),
}

/// Messages the session asks the connection manager to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    Input(InputState),
    Speed { delta: i8 },
    Reset,
}
