// Wire protocol DTOs and conversions for the game server's JSON messages.

use crate::domain::{Role, Snapshot};
use crate::use_cases::{ClientEvent, Outbound};
use serde::{Deserialize, Serialize};

/// Messages the server pushes to the client over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    // Side assigned to this connection.
    Role { role: String },
    // Full game state for one server tick.
    State { state: SnapshotDto },
    // Any other `type`; ignored.
    #[serde(other)]
    Unknown,
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Input { up: bool, down: bool },
    Speed { delta: i8 },
    Reset,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    pub width: f64,
    pub height: f64,
    pub paddle_w: f64,
    pub paddle_h: f64,
    pub ball_size: f64,
    pub left_y: f64,
    pub right_y: f64,
    pub ball_x: f64,
    pub ball_y: f64,
    pub score_left: u32,
    pub score_right: u32,
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<String>,
}

impl From<SnapshotDto> for Snapshot {
    fn from(dto: SnapshotDto) -> Self {
        Self {
            width: dto.width,
            height: dto.height,
            left_y: dto.left_y,
            right_y: dto.right_y,
            paddle_w: dto.paddle_w,
            paddle_h: dto.paddle_h,
            ball_x: dto.ball_x,
            ball_y: dto.ball_y,
            ball_size: dto.ball_size,
            score_left: dto.score_left,
            score_right: dto.score_right,
            game_over: dto.game_over,
            winner: dto.winner,
        }
    }
}

impl ServerMessage {
    /// Maps the message onto a session event; `None` for ignored kinds.
    pub fn into_event(self) -> Option<ClientEvent> {
        match self {
            ServerMessage::Role { role } => Some(ClientEvent::Role(Role::new(role))),
            ServerMessage::State { state } => Some(ClientEvent::State(state.into())),
            ServerMessage::Unknown => None,
        }
    }
}

impl From<Outbound> for ClientMessage {
    fn from(outbound: Outbound) -> Self {
        match outbound {
            Outbound::Input(input) => ClientMessage::Input {
                up: input.up,
                down: input.down,
            },
            Outbound::Speed { delta } => ClientMessage::Speed { delta },
            Outbound::Reset => ClientMessage::Reset,
        }
    }
}
