// Network adapter: the reconnecting WebSocket connection to the game server.

pub mod connection;

pub use connection::{ConnectionSettings, NetError, run_connection};
