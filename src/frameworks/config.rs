use std::{env, time::Duration};
use url::Url;

// Runtime/client constants.

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8765";
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;
// How often held keys are checked when release events are emulated.
pub const KEY_EXPIRY_INTERVAL: Duration = Duration::from_millis(25);
// Must outlast the OS auto-repeat delay (about 500 ms on Windows, 660 ms on
// X11) or a held key is released before its first repeat arrives.
pub const DEFAULT_KEY_HOLD_MS: u64 = 700;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

pub fn server_url() -> Url {
    let raw = env::var("PONG_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    match parse_server_url(&raw) {
        Some(url) => url,
        None => {
            tracing::warn!(value = %raw, "invalid PONG_SERVER_URL; using default");
            default_server_url()
        }
    }
}

pub fn parse_server_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    (url.scheme() == "ws" && url.host().is_some()).then_some(url)
}

fn default_server_url() -> Url {
    Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid")
}

pub fn reconnect_delay() -> Duration {
    millis_var("PONG_RECONNECT_DELAY_MS", 1000)
}

pub fn key_hold_timeout() -> Duration {
    millis_var("PONG_KEY_HOLD_MS", DEFAULT_KEY_HOLD_MS)
}

pub fn connect_timeout() -> Duration {
    millis_var("PONG_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)
}

pub fn log_file() -> String {
    env::var("PONG_LOG_FILE").unwrap_or_else(|_| "pong_client.log".to_string())
}

fn millis_var(name: &str, default: u64) -> Duration {
    let millis = env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_millis(millis)
}
