use crate::interface_adapters::protocol::{ClientMessage, ServerMessage};
use crate::interface_adapters::utils::log::{log_slot, should_log};
use crate::use_cases::{ClientEvent, Outbound};

use futures_util::{Sink, SinkExt, StreamExt};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{Instrument, debug, info, info_span, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub url: Url,
    pub reconnect_delay: Duration,
    // Bounds the TCP connect plus the WebSocket handshake.
    pub connect_timeout: Duration,
}

#[derive(Debug)]
pub enum NetError {
    // Categorizes connection lifecycle failures so the retry loop can decide policy.
    Connect(tungstenite::Error),
    ConnectTimeout(Duration),
    Ws(tungstenite::Error),
    Serialization(serde_json::Error),
    // The session side hung up; the client is shutting down.
    ClientClosed,
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Connect(err) => write!(f, "connect failed: {err}"),
            NetError::ConnectTimeout(after) => {
                write!(f, "connect timed out after {} ms", after.as_millis())
            }
            NetError::Ws(err) => write!(f, "websocket error: {err}"),
            NetError::Serialization(err) => write!(f, "failed to encode message: {err}"),
            NetError::ClientClosed => f.write_str("client closed"),
        }
    }
}

impl std::error::Error for NetError {}

enum LoopControl {
    Continue,
    Disconnect,
}

#[derive(PartialEq, Eq)]
enum Shutdown {
    No,
    Yes,
}

struct ConnStats {
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    invalid_json: u32,
    last_invalid_log: Instant,
}

impl ConnStats {
    fn new() -> Self {
        Self {
            msgs_in: 0,
            msgs_out: 0,
            bytes_in: 0,
            bytes_out: 0,
            invalid_json: 0,
            last_invalid_log: log_slot(),
        }
    }
}

/// Keeps a connection to the game server open for as long as the client runs.
///
/// Every close (including a failed connect) is reported as
/// `ClientEvent::Disconnected` and followed by a new attempt after
/// `reconnect_delay`. Outbound messages are only sent on an open socket;
/// anything the session sends before that is dropped. There is no backoff and no retry cap; the loop ends only
/// when either channel to the session is closed.
pub async fn run_connection(
    settings: ConnectionSettings,
    events_tx: mpsc::Sender<ClientEvent>,
    mut outbound_rx: mpsc::Receiver<Outbound>,
) {
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let span = info_span!("conn", attempt, url = %settings.url);
        let outcome = connect_and_serve(&settings, &events_tx, &mut outbound_rx)
            .instrument(span)
            .await;

        match outcome {
            Ok(()) => info!(attempt, "connection closed"),
            Err(NetError::ClientClosed) => {
                info!("client closed; connection manager exiting");
                return;
            }
            Err(e) => warn!(attempt, error = %e, "connection lost"),
        }

        let retry_in = settings.reconnect_delay;
        if events_tx
            .send(ClientEvent::Disconnected { retry_in })
            .await
            .is_err()
        {
            return;
        }

        if discard_outbound_for(retry_in, &mut outbound_rx).await == Shutdown::Yes {
            info!("client closed while waiting to reconnect");
            return;
        }
    }
}

// Sleep out the reconnect delay, dropping anything the session sends meanwhile.
async fn discard_outbound_for(
    delay: Duration,
    outbound_rx: &mut mpsc::Receiver<Outbound>,
) -> Shutdown {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return Shutdown::No,
            outbound = outbound_rx.recv() => match outbound {
                Some(message) => drop_outbound(&message),
                None => return Shutdown::Yes,
            },
        }
    }
}

fn drop_outbound(message: &Outbound) {
    debug!(?message, "not connected; dropping outbound message");
}

async fn connect_and_serve(
    settings: &ConnectionSettings,
    events_tx: &mpsc::Sender<ClientEvent>,
    outbound_rx: &mut mpsc::Receiver<Outbound>,
) -> Result<(), NetError> {
    let connect = tokio::time::timeout(
        settings.connect_timeout,
        connect_async(settings.url.as_str()),
    );
    tokio::pin!(connect);

    // Keep draining the session while the handshake is pending.
    let socket = loop {
        tokio::select! {
            connected = &mut connect => {
                let (socket, _response) = connected
                    .map_err(|_| NetError::ConnectTimeout(settings.connect_timeout))?
                    .map_err(NetError::Connect)?;
                break socket;
            }
            outbound = outbound_rx.recv() => match outbound {
                Some(message) => drop_outbound(&message),
                None => return Err(NetError::ClientClosed),
            },
        }
    };
    info!("connected");

    events_tx
        .send(ClientEvent::Connected)
        .await
        .map_err(|_| NetError::ClientClosed)?;

    let (mut sink, mut stream) = socket.split();
    let mut stats = ConnStats::new();

    let result = loop {
        tokio::select! {
            incoming = stream.next() => {
                match handle_incoming(incoming, events_tx, &mut stats).await {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Disconnect) => break Ok(()),
                    Err(e) => break Err(e),
                }
            }

            outbound = outbound_rx.recv() => {
                let Some(outbound) = outbound else {
                    let _ = sink.send(Message::Close(None)).await;
                    break Err(NetError::ClientClosed);
                };
                if let Err(e) = send_message(&mut sink, &outbound.into(), &mut stats).await {
                    break Err(e);
                }
            }
        }
    };

    debug!(
        msgs_in = stats.msgs_in,
        msgs_out = stats.msgs_out,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        invalid_json = stats.invalid_json,
        "connection stats"
    );
    result
}

async fn send_message<S>(
    sink: &mut S,
    msg: &ClientMessage,
    stats: &mut ConnStats,
) -> Result<(), NetError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    sink.send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    stats.msgs_out += 1;
    stats.bytes_out += bytes as u64;
    Ok(())
}

async fn handle_incoming(
    incoming: Option<Result<Message, tungstenite::Error>>,
    events_tx: &mpsc::Sender<ClientEvent>,
    stats: &mut ConnStats,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(Message::Text(text))) => {
            stats.msgs_in += 1;
            stats.bytes_in += text.len() as u64;

            match serde_json::from_str::<ServerMessage>(&text) {
                Ok(msg) => match msg.into_event() {
                    Some(event) => events_tx
                        .send(event)
                        .await
                        .map_err(|_| NetError::ClientClosed)?,
                    None => debug!("ignoring message of unknown type"),
                },
                Err(parse_err) => {
                    // Bad payloads are dropped; the connection stays up.
                    stats.invalid_json += 1;
                    if should_log(&mut stats.last_invalid_log) {
                        warn!(
                            bytes = text.len(),
                            error = %parse_err,
                            "failed to parse server message"
                        );
                    }
                }
            }
            Ok(LoopControl::Continue)
        }
        Some(Ok(Message::Binary(bytes))) => {
            debug!(bytes = bytes.len(), "ignoring binary frame");
            Ok(LoopControl::Continue)
        }
        Some(Ok(Message::Close(frame))) => {
            info!(?frame, "server closed connection");
            Ok(LoopControl::Disconnect)
        }
        Some(Ok(_)) => Ok(LoopControl::Continue),
        Some(Err(e)) => Err(NetError::Ws(e)),
        None => {
            info!("websocket stream ended");
            Ok(LoopControl::Disconnect)
        }
    }
}
