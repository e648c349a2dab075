// Framework bootstrap and the single-threaded client event loop.

use crate::domain::{KeyTransition, View};
use crate::frameworks::config;
use crate::frameworks::terminal::TerminalGuard;
use crate::interface_adapters::net::{ConnectionSettings, run_connection};
use crate::interface_adapters::terminal::{KeyTranslator, TerminalView, is_quit};
use crate::interface_adapters::utils::log::{log_slot, should_log};
use crate::use_cases::{Outbound, Session};

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{self, Result};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

// Time the connection manager gets to close the socket on quit.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connection: ConnectionSettings,
    pub key_hold: Duration,
}

impl ClientSettings {
    pub fn from_env() -> Self {
        Self {
            connection: ConnectionSettings {
                url: config::server_url(),
                reconnect_delay: config::reconnect_delay(),
                connect_timeout: config::connect_timeout(),
            },
            key_hold: config::key_hold_timeout(),
        }
    }
}

fn init_runtime() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = File::options()
        .create(true)
        .append(true)
        .open(config::log_file())?;
    let writer = Mutex::new(log_file);

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));

    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_runtime()?;
    let settings = ClientSettings::from_env();
    info!(
        url = %settings.connection.url,
        reconnect_delay_ms = settings.connection.reconnect_delay.as_millis(),
        "client configured"
    );

    run(settings).await.inspect_err(|e| {
        error!(error = %e, "client error");
    })
}

pub async fn run(settings: ClientSettings) -> Result<()> {
    // events: connection manager -> session; outbound: session -> connection manager.
    let (events_tx, mut events_rx) = mpsc::channel(config::EVENT_CHANNEL_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel(config::OUTBOUND_CHANNEL_CAPACITY);

    let guard = TerminalGuard::enter()?;
    let mut keys = KeyTranslator::new(guard.release_mode(settings.key_hold));
    info!(mode = ?keys.mode(), "keyboard configured");

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut session = Session::new(TerminalView::new(terminal));

    let connection = tokio::spawn(run_connection(
        settings.connection.clone(),
        events_tx,
        outbound_rx,
    ));

    let mut terminal_events = EventStream::new();
    let mut expiry = tokio::time::interval(config::KEY_EXPIRY_INTERVAL);
    expiry.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_outbound_full_log = log_slot();

    let result = loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Some(event) => session.handle_event(event),
                None => {
                    warn!("connection manager stopped");
                    break Ok(());
                }
            },

            terminal_event = terminal_events.next() => match terminal_event {
                Some(Ok(Event::Key(key))) => {
                    if is_quit(&key) {
                        info!("quit requested");
                        break Ok(());
                    }
                    if let Some(transition) = keys.translate(&key, Instant::now()) {
                        relay_key(&mut session, &outbound_tx, transition, &mut last_outbound_full_log);
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    debug!(width, height, "terminal resized");
                    session.view_mut().redraw();
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e),
                None => break Ok(()),
            },

            _ = expiry.tick(), if keys.has_held_keys() => {
                for transition in keys.expire(Instant::now()) {
                    relay_key(&mut session, &outbound_tx, transition, &mut last_outbound_full_log);
                }
            }
        }
    };

    // Closing the outbound channel tells the connection manager to hang up.
    drop(outbound_tx);
    drop(events_rx);
    if tokio::time::timeout(SHUTDOWN_GRACE, connection).await.is_err() {
        debug!("connection manager did not stop within grace period");
    }
    drop(session);
    drop(guard);

    result
}

fn relay_key<V: View>(
    session: &mut Session<V>,
    outbound_tx: &mpsc::Sender<Outbound>,
    transition: KeyTransition,
    last_full_log: &mut Instant,
) {
    let Some(message) = session.handle_key(transition) else {
        return;
    };

    match outbound_tx.try_send(message) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            if should_log(last_full_log) {
                warn!("outbound channel full; dropping message");
            }
        }
        Err(TrySendError::Closed(_)) => debug!("connection manager gone; dropping message"),
    }
}
