//! Terminal input poller
//!
//! Reads crossterm events on a tokio task and forwards the ones the view
//! cares about (key presses and resizes) as [`EventKind`]s.

use std::time::Duration;

use badge_weather_core::EventKind;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How often the terminal is checked for input
pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Map a terminal event to a view event, if it is one the view handles
pub fn map_event(event: Event) -> Option<EventKind> {
    match event {
        Event::Key(key) => Some(EventKind::Key(key)),
        Event::Resize(width, height) => Some(EventKind::Resize(width, height)),
        _ => None,
    }
}

/// Forward whatever input is already buffered. Never blocks. Returns `false`
/// once the receiver is gone.
fn forward_pending(tx: &mpsc::UnboundedSender<EventKind>) -> bool {
    while event::poll(Duration::ZERO).unwrap_or(false) {
        let Some(kind) = event::read().ok().and_then(map_event) else {
            continue;
        };
        if tx.send(kind).is_err() {
            return false;
        }
    }
    true
}

/// Spawn the poller. It stops when `cancel_token` fires or the receiver is
/// dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if !forward_pending(&tx) {
                        debug!("event channel closed, stopping poller");
                        break;
                    }
                }
            }
        }
    })
}

/// Cancel the poller and wait for it. Returns `false` if it had panicked or
/// was aborted.
pub async fn stop_event_poller(handle: JoinHandle<()>, cancel_token: &CancellationToken) -> bool {
    cancel_token.cancel();
    match handle.await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "event poller did not stop cleanly");
            false
        }
    }
}
