//! Host event subscription over Server-Sent Events
//!
//! Reads `GET {server}/event` and forwards every recognized [`Event`] over a
//! channel. Unknown kinds and unparsable payloads are dropped here. Dropped
//! connections are re-established with exponential backoff.

use super::Event;
use crate::session::client::HTTP_CLIENT;
use crate::util::send_or_log;
use anyhow::{anyhow, Result};
use futures::StreamExt;
use reqwest_eventsource::retry::ExponentialBackoff;
use reqwest_eventsource::{Event as SseEvent, EventSource};
use std::time::Duration;
use tokio::sync::mpsc;

const RETRY_START: Duration = Duration::from_secs(1);
const RETRY_FACTOR: f64 = 2.0;
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

/// Event stream endpoint for a server base URL
pub fn event_url(base_url: &str) -> String {
    format!("{}/event", base_url.trim_end_matches('/'))
}

/// Retry forever, backing off from one second up to thirty
fn retry_policy() -> ExponentialBackoff {
    ExponentialBackoff::new(RETRY_START, RETRY_FACTOR, Some(RETRY_MAX_DELAY), None)
}

/// Parse one SSE `data` payload and forward it if it is a recognized event
async fn forward(data: &str, tx: &mpsc::Sender<Event>) {
    match Event::parse(data) {
        Some(event) => send_or_log(tx, event, "host event").await,
        None => tracing::trace!("Ignoring event payload: {}", data),
    }
}

/// Subscribe to the host event stream.
///
/// Runs until the receiver is dropped; connection failures are logged and retried.
pub async fn subscribe(base_url: &str, tx: mpsc::Sender<Event>) -> Result<()> {
    let url = event_url(base_url);

    let mut es = EventSource::new(HTTP_CLIENT.get(&url))
        .map_err(|e| anyhow!("Failed to create EventSource: {}", e))?;
    es.set_retry_policy(Box::new(retry_policy()));

    while let Some(event) = es.next().await {
        match event {
            Ok(SseEvent::Open) => tracing::info!("Subscribed to {}", url),
            Ok(SseEvent::Message(msg)) => forward(&msg.data, &tx).await,
            Err(e) => tracing::warn!("Event stream from {} interrupted: {}", url, e),
        }

        if tx.is_closed() {
            break;
        }
    }

    es.close();
    tracing::debug!("Event stream from {} ended", url);
    Ok(())
}
