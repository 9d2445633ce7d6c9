//! Utility functions and helpers.

use tokio::sync::mpsc;

/// Cut a string down to at most `max` characters.
///
/// Hard cutoff: no ellipsis, no word-boundary handling. Counts characters,
/// not bytes, so multi-byte text never splits mid code point.
pub fn truncate(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((end, _)) => input[..end].to_string(),
        None => input.to_string(),
    }
}

/// Send a value through a channel, logging a warning if it fails.
///
/// Used by the event stream reader: a closed receiver means the listener is
/// shutting down, which is not worth surfacing as an error.
pub async fn send_or_log<T>(tx: &mpsc::Sender<T>, value: T, context: &str) {
    if let Err(e) = tx.send(value).await {
        tracing::warn!("Failed to send {}: {}", context, e);
    }
}
