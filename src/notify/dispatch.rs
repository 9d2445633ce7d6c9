//! Notification content and hand-off
//!
//! | Kind | Title | Message | Sound |
//! |------|-------|---------|-------|
//! | Idle | Ready for review | session title (50 chars) or "Task" | idle |
//! | Error | Something went wrong | error (100 chars) or fallback | error |
//! | Permission | Waiting for you | fixed prompt | permission |
//! | Question | Question for you | fixed prompt | question, else permission |

use super::NotifyKind;
use crate::config::{get_sound, NotifyConfig};
use crate::platform::notifier::{NotificationRequest, Notifier};
use crate::util::truncate;
use std::sync::Arc;

pub const IDLE_TITLE_MAX: usize = 50;
pub const ERROR_MESSAGE_MAX: usize = 100;
pub const IDLE_FALLBACK: &str = "Task";
pub const ERROR_FALLBACK: &str = "Something went wrong";
pub const INPUT_PROMPT: &str = "OpenCode needs your input";

/// Message for an idle session
pub fn idle_message(session_title: Option<&str>) -> String {
    match session_title {
        Some(title) if !title.is_empty() => truncate(title, IDLE_TITLE_MAX),
        _ => IDLE_FALLBACK.to_string(),
    }
}

/// Message for a session error
pub fn error_message(error: Option<&str>) -> String {
    match error {
        Some(error) if !error.is_empty() => truncate(error, ERROR_MESSAGE_MAX),
        _ => ERROR_FALLBACK.to_string(),
    }
}

/// Build the full request for a kind, message and optional click target
pub fn build_request(
    config: &NotifyConfig,
    kind: NotifyKind,
    message: String,
    activation_target: Option<&str>,
) -> NotificationRequest {
    NotificationRequest {
        title: kind.title().to_string(),
        message,
        sound: get_sound(config, kind).to_string(),
        activation_target: activation_target.map(|s| s.to_string()),
    }
}

/// Resolves notification content and passes it to the platform notifier
#[derive(Clone)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    /// Bundle id resolved once at startup
    activation_target: Option<String>,
}

impl Dispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, activation_target: Option<String>) -> Self {
        Self {
            notifier,
            activation_target,
        }
    }

    pub fn activation_target(&self) -> Option<&str> {
        self.activation_target.as_deref()
    }

    /// Fire-and-forget delivery
    pub fn send(&self, config: &NotifyConfig, kind: NotifyKind, message: String) {
        let request = build_request(config, kind, message, self.activation_target.as_deref());
        tracing::debug!("Dispatching {:?} notification: {}", kind, request.message);
        self.notifier.notify(request);
    }

    /// Wait for in-flight deliveries
    pub async fn flush(&self) {
        self.notifier.flush().await;
    }
}
