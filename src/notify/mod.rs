//! Notification decision and content
//!
//! [`gating`] decides whether an event should reach the user; [`dispatch`]
//! decides what it says and hands it to the platform notifier.

pub mod dispatch;
pub mod gating;

pub use dispatch::Dispatcher;
pub use gating::{should_notify, GateOptions, SessionContext};

/// Kinds of notification the engine emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Idle,
    Error,
    Permission,
    Question,
}

impl NotifyKind {
    /// Notification title for this kind
    pub fn title(self) -> &'static str {
        match self {
            NotifyKind::Idle => "Ready for review",
            NotifyKind::Error => "Something went wrong",
            NotifyKind::Permission => "Waiting for you",
            NotifyKind::Question => "Question for you",
        }
    }
}
