//! Notification gating policy
//!
//! Checks run in order and short-circuit:
//! 1. Hierarchy: when `require_parent` is set and child sessions are not opted
//!    in, only root sessions notify. Missing session context suppresses.
//! 2. Focus: when `suppress_if_focused` is set, a focused terminal suppresses.
//!
//! Both collaborator failures lean toward notifying: an unknown session is
//! treated as root, an unknown foreground app as not focused.

use crate::config::NotifyConfig;
use crate::platform::focus::FocusDetector;
use crate::session::{is_root_session, SessionSource};

/// Session the event originated from
#[derive(Clone, Copy)]
pub struct SessionContext<'a> {
    pub source: &'a dyn SessionSource,
    pub session_id: &'a str,
}

/// Inputs to [`should_notify`]
#[derive(Clone, Copy)]
pub struct GateOptions<'a> {
    pub session: Option<SessionContext<'a>>,
    pub config: &'a NotifyConfig,
    pub require_parent: bool,
    pub suppress_if_focused: bool,
}

/// Decide whether an event should produce a notification
pub async fn should_notify(opts: GateOptions<'_>, focus: &FocusDetector) -> bool {
    if opts.require_parent && !opts.config.notify_child_sessions {
        let Some(session) = opts.session else {
            tracing::debug!("Suppressed: parent required but no session context");
            return false;
        };
        if !is_root_session(session.source, session.session_id).await {
            tracing::debug!("Suppressed: {} is a child session", session.session_id);
            return false;
        }
    }

    if opts.suppress_if_focused && focus.is_target_app_focused().await {
        tracing::debug!("Suppressed: {} is focused", focus.app_name());
        return false;
    }

    true
}
