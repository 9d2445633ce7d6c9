//! Foreground application detection
//!
//! Answers "is the terminal application focused?" and resolves its bundle
//! identifier so a notification click can bring it to the front.

use super::{run_osascript, CommandRunner};
use std::sync::Arc;

const FRONTMOST_SCRIPT: &str =
    "tell application \"System Events\" to get name of first application process whose frontmost is true";

/// Queries the OS for the frontmost application
#[derive(Clone)]
pub struct FocusDetector {
    runner: Arc<dyn CommandRunner>,
    app_name: String,
}

impl FocusDetector {
    pub fn new(runner: Arc<dyn CommandRunner>, app_name: impl Into<String>) -> Self {
        Self {
            runner,
            app_name: app_name.into(),
        }
    }

    /// Name of the application this detector watches for
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Name of the frontmost application process, if it could be queried
    pub async fn frontmost_app(&self) -> Option<String> {
        run_osascript(self.runner.as_ref(), FRONTMOST_SCRIPT).await
    }

    /// Whether the target application is focused. Queried fresh on every call;
    /// any failure counts as not focused so the notification still fires.
    pub async fn is_target_app_focused(&self) -> bool {
        match self.frontmost_app().await {
            Some(frontmost) => frontmost.to_lowercase() == self.app_name.to_lowercase(),
            None => false,
        }
    }

    /// Bundle identifier of the target application, used as the click
    /// activation target. Resolved once at startup.
    pub async fn resolve_app_identity(&self) -> Option<String> {
        let script = format!(
            "id of application \"{}\"",
            super::escape_for_applescript(&self.app_name)
        );
        let identity = run_osascript(self.runner.as_ref(), &script).await;
        if identity.is_none() {
            tracing::debug!(
                "Could not resolve bundle id for {}, notifications will not be clickable",
                self.app_name
            );
        }
        identity
    }
}
