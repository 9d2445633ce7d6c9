//! Platform-native notification delivery.
//!
//! Delivery is fire-and-forget: [`Notifier::notify`] returns immediately and
//! failures are only logged. Uses terminal-notifier when installed (supports
//! click-to-activate), otherwise AppleScript `display notification`.

use super::{escape_for_applescript, CommandRunner};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Fully resolved notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    pub sound: String,
    /// Bundle id brought to the foreground when the notification is clicked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_target: Option<String>,
}

/// Delivers notifications to the user
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hand off a notification without waiting for delivery
    fn notify(&self, request: NotificationRequest);

    /// Wait for in-flight deliveries. Only one-shot callers need this.
    async fn flush(&self) {}
}

/// macOS notifier shelling out to terminal-notifier / osascript
pub struct TerminalNotifier {
    runner: Arc<dyn CommandRunner>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl TerminalNotifier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            pending: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    fn notify(&self, request: NotificationRequest) {
        let runner = Arc::clone(&self.runner);
        let handle = tokio::spawn(async move {
            deliver(runner.as_ref(), &request).await;
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            }
            Err(e) => tracing::warn!("Notifier task list lock poisoned: {e}"),
        }
    }

    async fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("Notification task failed: {}", e);
            }
        }
    }
}

/// Arguments for terminal-notifier
pub fn terminal_notifier_args(request: &NotificationRequest) -> Vec<String> {
    let mut args = vec![
        "-title".to_string(),
        request.title.clone(),
        "-message".to_string(),
        request.message.clone(),
        "-sound".to_string(),
        request.sound.clone(),
    ];
    if let Some(target) = &request.activation_target {
        args.push("-activate".to_string());
        args.push(target.clone());
    }
    args
}

/// AppleScript fallback (no click activation)
pub fn applescript_notification(request: &NotificationRequest) -> String {
    format!(
        r#"display notification "{}" with title "{}" sound name "{}""#,
        escape_for_applescript(&request.message),
        escape_for_applescript(&request.title),
        escape_for_applescript(&request.sound),
    )
}

async fn deliver(runner: &dyn CommandRunner, request: &NotificationRequest) {
    let args = terminal_notifier_args(request);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    match runner.run("terminal-notifier", &arg_refs).await {
        Ok(output) if output.success() => {
            tracing::info!("Sent notification: {}", request.title);
            return;
        }
        Ok(output) => tracing::debug!(
            "terminal-notifier exited with {:?}: {}",
            output.status,
            output.stderr.trim()
        ),
        Err(e) => tracing::debug!("terminal-notifier unavailable: {}", e),
    }

    let script = applescript_notification(request);
    match runner.run("osascript", &["-e", &script]).await {
        Ok(output) if output.success() => {
            tracing::info!("Sent notification via osascript: {}", request.title);
        }
        Ok(output) => tracing::warn!(
            "Failed to send notification ({:?}): {}",
            output.status,
            output.stderr.trim()
        ),
        Err(e) => tracing::warn!("Failed to send notification: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::CommandOutput;

    fn request(activation_target: Option<&str>) -> NotificationRequest {
        NotificationRequest {
            title: "Ready for review".to_string(),
            message: "Refactor auth module".to_string(),
            sound: "Blow".to_string(),
            activation_target: activation_target.map(|s| s.to_string()),
        }
    }

    /// Records invocations; fails terminal-notifier so the fallback runs.
    #[derive(Default)]
    struct NoTerminalNotifier {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl CommandRunner for NoTerminalNotifier {
        async fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<CommandOutput> {
            self.calls.lock().unwrap().push((
                program.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
            if program == "terminal-notifier" {
                anyhow::bail!("not installed");
            }
            Ok(CommandOutput {
                status: Some(0),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_args_include_activation_target() {
        let args = terminal_notifier_args(&request(Some("com.mitchellh.ghostty")));
        assert_eq!(
            args,
            vec![
                "-title",
                "Ready for review",
                "-message",
                "Refactor auth module",
                "-sound",
                "Blow",
                "-activate",
                "com.mitchellh.ghostty"
            ]
        );
    }

    #[test]
    fn test_args_without_activation_target() {
        let args = terminal_notifier_args(&request(None));
        assert!(!args.contains(&"-activate".to_string()));
        assert_eq!(args.len(), 6);
    }

    #[test]
    fn test_applescript_escapes_quotes() {
        let mut req = request(None);
        req.message = r#"Fix "quoted" thing"#.to_string();
        let script = applescript_notification(&req);
        assert!(script.contains(r#"Fix \"quoted\" thing"#));
        assert!(script.ends_with(r#"sound name "Blow""#));
    }

    #[tokio::test]
    async fn test_falls_back_to_osascript() {
        let runner = Arc::new(NoTerminalNotifier::default());
        let notifier = TerminalNotifier::new(runner.clone());

        notifier.notify(request(None));
        notifier.flush().await;

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "terminal-notifier");
        assert_eq!(calls[1].0, "osascript");
    }
}
