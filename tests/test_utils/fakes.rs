#![allow(dead_code)]
//! In-memory stand-ins for the OS and host collaborators

use anyhow::Result;
use async_trait::async_trait;
use opencode_notify::platform::notifier::{NotificationRequest, Notifier};
use opencode_notify::platform::{CommandOutput, CommandRunner};
use opencode_notify::session::{SessionInfo, SessionSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Map-backed session lookup. Unknown ids fail, as does everything when
/// `unreachable` is set.
#[derive(Default)]
pub struct FakeSessions {
    sessions: HashMap<String, SessionInfo>,
    unreachable: bool,
    lookups: AtomicUsize,
}

impl FakeSessions {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn with_session(mut self, id: &str, title: Option<&str>, parent_id: Option<&str>) -> Self {
        self.sessions.insert(
            id.to_string(),
            SessionInfo {
                title: title.map(|s| s.to_string()),
                parent_id: parent_id.map(|s| s.to_string()),
            },
        );
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionSource for FakeSessions {
    async fn get_session(&self, session_id: &str) -> Result<SessionInfo> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            anyhow::bail!("connection refused");
        }
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("session {} not found", session_id))
    }
}

/// Answers the two osascript queries the engine makes
#[derive(Default)]
pub struct FakeRunner {
    /// Frontmost application name; `None` makes the query fail
    pub frontmost: Mutex<Option<String>>,
    /// Bundle id of the terminal app; `None` makes the query fail
    pub bundle_id: Option<String>,
    focus_queries: AtomicUsize,
}

impl FakeRunner {
    pub fn new(frontmost: Option<&str>, bundle_id: Option<&str>) -> Self {
        Self {
            frontmost: Mutex::new(frontmost.map(|s| s.to_string())),
            bundle_id: bundle_id.map(|s| s.to_string()),
            focus_queries: AtomicUsize::new(0),
        }
    }

    /// Terminal in the foreground
    pub fn focused() -> Self {
        Self::new(Some("ghostty"), Some(super::GHOSTTY_BUNDLE_ID))
    }

    /// Some other application in the foreground
    pub fn unfocused() -> Self {
        Self::new(Some("Safari"), Some(super::GHOSTTY_BUNDLE_ID))
    }

    pub fn set_frontmost(&self, app: Option<&str>) {
        *self.frontmost.lock().unwrap() = app.map(|s| s.to_string());
    }

    pub fn focus_queries(&self) -> usize {
        self.focus_queries.load(Ordering::SeqCst)
    }

    fn reply(value: Option<String>) -> Result<CommandOutput> {
        match value {
            Some(stdout) => Ok(CommandOutput {
                stdout: format!("{}\n", stdout),
                stderr: String::new(),
                status: Some(0),
            }),
            None => Ok(CommandOutput {
                stdout: String::new(),
                stderr: "execution error".to_string(),
                status: Some(1),
            }),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        if program != "osascript" {
            anyhow::bail!("{} not found", program);
        }
        let script = args.last().copied().unwrap_or_default();
        if script.contains("frontmost") {
            self.focus_queries.fetch_add(1, Ordering::SeqCst);
            Self::reply(self.frontmost.lock().unwrap().clone())
        } else if script.starts_with("id of application") {
            Self::reply(self.bundle_id.clone())
        } else {
            anyhow::bail!("unexpected script: {}", script)
        }
    }
}

/// Captures every notification handed to it
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<NotificationRequest>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn notify(&self, request: NotificationRequest) {
        self.sent.lock().unwrap().push(request);
    }
}
