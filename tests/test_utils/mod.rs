#![allow(dead_code)]
//! Test utilities and fixtures for opencode-notify tests

pub mod fakes;

use opencode_notify::config::NotifyConfig;
use opencode_notify::router::{Collaborators, EventRouter};
use std::sync::Arc;

pub use fakes::{FakeRunner, FakeSessions, RecordingNotifier};

pub const GHOSTTY_BUNDLE_ID: &str = "com.mitchellh.ghostty";

/// A router wired to in-memory fakes, plus handles for inspecting them
pub struct TestHarness {
    pub router: EventRouter,
    pub sessions: Arc<FakeSessions>,
    pub runner: Arc<FakeRunner>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    /// Build a harness and resolve the activation target the way startup does
    pub async fn start(config: NotifyConfig, sessions: FakeSessions, runner: FakeRunner) -> Self {
        let sessions = Arc::new(sessions);
        let runner = Arc::new(runner);
        let notifier = Arc::new(RecordingNotifier::default());

        let router = EventRouter::start(config, collaborators(&sessions, &runner, &notifier)).await;

        Self {
            router,
            sessions,
            runner,
            notifier,
        }
    }

    pub fn sent(&self) -> Vec<opencode_notify::platform::notifier::NotificationRequest> {
        self.notifier.sent()
    }
}

pub fn collaborators(
    sessions: &Arc<FakeSessions>,
    runner: &Arc<FakeRunner>,
    notifier: &Arc<RecordingNotifier>,
) -> Collaborators {
    Collaborators {
        sessions: sessions.clone(),
        runner: runner.clone(),
        notifier: notifier.clone(),
    }
}

/// Sessions fixture: one root session and one child of it
pub fn root_and_child_sessions() -> FakeSessions {
    FakeSessions::default()
        .with_session("ses_root", Some("Refactor auth module"), None)
        .with_session("ses_child", Some("Explore codebase"), Some("ses_root"))
}
