//! Event routing
//!
//! Maps each inbound event to its handler. Handlers gate first, then dispatch.
//! The router holds only read-only state (config, resolved bundle id), so
//! overlapping handler invocations need no locking.
//!
//! | Event | Parent required | Focus suppresses |
//! |-------|-----------------|------------------|
//! | session.idle | yes | yes |
//! | session.error | yes | yes |
//! | permission.updated | no | yes |
//! | question (tool hook or event) | no | no |

use crate::config::NotifyConfig;
use crate::events::{Event, HookPayload, ToolInvocation};
use crate::notify::dispatch::{error_message, idle_message, INPUT_PROMPT};
use crate::notify::{should_notify, Dispatcher, GateOptions, NotifyKind, SessionContext};
use crate::platform::focus::FocusDetector;
use crate::platform::notifier::Notifier;
use crate::platform::{is_supported_platform, CommandRunner};
use crate::session::{fetch_session, SessionSource};
use std::sync::Arc;

/// External collaborators the router depends on
#[derive(Clone)]
pub struct Collaborators {
    pub sessions: Arc<dyn SessionSource>,
    pub runner: Arc<dyn CommandRunner>,
    pub notifier: Arc<dyn Notifier>,
}

/// Routes events to gated notification handlers
pub struct EventRouter {
    config: NotifyConfig,
    sessions: Arc<dyn SessionSource>,
    focus: FocusDetector,
    dispatcher: Dispatcher,
}

impl EventRouter {
    /// Build a router with an already-resolved activation target
    pub fn new(
        config: NotifyConfig,
        collaborators: Collaborators,
        activation_target: Option<String>,
    ) -> Self {
        let focus = FocusDetector::new(collaborators.runner, config.terminal_app.clone());
        Self {
            config,
            sessions: collaborators.sessions,
            focus,
            dispatcher: Dispatcher::new(collaborators.notifier, activation_target),
        }
    }

    /// Build a router, resolving the terminal's bundle id once
    pub async fn start(config: NotifyConfig, collaborators: Collaborators) -> Self {
        let focus = FocusDetector::new(Arc::clone(&collaborators.runner), config.terminal_app.clone());
        let activation_target = focus.resolve_app_identity().await;
        tracing::info!(
            "Notifications enabled for {} (click to activate: {})",
            config.terminal_app,
            activation_target.as_deref().unwrap_or("unavailable")
        );
        Self::new(config, collaborators, activation_target)
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    pub fn activation_target(&self) -> Option<&str> {
        self.dispatcher.activation_target()
    }

    /// Handle one host event
    pub async fn handle_event(&self, event: &Event) {
        tracing::debug!("Handling {}", event.kind());
        match event {
            Event::SessionIdle { session_id } => self.handle_session_idle(session_id).await,
            Event::SessionError { session_id, error } => {
                self.handle_session_error(session_id, error.as_deref()).await
            }
            Event::PermissionUpdated => self.handle_permission_updated().await,
            Event::QuestionAsked => self.handle_question_asked(),
        }
    }

    /// Handle a before-tool-execution hook. Only the question tool notifies.
    pub async fn handle_tool_before(&self, input: &ToolInvocation) {
        if input.is_question() {
            self.handle_question_asked();
        }
    }

    /// Wait for in-flight notification deliveries
    pub async fn flush(&self) {
        self.dispatcher.flush().await;
    }

    fn session_gate<'a>(&'a self, session_id: &'a str) -> GateOptions<'a> {
        GateOptions {
            session: Some(SessionContext {
                source: self.sessions.as_ref(),
                session_id,
            }),
            config: &self.config,
            require_parent: true,
            suppress_if_focused: true,
        }
    }

    async fn handle_session_idle(&self, session_id: &str) {
        if !should_notify(self.session_gate(session_id), &self.focus).await {
            return;
        }

        // Second lookup for the title; sessions are not cached between steps
        let session = fetch_session(self.sessions.as_ref(), session_id).await;
        let title = session.as_ref().and_then(|s| s.title.as_deref());

        self.dispatcher
            .send(&self.config, NotifyKind::Idle, idle_message(title));
    }

    async fn handle_session_error(&self, session_id: &str, error: Option<&str>) {
        if !should_notify(self.session_gate(session_id), &self.focus).await {
            return;
        }

        self.dispatcher
            .send(&self.config, NotifyKind::Error, error_message(error));
    }

    /// Permission requests block the agent on the user, so sub-sessions
    /// notify too. Focus still suppresses.
    async fn handle_permission_updated(&self) {
        let gate = GateOptions {
            session: None,
            config: &self.config,
            require_parent: false,
            suppress_if_focused: true,
        };
        if !should_notify(gate, &self.focus).await {
            return;
        }

        self.dispatcher
            .send(&self.config, NotifyKind::Permission, INPUT_PROMPT.to_string());
    }

    /// Questions always notify, even with the terminal focused: the user may
    /// be looking at another pane of a multiplexed view.
    fn handle_question_asked(&self) {
        self.dispatcher
            .send(&self.config, NotifyKind::Question, INPUT_PROMPT.to_string());
    }
}

/// Entry point the host talks to. On unsupported platforms every event is
/// accepted and dropped.
pub enum NotifyPlugin {
    Active(Arc<EventRouter>),
    Disabled,
}

impl NotifyPlugin {
    /// Initialize for the current platform
    pub async fn init(config: NotifyConfig, collaborators: Collaborators) -> Self {
        Self::init_for_platform(is_supported_platform(), config, collaborators).await
    }

    /// Initialize with an explicit platform check result
    pub async fn init_for_platform(
        supported: bool,
        config: NotifyConfig,
        collaborators: Collaborators,
    ) -> Self {
        if !supported {
            tracing::info!("Desktop notifications are only supported on macOS, running as no-op");
            return NotifyPlugin::Disabled;
        }
        NotifyPlugin::Active(Arc::new(EventRouter::start(config, collaborators).await))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, NotifyPlugin::Active(_))
    }

    pub fn router(&self) -> Option<&Arc<EventRouter>> {
        match self {
            NotifyPlugin::Active(router) => Some(router),
            NotifyPlugin::Disabled => None,
        }
    }

    pub async fn on_event(&self, event: &Event) {
        if let NotifyPlugin::Active(router) = self {
            router.handle_event(event).await;
        }
    }

    pub async fn on_tool_before(&self, input: &ToolInvocation) {
        if let NotifyPlugin::Active(router) = self {
            router.handle_tool_before(input).await;
        }
    }

    /// Route a payload received by the `hook` command
    pub async fn on_hook_payload(&self, payload: &HookPayload) {
        match payload {
            HookPayload::Event(raw) => match Event::from_raw(raw) {
                Some(event) => self.on_event(&event).await,
                None => tracing::debug!("Ignoring hook event {}", raw.kind),
            },
            HookPayload::Tool(tool) => self.on_tool_before(tool).await,
        }
    }

    pub async fn flush(&self) {
        if let NotifyPlugin::Active(router) = self {
            router.flush().await;
        }
    }
}
