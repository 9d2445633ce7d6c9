//! Notification configuration
//!
//! Built-in defaults, optionally overridden by a user file at
//! `~/.config/opencode/notify.json`. The file is read once at startup and the
//! resolved value is never mutated afterwards.

use crate::notify::NotifyKind;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const DEFAULT_TERMINAL_APP: &str = "Ghostty";

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyConfig {
    /// Notify for child/sub-session events
    pub notify_child_sessions: bool,
    /// Application whose focus suppresses notifications and which a click activates
    pub terminal_app: String,
    pub sounds: SoundConfig,
}

/// Sound names per event kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundConfig {
    pub idle: String,
    pub error: String,
    pub permission: String,
    /// Falls back to `permission` when unset (resolved at read time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            notify_child_sessions: false,
            terminal_app: DEFAULT_TERMINAL_APP.to_string(),
            sounds: SoundConfig::default(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            idle: "Blow".to_string(),
            error: "Basso".to_string(),
            permission: "Submarine".to_string(),
            question: None,
        }
    }
}

/// User override file contents. Every key is optional.
///
/// Built from untyped JSON: known keys holding a value of the right type are
/// taken, everything else (unknown keys, `null`, wrong types) is ignored, so
/// one bad key never discards the rest of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub notify_child_sessions: Option<bool>,
    pub terminal_app: Option<String>,
    pub sounds: Option<PartialSounds>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSounds {
    pub idle: Option<String>,
    pub error: Option<String>,
    pub permission: Option<String>,
    pub question: Option<String>,
}

impl PartialConfig {
    /// Extract overrides from a parsed JSON document. A non-object document
    /// yields no overrides.
    pub fn from_value(value: &Value) -> Self {
        let string_at =
            |v: &Value, key: &str| v.get(key).and_then(Value::as_str).map(str::to_string);

        let sounds = value
            .get("sounds")
            .filter(|s| s.is_object())
            .map(|s| PartialSounds {
                idle: string_at(s, "idle"),
                error: string_at(s, "error"),
                permission: string_at(s, "permission"),
                question: string_at(s, "question"),
            });

        Self {
            notify_child_sessions: value.get("notifyChildSessions").and_then(Value::as_bool),
            terminal_app: string_at(value, "terminalApp"),
            sounds,
        }
    }
}

/// Overlay user overrides on a base configuration.
///
/// Top-level keys replace the base; `sounds` is merged key by key so
/// unspecified sounds keep their base value.
pub fn merge_config(base: &NotifyConfig, overrides: &PartialConfig) -> NotifyConfig {
    let sounds = match &overrides.sounds {
        Some(user) => SoundConfig {
            idle: user.idle.clone().unwrap_or_else(|| base.sounds.idle.clone()),
            error: user.error.clone().unwrap_or_else(|| base.sounds.error.clone()),
            permission: user
                .permission
                .clone()
                .unwrap_or_else(|| base.sounds.permission.clone()),
            question: user.question.clone().or_else(|| base.sounds.question.clone()),
        },
        None => base.sounds.clone(),
    };

    NotifyConfig {
        notify_child_sessions: overrides
            .notify_child_sessions
            .unwrap_or(base.notify_child_sessions),
        terminal_app: overrides
            .terminal_app
            .clone()
            .unwrap_or_else(|| base.terminal_app.clone()),
        sounds,
    }
}

/// Sound to play for an event kind
pub fn get_sound(config: &NotifyConfig, kind: NotifyKind) -> &str {
    match kind {
        NotifyKind::Idle => &config.sounds.idle,
        NotifyKind::Error => &config.sounds.error,
        NotifyKind::Permission => &config.sounds.permission,
        NotifyKind::Question => config
            .sounds
            .question
            .as_deref()
            .unwrap_or(&config.sounds.permission),
    }
}

/// Well-known location of the user override file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("opencode").join("notify.json"))
}

/// Read and parse a user override file. A read failure or invalid JSON yields `None`.
pub fn read_overrides(path: &Path) -> Option<PartialConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("No notify config at {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(value) => Some(PartialConfig::from_value(&value)),
        Err(e) => {
            tracing::debug!("Ignoring malformed notify config {}: {}", path.display(), e);
            None
        }
    }
}

/// Load configuration from a specific file, falling back to defaults
pub fn load_from_path(path: &Path) -> NotifyConfig {
    let defaults = NotifyConfig::default();
    match read_overrides(path) {
        Some(overrides) => merge_config(&defaults, &overrides),
        None => defaults,
    }
}

/// Load configuration. Never fails: a missing home directory, missing file or
/// malformed JSON all resolve to the defaults.
pub fn load(path: Option<&Path>) -> NotifyConfig {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => return NotifyConfig::default(),
        },
    };
    load_from_path(&path)
}

/// Write the default configuration to `path`.
///
/// Returns `Ok(false)` without touching the file if it exists and `force` is unset.
pub fn write_defaults(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(&NotifyConfig::default())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(true)
}
