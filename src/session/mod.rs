//! Session hierarchy resolution
//!
//! A session with no parent is a root session (the user's top-level task).
//! Sub-agent sessions carry their parent's id.

pub mod client;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Session metadata as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "parentID")]
    pub parent_id: Option<String>,
}

/// Looks up session metadata by id
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn get_session(&self, session_id: &str) -> Result<SessionInfo>;
}

/// Fetch session metadata, mapping any failure to `None`.
/// Not cached: each call is a fresh lookup.
pub async fn fetch_session(source: &dyn SessionSource, session_id: &str) -> Option<SessionInfo> {
    match source.get_session(session_id).await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::debug!("Session lookup failed for {}: {}", session_id, e);
            None
        }
    }
}

/// A session is root iff its parent id is absent or empty
pub fn is_root_from_parent(parent_id: Option<&str>) -> bool {
    parent_id.map_or(true, str::is_empty)
}

/// Whether a session is a root session. A failed lookup counts as root,
/// so an unreachable host produces a notification rather than silence.
pub async fn is_root_session(source: &dyn SessionSource, session_id: &str) -> bool {
    match fetch_session(source, session_id).await {
        Some(info) => is_root_from_parent(info.parent_id.as_deref()),
        None => true,
    }
}
