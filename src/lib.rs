//! opencode-notify - Desktop notifications for OpenCode sessions
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod events;
pub mod notify;
pub mod platform;
pub mod router;
pub mod session;
pub mod util;
