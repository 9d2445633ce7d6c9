//! Parse JSON hook input from stdin
//!
//! The `hook` command receives exactly one payload per invocation: a host
//! event or a tool invocation.

use super::HookPayload;

/// Read cap to avoid memory exhaustion on malformed input
const MAX_SIZE: usize = 1024 * 1024;

/// Read and parse a hook payload from stdin
///
/// Returns None if:
/// - stdin is a TTY (interactive terminal, no piped input)
/// - stdin is empty or not valid JSON
/// - read fails
pub fn from_stdin() -> Option<HookPayload> {
    use std::io::{IsTerminal, Read};

    // Prevents blocking when the hook is run by hand
    if std::io::stdin().is_terminal() {
        return None;
    }

    let stdin = std::io::stdin();
    let handle = stdin.lock();

    let mut buffer = Vec::with_capacity(4096);
    match handle.take(MAX_SIZE as u64).read_to_end(&mut buffer) {
        Ok(0) => return None,
        Err(_) => return None,
        Ok(_) => {}
    }

    parse(&buffer)
}

/// Parse a hook payload from raw bytes
pub fn parse(bytes: &[u8]) -> Option<HookPayload> {
    serde_json::from_slice(bytes).ok()
}
