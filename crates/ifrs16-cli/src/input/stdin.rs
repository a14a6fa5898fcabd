use std::io::{self, Read};

use ifrs16_core::LeaseTerms;

/// Read lease terms piped on stdin as JSON.
///
/// Returns None when stdin is a TTY or the pipe is empty.
pub fn read_stdin() -> Result<Option<LeaseTerms>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "reading lease terms from stdin");
    let terms: LeaseTerms = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse lease terms from stdin: {}", e))?;
    Ok(Some(terms))
}
