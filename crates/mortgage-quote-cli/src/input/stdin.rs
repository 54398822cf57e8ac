use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read piped stdin straight into the caller's input type.
/// Returns None on a TTY or when nothing was piped.
pub fn read_json<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse piped input: {e}"))?;
    Ok(Some(parsed))
}
