use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read a piped JSON document, typically a saved `RawInputs` form.
///
/// `None` means nothing was piped: stdin is a terminal or the pipe is blank,
/// and the caller falls back to flags and saved state.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;
    if piped.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&piped)
        .map(Some)
        .map_err(|e| format!("stdin is not a valid form: {e}").into())
}
