//! Response extraction from structured CLI output.

/// JSON fields tried, in order, when extracting a response from stdout.
pub const RESPONSE_FIELDS: &[&str] = &["result", "response", "output"];

/// Normalize successful stdout into a response string.
///
/// When `structured` is set and stdout is a JSON object carrying a string in
/// one of [`RESPONSE_FIELDS`], that string is returned. Otherwise stdout is
/// returned verbatim.
pub(crate) fn normalize_output(stdout: &str, structured: bool) -> String {
    if structured {
        if let Some(response) = extract_response(stdout) {
            return response;
        }
    }
    stdout.to_string()
}

fn extract_response(stdout: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).ok()?;
    let object = value.as_object()?;
    RESPONSE_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(|v| v.as_str()))
        .map(str::to_string)
}
