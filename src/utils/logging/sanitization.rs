use std::collections::HashMap;

/// Replacement for redacted values
pub const REDACTED: &str = "***REDACTED***";

const SENSITIVE_HEADERS: [&str; 5] = [
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "proxy-authorization",
];

/// Whether a header carries credentials
pub fn is_sensitive_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SENSITIVE_HEADERS.contains(&lower.as_str())
        || lower.contains("token")
        || lower.contains("secret")
}

/// Copy of `headers` with credential values masked, sorted for stable output
pub fn redact_headers(headers: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut redacted: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let value = if is_sensitive_header(name) {
                REDACTED.to_string()
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect();
    redacted.sort();
    redacted
}
