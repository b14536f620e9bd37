//! Response normalization

use crate::core::request::ResponseEnvelope;
use crate::utils::net::TransportResponse;
use serde_json::Value;

/// Turn a raw transport response into an envelope.
///
/// Success bodies shaped like `{ "data": .., "message": .. }` are unwrapped;
/// a body carrying `"success": false` is treated as a failure even on a 2xx.
/// Error statuses keep the decoded body as `data` so callers can inspect it.
pub fn parse_response(response: TransportResponse) -> ResponseEnvelope {
    let status = response.status;
    let body = match decode_body(&response) {
        Ok(body) => body,
        Err(e) => {
            if response.is_success() {
                return ResponseEnvelope::failure(format!("Failed to parse response body: {}", e));
            }
            let text = String::from_utf8_lossy(&response.body).into_owned();
            return ResponseEnvelope::failure_with_data(format!("HTTP {}", status), Value::String(text));
        }
    };

    if response.is_success() {
        match body {
            None => ResponseEnvelope::empty(),
            Some(value) => unwrap_success(value),
        }
    } else {
        let error = body
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("HTTP {}", status));
        match body {
            Some(value) => ResponseEnvelope::failure_with_data(error, value),
            None => ResponseEnvelope::failure(error),
        }
    }
}

fn decode_body(response: &TransportResponse) -> Result<Option<Value>, serde_json::Error> {
    if response.body.is_empty() {
        return Ok(None);
    }

    if response.is_json() {
        serde_json::from_slice(&response.body).map(Some)
    } else {
        let text = String::from_utf8_lossy(&response.body).into_owned();
        Ok(Some(Value::String(text)))
    }
}

fn unwrap_success(value: Value) -> ResponseEnvelope {
    let Value::Object(mut map) = value else {
        return ResponseEnvelope::ok(value);
    };

    if map.get("success") == Some(&Value::Bool(false)) {
        let error = error_message(&Value::Object(map.clone()))
            .unwrap_or_else(|| "Request failed".to_string());
        return ResponseEnvelope::failure_with_data(error, Value::Object(map));
    }

    if !map.contains_key("data") {
        return ResponseEnvelope::ok(Value::Object(map));
    }

    let message = match map.remove("message") {
        Some(Value::String(message)) => Some(message),
        _ => None,
    };
    let envelope = match map.remove("data") {
        Some(Value::Null) | None => ResponseEnvelope::empty(),
        Some(data) => ResponseEnvelope::ok(data),
    };
    envelope.with_message(message)
}

fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Object(map) => match map.get("error") {
            Some(Value::String(error)) => Some(error.clone()),
            Some(Value::Object(error)) => error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => map.get("message").and_then(Value::as_str).map(str::to_string),
        },
        _ => None,
    }
}
