use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Pulls the payload stored under `key` out of a response envelope and
/// decodes it.
pub fn open<T: DeserializeOwned>(body: Value, key: &'static str) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut map) => map.remove(key).ok_or(ApiError::MissingKey(key))?,
        _ => return Err(ApiError::MissingKey(key)),
    };

    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Error text carried by a failed response, if any
pub fn error_text(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(|text| text.to_string())
}
