// RouterOS REST payload handling
//
// Successful responses are either one JSON object (menus with a single
// entry such as `/system/resource`) or an array of objects. Attribute
// values are nearly always strings; anything scalar is stringified and
// nested values are dropped. Failures carry a small error envelope.

use serde::Deserialize;

use crate::session::Record;

/// Error envelope returned by the REST API on non-2xx responses.
///
/// ```json
/// { "error": 400, "message": "Bad Request", "detail": "no such command" }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Human-readable summary: `"message: detail"`, or whichever is present.
    pub fn summary(&self) -> String {
        match (self.message.as_deref(), self.detail.as_deref()) {
            (Some(msg), Some(detail)) => format!("{msg}: {detail}"),
            (Some(msg), None) => msg.to_owned(),
            (None, Some(detail)) => detail.to_owned(),
            (None, None) => format!("error {}", self.error),
        }
    }
}

/// Flatten a decoded JSON body into records.
///
/// Returns `None` when the body is neither an object nor an array.
pub(crate) fn records_from_json(value: serde_json::Value) -> Option<Vec<Record>> {
    match value {
        serde_json::Value::Object(map) => Some(vec![record_from_object(map)]),
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(map) => Some(record_from_object(map)),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn record_from_object(map: serde_json::Map<String, serde_json::Value>) -> Record {
    map.into_iter()
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
        .collect()
}

fn scalar_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}
