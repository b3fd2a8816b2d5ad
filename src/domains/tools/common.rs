//! Result envelope helpers shared by every tool.
//!
//! All tool call paths end in one of two shapes:
//! - success: one text item holding the pretty-printed JSON, `isError` absent
//! - failure: one text item `Error: <message>`, `isError: true`

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

use super::error::ToolError;

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(content)]);
    result.is_error = None;
    result
}

/// Create an error result with a formatted message.
pub fn error_result(message: impl Display) -> CallToolResult {
    let text = format!("Error: {}", message);
    warn!("{}", text);
    CallToolResult::error(vec![Content::text(text)])
}

/// Wrap a remote JSON body in an envelope.
///
/// Bodies whose top-level `error` field is set are reported as failures
/// with that message. `null`, `false`, `0` and `""` count as unset.
pub fn json_result(body: &Value) -> CallToolResult {
    if let Some(error) = body.get("error").filter(|e| is_set(e)) {
        return match error.as_str() {
            Some(message) => error_result(message),
            None => error_result(error),
        };
    }

    match serde_json::to_string_pretty(body) {
        Ok(text) => success_result(text),
        Err(e) => error_result(e),
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Await a remote call and convert its outcome into an envelope.
pub async fn invoke_and_envelope<F, E>(call: F) -> CallToolResult
where
    F: Future<Output = Result<Value, E>>,
    E: Display,
{
    match call.await {
        Ok(body) => json_result(&body),
        Err(e) => error_result(e),
    }
}

/// Deserialize a validated argument map into a typed struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}
