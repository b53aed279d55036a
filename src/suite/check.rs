use std::fmt::{self, Display};

use serde_json::Value;

use crate::error::ClientError;
use crate::extract::{ResourceId, extract_id};
use crate::http::ApiResponse;

const PREVIEW_CHARS: usize = 200;

/// A failed expectation inside a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub message: String,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ClientError> for CheckFailure {
    fn from(err: ClientError) -> Self {
        Self::new(err.to_string())
    }
}

pub type CheckResult<T = ()> = Result<T, CheckFailure>;

pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(CheckFailure::new(message()))
    }
}

/// Status must be one of `allowed`.
pub fn expect_status(response: &ApiResponse, allowed: &[u16]) -> CheckResult {
    if allowed.contains(&response.status) {
        return Ok(());
    }

    let expected = match allowed {
        [single] => single.to_string(),
        many => format!(
            "one of [{}]",
            many.iter().map(u16::to_string).collect::<Vec<_>>().join(", ")
        ),
    };
    Err(CheckFailure::new(format!(
        "Expected {expected}, got {}: {}",
        response.status,
        response.body_preview(PREVIEW_CHARS)
    )))
}

pub fn expect_json(response: &ApiResponse) -> CheckResult<Value> {
    response.json().ok_or_else(|| {
        CheckFailure::new(format!(
            "Response body is not JSON: {}",
            response.body_preview(PREVIEW_CHARS)
        ))
    })
}

pub fn expect_list(value: &Value) -> CheckResult<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CheckFailure::new(format!("Expected a JSON list, got: {value}")))
}

pub fn expect_list_or_document(value: &Value) -> CheckResult {
    ensure(value.is_array() || value.is_object(), || {
        format!("Expected a JSON list or document, got: {value}")
    })
}

/// Decode a creation response and pull the item identifier out of it.
pub fn expect_created_id(response: &ApiResponse) -> CheckResult<ResourceId> {
    let body = expect_json(response)?;
    extract_id(&body).ok_or_else(|| {
        CheckFailure::new(format!("Could not extract ID from response: {body}"))
    })
}

/// Whether a fetched item body refers to `id`: either through its `id`
/// field (first element for lists) or anywhere in its text.
pub fn mentions_id(body: &Value, id: &ResourceId) -> bool {
    let direct = match body {
        Value::Array(items) => items.first().and_then(|item| item.get("id")),
        other => other.get("id"),
    };
    let direct_match = match body {
        Value::Array(_) => direct.and_then(Value::as_str) == Some(id.as_str()),
        _ => direct.is_some(),
    };
    direct_match || body.to_string().contains(id.as_str())
}
