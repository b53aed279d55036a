//! Identifier extraction from creation responses.
//!
//! The service does not answer item creation with a fixed schema. Depending
//! on version and deployment the body is `{"id": ...}`,
//! `{"status": "Сохранили объявление - <uuid>"}` or a `result` string with the
//! identifier embedded in it. [`classify`] maps a body onto one of those
//! shapes and [`extract_id`] reads the identifier out of it.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("UUID pattern is a valid regex")
});

/// Opaque key of an item on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Shape of a creation response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationResponse {
    /// `id` key present; the value is kept verbatim. `None` for `"id": null`.
    DirectId(Option<ResourceId>),
    /// UUID found inside the `status` string.
    StatusEmbedded(ResourceId),
    /// UUID found inside the `result` string.
    ResultEmbedded(ResourceId),
    Unrecognized,
}

/// First UUID-shaped substring of `text`, case preserved.
pub fn find_uuid(text: &str) -> Option<&str> {
    UUID_PATTERN.find(text).map(|m| m.as_str())
}

pub fn classify(body: &Value) -> CreationResponse {
    let Some(object) = body.as_object() else {
        return CreationResponse::Unrecognized;
    };

    if let Some(id) = object.get("id") {
        return CreationResponse::DirectId(verbatim_id(id));
    }

    if let Some(id) = embedded_uuid(object.get("status")) {
        return CreationResponse::StatusEmbedded(id);
    }

    if let Some(id) = embedded_uuid(object.get("result")) {
        return CreationResponse::ResultEmbedded(id);
    }

    CreationResponse::Unrecognized
}

/// Identifier carried by a creation response, if any. Never fails.
pub fn extract_id(body: &Value) -> Option<ResourceId> {
    match classify(body) {
        CreationResponse::DirectId(id) => id,
        CreationResponse::StatusEmbedded(id) | CreationResponse::ResultEmbedded(id) => Some(id),
        CreationResponse::Unrecognized => None,
    }
}

fn verbatim_id(value: &Value) -> Option<ResourceId> {
    match value {
        Value::Null => None,
        Value::String(raw) => Some(ResourceId::new(raw.as_str())),
        other => Some(ResourceId::new(other.to_string())),
    }
}

fn embedded_uuid(value: Option<&Value>) -> Option<ResourceId> {
    value
        .and_then(Value::as_str)
        .and_then(find_uuid)
        .map(ResourceId::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UUID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn direct_id_is_returned_verbatim() {
        let body = json!({"id": "abc-123"});
        assert_eq!(extract_id(&body), Some(ResourceId::from("abc-123")));
    }

    #[test]
    fn direct_id_wins_over_other_keys() {
        let body = json!({
            "id": "plain",
            "status": format!("Сохранили объявление - {UUID}"),
            "result": UUID,
        });
        assert_eq!(extract_id(&body).unwrap().as_str(), "plain");
    }

    #[test]
    fn numeric_id_keeps_its_json_text() {
        assert_eq!(extract_id(&json!({"id": 42})).unwrap().as_str(), "42");
    }

    #[test]
    fn null_id_is_absent() {
        assert_eq!(classify(&json!({"id": null})), CreationResponse::DirectId(None));
        assert_eq!(extract_id(&json!({"id": null, "status": UUID})), None);
    }

    #[test]
    fn uuid_is_found_in_status_message() {
        let body = json!({"status": format!("Сохранили объявление - {UUID}")});
        assert_eq!(
            classify(&body),
            CreationResponse::StatusEmbedded(ResourceId::from(UUID))
        );
        assert_eq!(extract_id(&body).unwrap().as_str(), UUID);
    }

    #[test]
    fn status_match_preserves_case() {
        let upper = UUID.to_uppercase();
        let body = json!({"status": format!("saved {upper}")});
        assert_eq!(extract_id(&body).unwrap().as_str(), upper);
    }

    #[test]
    fn first_uuid_in_status_wins() {
        let second = "00000000-0000-0000-0000-000000000001";
        let body = json!({"status": format!("{UUID} then {second}")});
        assert_eq!(extract_id(&body).unwrap().as_str(), UUID);
    }

    #[test]
    fn status_without_uuid_falls_through_to_result() {
        let body = json!({"status": "ok", "result": format!("created {UUID}")});
        assert_eq!(
            classify(&body),
            CreationResponse::ResultEmbedded(ResourceId::from(UUID))
        );
    }

    #[test]
    fn non_string_status_falls_through_to_result() {
        let body = json!({"status": 200, "result": UUID});
        assert_eq!(extract_id(&body).unwrap().as_str(), UUID);
    }

    #[test]
    fn result_without_uuid_is_absent() {
        assert_eq!(extract_id(&json!({"result": "no-uuid-here"})), None);
    }

    #[test]
    fn non_string_result_is_absent() {
        assert_eq!(extract_id(&json!({"result": {"id": UUID}})), None);
    }

    #[test]
    fn non_documents_are_absent() {
        assert_eq!(extract_id(&json!("not a document")), None);
        assert_eq!(extract_id(&json!([{"id": "x"}])), None);
        assert_eq!(extract_id(&Value::Null), None);
    }

    #[test]
    fn unrelated_keys_are_unrecognized() {
        assert_eq!(
            classify(&json!({"message": UUID})),
            CreationResponse::Unrecognized
        );
    }

    #[test]
    fn truncated_uuid_is_not_matched() {
        assert_eq!(find_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa"), None);
    }

    #[test]
    fn extraction_is_repeatable() {
        let body = json!({"status": format!("Сохранили объявление - {UUID}")});
        assert_eq!(extract_id(&body), extract_id(&body));
    }
}
