use serde_json::Value;

/// A fully read HTTP response. 4xx/5xx statuses are ordinary responses here;
/// only transport failures surface as errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub time_ms: u64,
    pub content_type: String,
}

impl ApiResponse {
    /// Decode the body as JSON, `None` when it is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body shortened for log lines and failure messages.
    pub fn body_preview(&self, limit: usize) -> &str {
        match self.body.char_indices().nth(limit) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
            time_ms: 0,
            content_type: "application/json".into(),
        }
    }

    #[test]
    fn json_decodes_valid_body() {
        let resp = response(200, r#"{"id":"x"}"#);
        assert_eq!(resp.json().unwrap()["id"], "x");
    }

    #[test]
    fn json_is_none_for_plain_text() {
        assert!(response(404, "page not found").json().is_none());
    }

    #[test]
    fn success_covers_2xx_only() {
        assert!(response(204, "").is_success());
        assert!(!response(400, "").is_success());
    }

    #[test]
    fn body_preview_respects_char_boundaries() {
        let resp = response(200, "Сохранили объявление");
        assert_eq!(resp.body_preview(9), "Сохранили");
        assert_eq!(resp.body_preview(500), "Сохранили объявление");
    }
}
