#![forbid(unsafe_code)]

//! Wire types and the HTTP transport.
//!
//! The server exchange is a single POST of [`ChatRequest`] to the chat
//! endpoint plus a GET health probe. [`ChatTransport`] keeps the network
//! behind a trait so the widget and its tests never require a live server.

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::page::PageInfo;

/// Body POSTed to the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub current_page: PageInfo,
    /// Free-form site context (owner profile plus a request timestamp).
    pub context: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_date: Option<String>,
    /// Base64 data URL of an attached image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body returned by the chat endpoint. Every field is optional; the widget
/// falls back to a fixed message when no text is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Item ids recognized from an attached image, under the wire name the
    /// server has always used.
    #[serde(default, rename = "beer_ids_pred")]
    pub prediction_ids: Option<Vec<i64>>,
}

impl ChatResponse {
    /// Reply text: `response` preferred, `message` as the legacy fallback.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Merge the request timestamp into the configured site profile.
#[must_use]
pub fn request_context(profile: &serde_json::Value, timestamp_iso: &str) -> serde_json::Value {
    let mut context = profile.clone();
    if let serde_json::Value::Object(map) = &mut context {
        map.insert("timestamp".to_owned(), timestamp_iso.into());
        context
    } else {
        serde_json::json!({ "timestamp": timestamp_iso })
    }
}

/// The network capability the widget needs.
pub trait ChatTransport {
    /// POST a chat request; blocking.
    fn send_chat(&self, url: &str, request: &ChatRequest) -> Result<ChatResponse, ChatError>;

    /// Probe the health endpoint; `true` on a 2xx response.
    fn check_health(&self, url: &str) -> bool;
}

/// Blocking transport over `ureq`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    #[must_use]
    pub fn new(timeout: std::time::Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(30))
    }
}

impl ChatTransport for HttpTransport {
    fn send_chat(&self, url: &str, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_json(request)
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => {
                    tracing::warn!(code, "chat request rejected");
                    ChatError::Processing(format!("server error: {code}"))
                }
                ureq::Error::Transport(transport) => {
                    tracing::warn!(error = %transport, "chat request failed to reach server");
                    ChatError::Connection(transport.to_string())
                }
            })?;

        response
            .into_json::<ChatResponse>()
            .map_err(|err| ChatError::Processing(format!("invalid response body: {err}")))
    }

    fn check_health(&self, url: &str) -> bool {
        match self.agent.get(url).call() {
            Ok(response) => (200..300).contains(&response.status()),
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatRequest, ChatResponse, request_context};
    use crate::page::PageInfo;
    use pretty_assertions::assert_eq;

    fn request() -> ChatRequest {
        ChatRequest {
            message: "hi".to_owned(),
            session_id: "client-abc".to_owned(),
            current_page: PageInfo::extract("u", "/", "t"),
            context: request_context(
                &serde_json::json!({ "name": "Site Owner" }),
                "2026-02-13T00:00:00.000Z",
            ),
            context_type: None,
            paper_date: None,
            image: None,
        }
    }

    #[test]
    fn request_omits_absent_optionals() {
        let json = serde_json::to_value(request()).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("context_type"));
        assert!(!object.contains_key("paper_date"));
        assert!(!object.contains_key("image"));
        assert_eq!(json["context"]["name"], "Site Owner");
        assert_eq!(json["context"]["timestamp"], "2026-02-13T00:00:00.000Z");
    }

    #[test]
    fn request_includes_present_optionals() {
        let mut req = request();
        req.context_type = Some("paper".to_owned());
        req.paper_date = Some("2026-02-13".to_owned());
        let json = serde_json::to_value(req).expect("serialize");
        assert_eq!(json["context_type"], "paper");
        assert_eq!(json["paper_date"], "2026-02-13");
    }

    #[test]
    fn response_text_prefers_response_field() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"response":"a","message":"b"}"#).expect("parse");
        assert_eq!(parsed.text(), Some("a"));
    }

    #[test]
    fn response_text_falls_back_to_message() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"message":"b"}"#).expect("parse");
        assert_eq!(parsed.text(), Some("b"));
    }

    #[test]
    fn empty_payload_has_no_text() {
        let parsed: ChatResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(parsed.text(), None);
        let parsed: ChatResponse = serde_json::from_str(r#"{"response":""}"#).expect("parse");
        assert_eq!(parsed.text(), None);
    }

    #[test]
    fn prediction_ids_use_wire_name() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"response":"ok","beer_ids_pred":[3,7]}"#).expect("parse");
        assert_eq!(parsed.prediction_ids, Some(vec![3, 7]));
    }

    #[test]
    fn non_object_profile_still_gets_timestamp() {
        let context = request_context(&serde_json::Value::Null, "T");
        assert_eq!(context["timestamp"], "T");
    }
}
