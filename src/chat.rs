//! Chat wire payload and event-stream parsing.
//!
//! The chat endpoint answers with a line-delimited event stream. Frames that
//! carry a `text` field are content; frames carrying `sid` identify the
//! conversation turns (first the user turn, second the assistant turn, which
//! is the synthesis reference for the voice call). Everything else is control
//! noise and is discarded. Parsing is deliberately tolerant of minor upstream
//! format drift: content comes from per-line JSON, identifiers from a raw
//! pattern scan, so a new unrecognized frame type never breaks the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Wire payload for the chat endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub text: &'a str,
    pub conversation: &'a str,
}

/// Everything extracted from one chat response body.
#[derive(Debug)]
pub(crate) struct StreamPayload {
    /// Content fragments concatenated in arrival order. Non-empty.
    pub text: String,
    /// All `sid` values in arrival order.
    pub sids: Vec<String>,
}

impl StreamPayload {
    /// The synthesis reference: the assistant turn's sid, which arrives
    /// second (the first belongs to the user turn).
    pub fn message_sid(&self) -> Option<&str> {
        self.sids.get(1).map(String::as_str)
    }
}

static SID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""sid"\s*:\s*"([^"]*)""#).expect("static sid pattern"));

/// Parse a raw chat response body into concatenated content and sids.
///
/// Contract: given the raw body, return the assembled text or fail. An empty
/// assembled text is a failure (`ApiConnection`), never an empty success; an
/// upstream that returns nothing is indistinguishable from a broken
/// integration. Embedded `error` frames fail with the matching kind.
pub(crate) fn parse_event_stream(raw: &str) -> Result<StreamPayload> {
    let mut text = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(':') {
            continue;
        }
        let payload = trimmed
            .strip_prefix("data: ")
            .or_else(|| trimmed.strip_prefix("data:"))
            .unwrap_or(trimmed);

        let Ok(value) = serde_json::from_str::<Value>(payload) else {
            // Event markers and other non-JSON control lines.
            continue;
        };
        if let Some(err) = embedded_error(&value) {
            return Err(err);
        }
        if let Some(fragment) = value.get("text").and_then(Value::as_str) {
            text.push_str(fragment);
        }
    }

    if text.is_empty() {
        return Err(Error::api_connection(
            "no content received from upstream chat response",
        ));
    }

    let sids = SID_PATTERN
        .captures_iter(raw)
        .map(|c| c[1].to_string())
        .collect();

    Ok(StreamPayload { text, sids })
}

/// An `error` frame embedded in an otherwise 2xx stream. One that names the
/// session or authentication means the credentials are stale; anything else
/// is a generic upstream failure.
fn embedded_error(value: &Value) -> Option<Error> {
    let detail = match value.get("error")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let lowered = detail.to_lowercase();
    if lowered.contains("session") || lowered.contains("auth") {
        Some(Error::session_expired(detail))
    } else {
        Some(Error::api_connection(format!(
            "upstream signaled an error: {detail}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_text_fragments_in_order() {
        let raw = concat!(
            "data: {\"sid\":\"user-1\",\"title\":\"greeting\"}\n",
            "\n",
            "data: {\"text\":\"Hello\"}\n",
            "data: {\"text\":\" there!\"}\n",
            "data: {\"sid\":\"assistant-2\"}\n",
        );
        let payload = parse_event_stream(raw).unwrap();
        assert_eq!(payload.text, "Hello there!");
        assert_eq!(payload.sids, vec!["user-1", "assistant-2"]);
        assert_eq!(payload.message_sid(), Some("assistant-2"));
    }

    #[test]
    fn discards_control_noise() {
        let raw = concat!(
            ": keep-alive\n",
            "event: message\n",
            "data: {\"heartbeat\":true}\n",
            "data: {\"text\":\"ok\"}\n",
        );
        let payload = parse_event_stream(raw).unwrap();
        assert_eq!(payload.text, "ok");
        assert!(payload.sids.is_empty());
        assert!(payload.message_sid().is_none());
    }

    #[test]
    fn tolerates_missing_space_after_data_prefix() {
        let payload = parse_event_stream("data:{\"text\":\"tight\"}\n").unwrap();
        assert_eq!(payload.text, "tight");
    }

    #[test]
    fn empty_content_is_a_connection_failure() {
        let err = parse_event_stream(": keep-alive\n\n").unwrap_err();
        assert!(err.is_api_connection());
        assert!(err.message().contains("no content received"));
    }

    #[test]
    fn session_error_frame_is_classified() {
        let raw = "data: {\"error\":\"session is no longer valid\"}\n";
        assert!(parse_event_stream(raw).unwrap_err().is_session_expired());

        let raw = "data: {\"error\":\"model overloaded\"}\n";
        assert!(parse_event_stream(raw).unwrap_err().is_api_connection());
    }

    #[test]
    fn chat_request_serializes_to_upstream_shape() {
        let body = serde_json::to_value(ChatRequest {
            text: "Hello",
            conversation: "conv-1",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"text": "Hello", "conversation": "conv-1"})
        );
    }
}
