//! Response shapes the remote endpoint is known to produce.
//!
//! The endpoint has changed hands a few times, so listing accepts a bare
//! array, `{status, data}` and `{messages}`; submission accepts
//! `{status: "success"}` and `{success: true, row}`.

use serde::Deserialize;
use serde_json::Value;

use crate::common::{GuestbookMessage, SubmitReceipt};
use crate::error::GuestbookError;

const SUBMIT_FALLBACK: &str = "Failed to send message";

/// Decoded answer to a listing request.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// Records in the order the endpoint sent them.
    Messages(Vec<GuestbookMessage>),
    /// A non-"success" status, e.g. a wrong password.
    Rejected(Option<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<GuestbookMessage>),
    Envelope(ListEnvelope),
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Vec<GuestbookMessage>>,
    #[serde(default)]
    messages: Option<Vec<GuestbookMessage>>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct SubmitBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    row: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

fn is_success(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("success")
}

/// First non-blank string among the server's explanatory fields.
fn server_text(candidates: [Option<Value>; 2]) -> Option<String> {
    candidates.into_iter().flatten().find_map(|value| match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

pub fn decode_list(body: &str) -> Result<ListOutcome, GuestbookError> {
    match serde_json::from_str::<ListBody>(body)? {
        ListBody::Bare(messages) => Ok(ListOutcome::Messages(messages)),
        ListBody::Envelope(envelope) => {
            if let Some(status) = envelope.status.as_deref() {
                if !is_success(status) {
                    return Ok(ListOutcome::Rejected(server_text([
                        envelope.message,
                        envelope.error,
                    ])));
                }
            }
            let messages = envelope
                .data
                .or(envelope.messages)
                .unwrap_or_default();
            Ok(ListOutcome::Messages(messages))
        }
    }
}

pub fn decode_submit(body: &str) -> Result<SubmitReceipt, GuestbookError> {
    let parsed: SubmitBody = serde_json::from_str(body)?;
    let accepted = parsed.status.as_deref().is_some_and(is_success) || parsed.success == Some(true);

    if !accepted {
        let reason = server_text([parsed.message, parsed.error])
            .unwrap_or_else(|| SUBMIT_FALLBACK.to_string());
        return Err(GuestbookError::Application(reason));
    }

    let row = parsed.row.and_then(|row| match row {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    });
    Ok(SubmitReceipt { row })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(outcome: ListOutcome) -> Vec<String> {
        match outcome {
            ListOutcome::Messages(messages) => messages
                .iter()
                .map(|message| message.display_name().to_string())
                .collect(),
            other => panic!("expected messages, got {other:?}"),
        }
    }

    #[test]
    fn accepts_every_listing_shape() {
        let enveloped = r#"{"status":"success","data":[{"name":"A","message":"hi"}]}"#;
        let bare = r#"[{"name":"A","message":"hi"}]"#;
        let keyed = r#"{"messages":[{"name":"A","message":"hi"}]}"#;

        for body in [enveloped, bare, keyed] {
            assert_eq!(names(decode_list(body).unwrap()), vec!["A"]);
        }
    }

    #[test]
    fn success_without_data_is_empty() {
        let outcome = decode_list(r#"{"status":"success"}"#).unwrap();
        assert_eq!(outcome, ListOutcome::Messages(Vec::new()));
    }

    #[test]
    fn non_success_status_is_rejected() {
        let outcome = decode_list(r#"{"status":"error","message":"Invalid password"}"#).unwrap();
        assert_eq!(outcome, ListOutcome::Rejected(Some("Invalid password".into())));

        let silent = decode_list(r#"{"status":"unauthorized"}"#).unwrap();
        assert_eq!(silent, ListOutcome::Rejected(None));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_list("<html>Moved</html>").unwrap_err();
        assert!(matches!(err, GuestbookError::Decode(_)));
    }

    #[test]
    fn submit_accepts_both_success_shapes() {
        assert_eq!(
            decode_submit(r#"{"status":"success"}"#).unwrap(),
            SubmitReceipt { row: None }
        );
        assert_eq!(
            decode_submit(r#"{"success":true,"row":17}"#).unwrap(),
            SubmitReceipt { row: Some(17) }
        );
    }

    #[test]
    fn submit_failure_carries_server_text_or_fallback() {
        match decode_submit(r#"{"status":"error","message":"Sheet locked"}"#) {
            Err(GuestbookError::Application(text)) => assert_eq!(text, "Sheet locked"),
            other => panic!("unexpected {other:?}"),
        }
        match decode_submit(r#"{"success":false}"#) {
            Err(GuestbookError::Application(text)) => assert_eq!(text, "Failed to send message"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
