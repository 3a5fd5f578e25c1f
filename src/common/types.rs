use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const FALLBACK_NAME: &str = "Anonymous";

/// One guestbook record as served by the remote endpoint.
///
/// Records come from a spreadsheet, so every field is optional and loosely
/// typed: numbers and bools in text columns are accepted as their text form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestbookMessage {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Timestamp>,
}

impl GuestbookMessage {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => FALLBACK_NAME,
        }
    }

    pub fn display_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// When a record was written. Epoch values are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Text(String),
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(millis) => Utc.timestamp_millis_opt(*millis).single(),
            Timestamp::Text(text) => parse_text_timestamp(text.trim()),
        }
    }
}

fn parse_text_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .map(Timestamp::Epoch),
        Some(Value::String(text)) if !text.trim().is_empty() => Some(Timestamp::Text(text)),
        _ => None,
    })
}

/// Body of a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub message: String,
}

/// What the endpoint returned for an accepted submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitReceipt {
    /// Spreadsheet row the entry landed in, when the endpoint reports it.
    pub row: Option<i64>,
}

/// How a submission is confirmed to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendMode {
    /// Wait for the endpoint's answer before reporting success.
    #[default]
    Confirmed,
    /// Report success immediately; the request is fire-and-forget.
    Optimistic,
}
