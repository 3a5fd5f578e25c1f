use chrono::{DateTime, Local, Utc};

use crate::common::{GuestbookMessage, Timestamp};

/// A message ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub name: String,
    pub text: String,
    pub when: String,
}

/// Turn board messages into display rows, keeping their order.
pub fn render_messages(messages: &[GuestbookMessage], now: DateTime<Utc>) -> Vec<RenderedMessage> {
    messages
        .iter()
        .map(|message| RenderedMessage {
            name: message.display_name().to_string(),
            text: message.display_text().to_string(),
            when: format_timestamp(message.timestamp.as_ref(), now),
        })
        .collect()
}

/// Relative age for recent messages, a local date and time for older ones.
pub fn format_timestamp(timestamp: Option<&Timestamp>, now: DateTime<Utc>) -> String {
    let timestamp = match timestamp {
        None | Some(Timestamp::Epoch(0)) => return String::new(),
        Some(timestamp) => timestamp,
    };
    let Some(date) = timestamp.to_datetime() else {
        return match timestamp {
            Timestamp::Text(text) => text.clone(),
            Timestamp::Epoch(_) => String::new(),
        };
    };

    let elapsed = now.signed_duration_since(date);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 7 {
        ago(days, "day")
    } else {
        date.with_timezone(&Local)
            .format("%b %-d, %Y %H:%M")
            .to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{plural} ago")
}
