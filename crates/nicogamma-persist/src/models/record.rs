use nicogamma_types::{AttributeValue, ChatMessage, ThreadEvent};
use serde_json::{Map, Value};

use crate::error::{PersistError, Result};

/// Decode a recorded thread log.
///
/// The file must hold a JSON array. Individual entries that cannot be
/// represented on the wire are dropped with a warning instead of failing the
/// whole record.
pub fn parse_thread_record(thread_id: u64, raw: &str) -> Result<Vec<ThreadEvent>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = value else {
        return Err(PersistError::InvalidRecord {
            thread_id,
            reason: "expected a JSON array of events".to_string(),
        });
    };

    let mut events = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_thread_entry(entry) {
            Some(event) => events.push(event),
            None => {
                tracing::warn!(thread_id, index, entry = %entry, "Skipping malformed record entry");
            }
        }
    }
    Ok(events)
}

/// Decode one `{ "thread": {...} }` or `{ "chat": {...} }` entry.
pub fn parse_thread_entry(entry: &Value) -> Option<ThreadEvent> {
    let entry = entry.as_object()?;

    if let Some(meta) = entry.get("thread") {
        let last_res = meta.get("last_res").and_then(AttributeValue::from_json)?;
        return Some(ThreadEvent::thread_meta(last_res));
    }

    entry
        .get("chat")
        .and_then(Value::as_object)
        .map(|chat| ThreadEvent::chat(parse_chat(chat)))
}

fn parse_chat(chat: &Map<String, Value>) -> ChatMessage {
    let mut message = ChatMessage::default();

    for (key, raw) in chat {
        let Some(value) = AttributeValue::from_json(raw) else {
            tracing::warn!(attribute = %key, value = %raw, "Dropping non-serializable chat attribute");
            continue;
        };
        if key == "content" {
            message.content = value.to_string();
        } else {
            message.attributes.push((key.clone(), value));
        }
    }

    message
}
