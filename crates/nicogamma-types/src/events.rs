use std::fmt;

use serde_json::{Number, Value};

/// One entry of a recorded thread log, in record order.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadEvent {
    /// Checkpoint carrying the last response index known at that point,
    /// kept exactly as recorded.
    ThreadMeta { last_res: AttributeValue },

    /// A recorded comment.
    Chat(ChatMessage),
}

impl ThreadEvent {
    pub fn thread_meta(last_res: impl Into<AttributeValue>) -> Self {
        Self::ThreadMeta {
            last_res: last_res.into(),
        }
    }

    pub fn chat(message: ChatMessage) -> Self {
        Self::Chat(message)
    }
}

/// A recorded comment: ordered attributes plus body text.
///
/// `attributes` never contains the reserved `content` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatMessage {
    pub attributes: Vec<(String, AttributeValue)>,
    pub content: String,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            content: content.into(),
        }
    }

    /// Builder-style attribute append. `content` is routed to the body.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "content" {
            self.content = value.to_string();
        } else {
            self.attributes.push((key, value));
        }
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// A chat attribute value. Records are dynamically typed; only strings and
/// numbers are representable on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Number(Number),
}

impl AttributeValue {
    /// Returns `None` for JSON values that cannot become an XML attribute.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => {
                if n.is_f64() {
                    // integral floats render without a trailing ".0"
                    if let Some(v) = n.as_f64().filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15) {
                        return write!(f, "{}", v as i64);
                    }
                }
                write!(f, "{}", n)
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}
