use serde_json::{Map, Value};

use crate::config::AI_CONFIDENCE_DEFAULT;
use crate::models::extraction::{KEY_CONFIDENCE, RECORD_KEYS};
use crate::services::ai::RawResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseContent {
    Mapping(Map<String, Value>),
    Text(String),
    Unknown,
}

impl ResponseContent {
    // None: no output, or no content in the first output item.
    pub fn from_raw(raw: &RawResponse) -> Option<Self> {
        let part = raw.output.first()?.content.first()?;
        Some(Self::from_part(part))
    }

    fn from_part(part: &Value) -> Self {
        let Value::Object(obj) = part else {
            return ResponseContent::Unknown;
        };

        // Typed parts ("output_text", "refusal", ...) carry a "type" tag.
        // Anything else is the payload itself.
        if !matches!(obj.get("type"), Some(Value::String(_))) {
            return ResponseContent::Mapping(obj.clone());
        }

        match obj.get("text") {
            Some(Value::String(text)) => ResponseContent::Text(text.clone()),
            _ => ResponseContent::Unknown,
        }
    }
}

/// Parses the span from the first `{` to the last `}` as JSON.
///
/// No other repair is attempted: text holding two separate objects yields the
/// span covering both, which normally fails to parse.
pub fn recover_json(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

pub fn harden(map: &mut Map<String, Value>) {
    for key in RECORD_KEYS {
        if !map.contains_key(key) {
            let default = if key == KEY_CONFIDENCE {
                Value::from(AI_CONFIDENCE_DEFAULT)
            } else {
                Value::Null
            };
            map.insert(key.to_string(), default);
        }
    }
}
