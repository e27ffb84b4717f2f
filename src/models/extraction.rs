use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AI_CONFIDENCE_DEFAULT;

pub const KEY_NAME: &str = "nome";
pub const KEY_SURNAME: &str = "cognome";
pub const KEY_PARTY_SIZE: &str = "persone";
pub const KEY_DATE_TEXT: &str = "data_testuale";
pub const KEY_TIME: &str = "ora";
pub const KEY_CONFIDENCE: &str = "confidence";

pub const RECORD_KEYS: [&str; 6] = [
    KEY_NAME,
    KEY_SURNAME,
    KEY_PARTY_SIZE,
    KEY_DATE_TEXT,
    KEY_TIME,
    KEY_CONFIDENCE,
];

/// `date_text` is the customer's own wording ("sabato", "domani sera"), never a
/// resolved calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionRecord {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "cognome")]
    pub surname: Option<String>,
    #[serde(rename = "persone")]
    pub party_size: Option<i64>,
    #[serde(rename = "data_testuale")]
    pub date_text: Option<String>,
    #[serde(rename = "ora")]
    pub time: Option<String>,
    pub confidence: f64,
}

impl Default for ExtractionRecord {
    fn default() -> Self {
        Self {
            name: None,
            surname: None,
            party_size: None,
            date_text: None,
            time: None,
            confidence: AI_CONFIDENCE_DEFAULT,
        }
    }
}

impl ExtractionRecord {
    // Wrong-typed values become None (confidence: the default). Extra keys are ignored.
    pub fn from_hardened(map: &Map<String, Value>) -> Self {
        Self {
            name: text_field(map.get(KEY_NAME)),
            surname: text_field(map.get(KEY_SURNAME)),
            party_size: integer_field(map.get(KEY_PARTY_SIZE)),
            date_text: text_field(map.get(KEY_DATE_TEXT)),
            time: text_field(map.get(KEY_TIME)),
            confidence: float_field(map.get(KEY_CONFIDENCE)).unwrap_or(AI_CONFIDENCE_DEFAULT),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer_field(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float_field(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
