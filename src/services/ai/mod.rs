pub mod client;
pub mod extraction;
#[cfg(feature = "openai")]
pub mod openai;
pub mod response;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub input: Vec<Message>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: Vec<serde_json::Value>,
}

// `null` collections count as empty, same as missing ones.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn respond(&self, request: &LlmRequest) -> anyhow::Result<RawResponse>;
}
