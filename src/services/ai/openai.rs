use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use serde_json::json;

use super::client::ProviderFactory;
use super::{LlmProvider, LlmRequest, RawResponse};

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn respond(&self, request: &LlmRequest) -> anyhow::Result<RawResponse> {
        let input: Vec<_> = request
            .input
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content,
                })
            })
            .collect();

        let body = json!({
            "model": request.model,
            "input": input,
        });

        let resp = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .context("failed to call OpenAI API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse OpenAI response")?;

        if !status.is_success() {
            anyhow::bail!("OpenAI API error ({}): {}", status, data);
        }

        serde_json::from_value(data).context("unexpected OpenAI response layout")
    }
}

pub struct OpenAiFactory {
    base_url: String,
}

impl OpenAiFactory {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

impl ProviderFactory for OpenAiFactory {
    fn create(&self, api_key: &str) -> anyhow::Result<Arc<dyn LlmProvider>> {
        // reqwest would only notice this once a request is built
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .context("API key is not a valid header value")?;
        anyhow::ensure!(
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://"),
            "OpenAI base URL must be http(s): {}",
            self.base_url
        );
        Ok(Arc::new(OpenAiProvider::new(
            api_key.to_string(),
            self.base_url.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_rejects_malformed_key() {
        let factory = OpenAiFactory::new("https://api.openai.com/v1".to_string());
        assert!(factory.create("sk-bad\nkey").is_err());
        assert!(factory.create("sk-good").is_ok());
    }

    #[test]
    fn test_factory_rejects_non_http_base_url() {
        let factory = OpenAiFactory::new("ftp://example.com".to_string());
        assert!(factory.create("sk-good").is_err());
    }
}
