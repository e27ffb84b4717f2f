use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ai::client::ServiceClient;
use crate::services::ai::extraction::Extractor;

pub struct AppState {
    pub config: AppConfig,
    pub extractor: Extractor,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Arc<Self> {
        let extractor = Extractor::new(ServiceClient::from_config(&config), &config);
        tracing::info!(
            model = %config.model,
            timeout_secs = config.timeout_secs,
            credential = config.openai_api_key.is_some(),
            "AI extraction configured"
        );
        Arc::new(Self { config, extractor })
    }
}
