use std::sync::{Arc, Mutex, PoisonError};

use crate::config::AppConfig;
use crate::errors::ServiceUnavailable;
use crate::services::ai::LlmProvider;

pub trait ProviderFactory: Send + Sync {
    fn create(&self, api_key: &str) -> anyhow::Result<Arc<dyn LlmProvider>>;
}

/// The handle is built on the first successful [`acquire`](Self::acquire) and
/// reused afterwards. A failed build is not remembered.
pub struct ServiceClient {
    api_key: Option<String>,
    factory: Option<Arc<dyn ProviderFactory>>,
    handle: Mutex<Option<Arc<dyn LlmProvider>>>,
}

impl ServiceClient {
    // `factory` is None when no backend is compiled in.
    pub fn new(api_key: Option<String>, factory: Option<Arc<dyn ProviderFactory>>) -> Self {
        Self {
            api_key,
            factory,
            handle: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        #[cfg(feature = "openai")]
        let factory: Option<Arc<dyn ProviderFactory>> = Some(Arc::new(
            crate::services::ai::openai::OpenAiFactory::new(config.openai_base_url.clone()),
        ));
        #[cfg(not(feature = "openai"))]
        let factory: Option<Arc<dyn ProviderFactory>> = None;

        Self::new(config.openai_api_key.clone(), factory)
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            api_key: None,
            factory: None,
            handle: Mutex::new(Some(provider)),
        }
    }

    pub fn acquire(&self) -> Result<Arc<dyn LlmProvider>, ServiceUnavailable> {
        // Held across creation so two first callers cannot both build a handle.
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(provider) = handle.as_ref() {
            return Ok(Arc::clone(provider));
        }

        let Some(factory) = self.factory.as_ref() else {
            tracing::warn!("extraction backend not available in this build");
            return Err(ServiceUnavailable::CapabilityMissing);
        };

        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            tracing::warn!("OPENAI_API_KEY missing, AI extraction disabled");
            return Err(ServiceUnavailable::CredentialMissing);
        };

        match factory.create(api_key) {
            Ok(provider) => {
                tracing::debug!("extraction backend initialised");
                *handle = Some(Arc::clone(&provider));
                Ok(provider)
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to initialise extraction backend");
                Err(ServiceUnavailable::Init(format!("{e:#}")))
            }
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
