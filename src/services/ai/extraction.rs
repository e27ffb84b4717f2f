use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::ExtractError;
use crate::models::ExtractionRecord;
use crate::services::ai::client::ServiceClient;
use crate::services::ai::response::{harden, recover_json, ResponseContent};
use crate::services::ai::{LlmRequest, Message};

const SYSTEM_PROMPT: &str = r#"Sei un motore di estrazione dati per il sistema di prenotazione automatico di una pizzeria.

Non devi gestire la conversazione con il cliente: devi solo ESTRARRE informazioni strutturate dal suo messaggio.

Regole obbligatorie:
1) Non calcolare mai date reali.
2) Se il cliente usa una data relativa o testuale (oggi, domani, sabato, ...), copia esattamente quel testo nel campo "data_testuale".
3) Non inventare dati.
4) Se un dato non compare esplicitamente nel messaggio, usa null.
5) Rispondi solo con JSON valido, senza nessun altro testo."#;

const USER_PROMPT: &str = r#"Messaggio del cliente:
"{message}"

Rispondi SOLO con questo JSON compilato:

{
  "nome": null,
  "cognome": null,
  "persone": null,
  "data_testuale": null,
  "ora": null,
  "confidence": 0.0
}"#;

/// One request per call at most. `extract` logs failures and returns `None`;
/// `try_extract` hands back the reason instead.
pub struct Extractor {
    client: ServiceClient,
    model: String,
    timeout: Duration,
}

impl Extractor {
    pub fn new(client: ServiceClient, config: &AppConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub fn build_request(&self, message: &str) -> LlmRequest {
        LlmRequest {
            model: self.model.clone(),
            input: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(USER_PROMPT.replace("{message}", message.trim())),
            ],
            timeout: self.timeout,
        }
    }

    pub async fn extract(&self, message: &str) -> Option<ExtractionRecord> {
        match self.try_extract(message).await {
            Ok(record) => Some(record),
            Err(ExtractError::EmptyMessage) => None,
            // acquire() has already explained why
            Err(ExtractError::Unavailable(_)) => None,
            Err(e @ (ExtractError::Invocation(_) | ExtractError::Timeout(_))) => {
                tracing::error!(error = %e, "AI extraction failed");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding AI extraction");
                None
            }
        }
    }

    pub async fn try_extract(&self, message: &str) -> Result<ExtractionRecord, ExtractError> {
        if message.trim().is_empty() {
            return Err(ExtractError::EmptyMessage);
        }

        let provider = self.client.acquire()?;
        let request = self.build_request(message);

        tracing::debug!(model = %request.model, "requesting AI extraction");

        let raw = tokio::time::timeout(self.timeout, provider.respond(&request))
            .await
            .map_err(|_| ExtractError::Timeout(self.timeout))?
            .map_err(ExtractError::Invocation)?;

        let value = match ResponseContent::from_raw(&raw) {
            Some(ResponseContent::Mapping(map)) => serde_json::Value::Object(map),
            Some(ResponseContent::Text(text)) if !text.is_empty() => {
                recover_json(&text).ok_or(ExtractError::InvalidJson(text))?
            }
            _ => return Err(ExtractError::UnusableResponse(format!("{raw:?}"))),
        };

        let serde_json::Value::Object(mut map) = value else {
            return Err(ExtractError::NotAnObject(value.to_string()));
        };

        harden(&mut map);
        let record = ExtractionRecord::from_hardened(&map);

        tracing::info!(
            party_size = ?record.party_size,
            date_text = ?record.date_text,
            time = ?record.time,
            confidence = record.confidence,
            "AI extraction complete"
        );

        Ok(record)
    }
}
