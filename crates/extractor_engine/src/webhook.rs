use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

use crate::types::{EMPTY_INPUT_MESSAGE, OPERATION_FAILED_FALLBACK};
use crate::{FetchResult, RawWebhookResponse, WebhookError};

pub const DEFAULT_ENDPOINT: &str = "https://n8n.judyplan.com/webhook/fecth-url";
pub const ENDPOINT_ENV: &str = "N8N_WEBHOOK_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    pub endpoint: String,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl WebhookSettings {
    /// Reads the endpoint override from `N8N_WEBHOOK_URL`; unset or blank keeps the default.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var(ENDPOINT_ENV).ok())
    }

    pub fn from_override(endpoint: Option<String>) -> Self {
        match endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => Self {
                endpoint: endpoint.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// Something that turns a submitted link into extracted content.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn submit(&self, url: &str) -> Result<FetchResult, WebhookError>;
}

/// Single-attempt webhook client. No retries and no client-side timeout.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    settings: WebhookSettings,
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(settings: WebhookSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for WebhookClient {
    async fn submit(&self, url: &str) -> Result<FetchResult, WebhookError> {
        validate_link(url)?;
        engine_info!(
            "Submitting link url_len={} endpoint={}",
            url.len(),
            self.settings.endpoint
        );

        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "link": url }))
            .send()
            .await
            .map_err(|err| {
                engine_warn!("Webhook request failed: {}", err);
                WebhookError::TransportError(err.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| WebhookError::TransportError(err.to_string()))?;
        engine_debug!("Webhook answered status={} bytes={}", status, body.len());

        if !status.is_success() {
            let upstream = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(Value::as_str)
                        .filter(|message| !message.is_empty())
                        .map(ToOwned::to_owned)
                });
            engine_warn!("Webhook returned status {} error={:?}", status, upstream);
            return Err(WebhookError::TransportError(upstream.unwrap_or_else(|| {
                format!("webhook request failed with status {}", status.as_u16())
            })));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|err| WebhookError::ParseError(err.to_string()))?;
        let raw = RawWebhookResponse::from_value(value)
            .map_err(|err| WebhookError::ParseError(err.to_string()))?;
        reconcile(raw)
    }
}

/// Applies the two-spelling success rule to a 2xx body.
pub(crate) fn reconcile(raw: RawWebhookResponse) -> Result<FetchResult, WebhookError> {
    if raw.effective_success() {
        engine_info!("Webhook reported success title={:?}", raw.title);
        return Ok(raw.into_fetch_result());
    }
    let message = raw
        .error_message()
        .unwrap_or(OPERATION_FAILED_FALLBACK)
        .to_string();
    engine_warn!("Webhook reported an operational failure: {}", message);
    Err(WebhookError::OperationFailed(message))
}

fn validate_link(url: &str) -> Result<(), WebhookError> {
    if url.trim().is_empty() {
        engine_debug!("Rejected empty link: {}", EMPTY_INPUT_MESSAGE);
        return Err(WebhookError::EmptyInput);
    }
    url::Url::parse(url).map_err(|err| {
        engine_debug!("Rejected malformed link: {}", err);
        WebhookError::InvalidFormat
    })?;
    Ok(())
}
