//! Stripe payment processor adapter.
//!
//! Implements the `PaymentProcessor` port against the Stripe REST API.
//! Intents are created with form-encoded bodies and read back by id.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let processor = StripePaymentProcessor::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::monetization::{PaymentIntent, PaymentIntentObject, PaymentIntentRequest};
use crate::ports::{PaymentError, PaymentErrorCode, PaymentProcessor};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for the API (default: https://api.stripe.com).
    api_base_url: String,

    timeout: Duration,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe error envelope: `{"error": {"type", "code", "message"}}`.
#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Payment processor backed by the Stripe REST API.
pub struct StripePaymentProcessor {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentProcessor {
    pub fn new(config: StripeConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config,
            http_client,
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base_url)
    }

    async fn read_intent(&self, response: reqwest::Response) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), error = %body, "Stripe request failed");
            return Err(error_from_response(status, &body));
        }

        let object: PaymentIntentObject = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;
        object
            .into_intent()
            .map_err(|e| PaymentError::new(PaymentErrorCode::ProviderError, e.to_string()))
    }
}

/// Form body for `POST /v1/payment_intents`.
fn intent_form(request: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), request.amount.minor().to_string()),
        (
            "currency".to_string(),
            request.amount.currency().as_str().to_string(),
        ),
        (
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ),
    ];
    let mut metadata: Vec<_> = request.metadata.to_map().into_iter().collect();
    metadata.sort();
    params.extend(
        metadata
            .into_iter()
            .map(|(k, v)| (format!("metadata[{}]", k), v)),
    );
    params
}

fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error: {}", body));
    let code = match status.as_u16() {
        401 | 403 => PaymentErrorCode::AuthenticationError,
        402 => PaymentErrorCode::CardDeclined,
        400 => PaymentErrorCode::InvalidRequest,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimitExceeded,
        s if s >= 500 => PaymentErrorCode::NetworkError,
        _ => PaymentErrorCode::ProviderError,
    };
    let err = PaymentError::new(code, message);
    match parsed.and_then(|e| e.error.code) {
        Some(provider_code) => err.with_provider_code(provider_code),
        None => err,
    }
}

#[async_trait]
impl PaymentProcessor for StripePaymentProcessor {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .http_client
            .post(self.intents_url())
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&intent_form(&request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let intent = self.read_intent(response).await?;
        tracing::debug!(payment_intent_id = %intent.id, status = %intent.status, "Stripe intent created");
        Ok(intent)
    }

    async fn retrieve_payment_intent(
        &self,
        reference: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if reference.is_empty() || reference.contains('/') {
            return Err(PaymentError::invalid_request("Invalid payment intent id"));
        }

        let response = self
            .http_client
            .get(format!("{}/{}", self.intents_url(), reference))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        self.read_intent(response).await
    }
}
