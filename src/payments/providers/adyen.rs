//! Adyen Checkout API client
//!
//! This module provides the HTTP transport for the Checkout API (v41):
//! payment creation, payment sessions, payment results and the
//! payment methods listing.

use crate::error::{GatewayError, GatewayResult};
use crate::payments::traits::AdyenApi;
use crate::payments::types::{
    ApiPaymentRequest, PaymentMethodInfo, PaymentMethodsRequest, PaymentMethodsResponse,
    PaymentResponse, PaymentResultRequest, PaymentResultResponse, PaymentSessionResponse,
    SessionRequest,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

pub const DEFAULT_API_VERSION: &str = "v41";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Adyen platform the merchant account lives on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdyenEnvironment {
    #[default]
    Test,
    Live,
}

impl AdyenEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            AdyenEnvironment::Test => "test",
            AdyenEnvironment::Live => "live",
        }
    }
}

/// Adyen client configuration
#[derive(Clone, Deserialize)]
pub struct AdyenConfig {
    /// Checkout API key, sent as `X-API-Key`
    pub api_key: String,
    pub merchant_account: String,
    #[serde(default)]
    pub environment: AdyenEnvironment,
    /// Live endpoint prefix, e.g. `1797a841fbb37ca7-AdyenDemo`
    #[serde(default)]
    pub live_url_prefix: Option<String>,
    /// Overrides the computed endpoint, mostly for tests
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Hex-encoded HMAC key for standard notifications
    #[serde(default)]
    pub hmac_key: Option<String>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AdyenConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            merchant_account: String::new(),
            environment: AdyenEnvironment::Test,
            live_url_prefix: None,
            base_url: None,
            api_version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            hmac_key: None,
        }
    }
}

impl fmt::Debug for AdyenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdyenConfig")
            .field("api_key", &"<redacted>")
            .field("merchant_account", &self.merchant_account)
            .field("environment", &self.environment)
            .field("live_url_prefix", &self.live_url_prefix)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("hmac_key", &self.hmac_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdyenConfig {
    pub fn validate(&self) -> GatewayResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::config("Adyen API key cannot be empty"));
        }

        if self.merchant_account.trim().is_empty() {
            return Err(GatewayError::config("Adyen merchant account cannot be empty"));
        }

        if self.environment == AdyenEnvironment::Live
            && self.base_url.is_none()
            && self
                .live_url_prefix
                .as_deref()
                .map_or(true, |prefix| prefix.trim().is_empty())
        {
            return Err(GatewayError::config(
                "Live environment requires a live URL prefix",
            ));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }

    /// Base URL of the Checkout API, without trailing slash.
    pub fn endpoint(&self) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.trim_end_matches('/').to_string();
        }

        match self.environment {
            AdyenEnvironment::Test => {
                format!("https://checkout-test.adyen.com/{}", self.api_version)
            }
            AdyenEnvironment::Live => format!(
                "https://{}-checkout-live.adyenpayments.com/checkout/{}",
                self.live_url_prefix.as_deref().unwrap_or_default(),
                self.api_version
            ),
        }
    }
}

/// Error body returned by the Checkout API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdyenErrorResponse {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Adyen Checkout API client
///
/// Holds one pooled `reqwest::Client`, safe to share across payments.
pub struct AdyenClient {
    config: AdyenConfig,
    client: Client,
}

impl AdyenClient {
    /// Create a new Adyen client instance
    pub fn new(config: AdyenConfig) -> GatewayResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("adyen-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Adyen client initialized: environment={}, endpoint={}",
            config.environment.as_str(),
            config.endpoint()
        );

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AdyenConfig {
        &self.config
    }

    /// POST a JSON body to a Checkout endpoint and decode the response
    async fn post<B, T>(&self, endpoint: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.endpoint(), endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .inspect_err(|e| error!("Adyen request to {} failed: {}", endpoint, e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .inspect_err(|e| error!("Failed to read Adyen response from {}: {}", endpoint, e))?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<AdyenErrorResponse>(&response_text) {
                Ok(body) => (
                    body.error_code.unwrap_or_else(|| status.as_u16().to_string()),
                    body.message.unwrap_or_else(|| response_text.clone()),
                ),
                Err(_) => (status.as_u16().to_string(), response_text),
            };

            error!(
                "Adyen API error on {}: HTTP {} code={} message={}",
                endpoint, status, code, message
            );
            return Err(GatewayError::api(status.as_u16(), code, message));
        }

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!("Failed to parse Adyen response from {}: {}", endpoint, e);
            GatewayError::decode(format!("{}: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl AdyenApi for AdyenClient {
    async fn create_payment(&self, request: &ApiPaymentRequest) -> GatewayResult<PaymentResponse> {
        info!(
            "Creating Adyen payment: reference={}, method={}, amount={} {}",
            request.details.reference(),
            request.payment_method.method_type,
            request.details.amount().value,
            request.details.amount().currency
        );

        let response: PaymentResponse = self.post("/payments", request).await?;

        info!(
            "Adyen payment created: reference={}, psp_reference={}",
            request.details.reference(),
            response.psp_reference
        );

        Ok(response)
    }

    async fn create_payment_session(
        &self,
        request: &SessionRequest,
    ) -> GatewayResult<PaymentSessionResponse> {
        info!(
            "Creating Adyen payment session: reference={}, amount={} {}",
            request.details.reference(),
            request.details.amount().value,
            request.details.amount().currency
        );

        let response = self.post("/paymentSession", request).await?;

        info!(
            "Adyen payment session created: reference={}",
            request.details.reference()
        );

        Ok(response)
    }

    async fn get_payment_result(
        &self,
        request: &PaymentResultRequest,
    ) -> GatewayResult<PaymentResultResponse> {
        info!("Fetching Adyen payment result");

        let response: PaymentResultResponse = self.post("/payments/result", request).await?;

        info!(
            "Adyen payment result: merchant_reference={}, psp_reference={}, result_code={}",
            response.merchant_reference, response.psp_reference, response.result_code
        );

        Ok(response)
    }

    async fn get_payment_methods(&self) -> GatewayResult<Vec<PaymentMethodInfo>> {
        let request = PaymentMethodsRequest {
            merchant_account: self.config.merchant_account.clone(),
            country_code: None,
            amount: None,
            channel: None,
        };

        let response: PaymentMethodsResponse = self.post("/paymentMethods", &request).await?;

        debug!(
            "Adyen returned {} payment methods",
            response.payment_methods.len()
        );

        Ok(response.payment_methods)
    }
}
