//! HTTP checkout service.
//!
//! Posts the verification request as JSON to `{base_url}/pay/` and expects
//! `{"url": "..."}` back.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::checkout::CheckoutService;
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::request::{VerificationRequest, VerificationUrl};

/// [`CheckoutService`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpCheckoutService {
    client: Client,
    endpoint: String,
}

impl HttpCheckoutService {
    /// Builds a client for the endpoint and timeout in `config`.
    pub fn new(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Uses an existing client.
    pub fn with_client(client: Client, config: &CheckoutConfig) -> Self {
        Self {
            client,
            endpoint: config.pay_endpoint(),
        }
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CheckoutService for HttpCheckoutService {
    async fn request_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationUrl, CheckoutError> {
        debug!(endpoint = %self.endpoint, "posting verification request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::Status(status.as_u16()));
        }

        response
            .json::<VerificationUrl>()
            .await
            .map_err(|e| CheckoutError::Decode(e.without_url().to_string()))
    }
}
