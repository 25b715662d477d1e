//! Hugging Face Inference API Transport
//!
//! One `POST {base_url}{model}` per call with a bearer credential.
//! Returns the raw status and body; retrying and interpretation happen above.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};

use super::{InferenceRequest, InferenceTransport, RawResponse};
use crate::constants::{inference as inference_constants, network as net_constants};
use crate::types::{MunError, Result};

/// reqwest-backed transport for the hosted inference endpoint
pub struct HuggingFaceTransport {
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for HuggingFaceTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HuggingFaceTransport {
    /// Transport for `base_url`. The model identifier is appended verbatim,
    /// so the base URL should end with `/`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = Self::validate_base_url(&base_url.into())?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(net_constants::CONNECTION_TIMEOUT_SECS))
            .build()
            .map_err(MunError::Http)?;

        Ok(Self { base_url, client })
    }

    /// Transport for the public Hugging Face endpoint
    pub fn hosted() -> Result<Self> {
        Self::new(inference_constants::DEFAULT_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Only http/https; a missing trailing slash is added
    fn validate_base_url(base_url: &str) -> Result<String> {
        let url = url::Url::parse(base_url).map_err(|e| {
            MunError::Config(format!("Invalid inference base URL '{}': {}", base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(MunError::Config(format!(
                "Inference base URL must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if url.scheme() == "http"
            && let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
        {
            warn!(
                "Inference endpoint {} uses plain http; the bearer token is sent unencrypted",
                host
            );
        }

        let mut result = url.to_string();
        if !result.ends_with('/') {
            result.push('/');
        }
        Ok(result)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}{}", self.base_url, model)
    }
}

#[async_trait]
impl InferenceTransport for HuggingFaceTransport {
    async fn send(
        &self,
        credential: &SecretString,
        request: &InferenceRequest,
    ) -> Result<RawResponse> {
        let url = self.endpoint(request.model());
        debug!(url = %url, "Sending request to inference endpoint");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", credential.expose_secret()),
            )
            .json(&request.payload())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, body_len = body.len(), "Received response from inference endpoint");
        Ok(RawResponse { status, body })
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}
