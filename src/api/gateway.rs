use crate::error::OpsError;
use crate::types::openai::{ChatCompletionRequest, ChatCompletionResponse, ModelList};
use std::time::Duration;
use url::Url;

/// Thin client over the gateway's public endpoints. One `reqwest::Client`
/// carries the timeout and is reused for every call; there are no retries,
/// a failed call surfaces as an error to the caller.
pub struct GatewayApi {
    client: reqwest::Client,
    base_url: Url,
    master_key: String,
}

impl GatewayApi {
    pub fn new(
        base_url: Url,
        master_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OpsError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            master_key: master_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, OpsError> {
        Ok(self.base_url.join(path)?)
    }

    /// Unauthenticated liveness probe. Returns the raw response so the
    /// caller can judge the status code.
    pub async fn readiness(&self) -> Result<reqwest::Response, OpsError> {
        let url = self.endpoint("/health/readiness")?;
        Ok(self.client.get(url).send().await?)
    }

    /// Authenticated model catalog. Non-2xx statuses and shape mismatches
    /// both surface as errors.
    pub async fn list_models(&self) -> Result<ModelList, OpsError> {
        let url = self.endpoint("/v1/models")?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.master_key)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(OpsError::UpstreamStatus(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// One authenticated completion round trip.
    pub async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpsError> {
        let url = self.endpoint("/chat/completions")?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.master_key)
            .json(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(OpsError::UpstreamStatus(resp.status()));
        }
        Ok(resp.json().await?)
    }
}
