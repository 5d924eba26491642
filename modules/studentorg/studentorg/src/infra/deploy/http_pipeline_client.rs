use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use crate::domain::error::DomainError;
use crate::domain::ports::DeployPipeline;

#[derive(Debug, Serialize)]
struct TriggerRequest {
    source: &'static str,
    requested_at: String,
}

/// HTTP adapter implementing the `DeployPipeline` port.
///
/// POSTs a JSON trigger to the configured pipeline URL. Any transport error,
/// timeout or non-2xx status is an `ExternalOperation` failure.
pub struct HttpPipelineClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPipelineClient {
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl DeployPipeline for HttpPipelineClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn trigger(&self) -> Result<(), DomainError> {
        let body = TriggerRequest {
            source: "studentorg",
            requested_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::ExternalOperation(format!("pipeline request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ExternalOperation(format!(
                "pipeline returned HTTP {status}"
            )));
        }

        Ok(())
    }
}

/// Used when no pipeline URL is configured; every trigger fails.
pub struct DisabledPipeline;

#[async_trait]
impl DeployPipeline for DisabledPipeline {
    async fn trigger(&self) -> Result<(), DomainError> {
        Err(DomainError::ExternalOperation(
            "deployment pipeline is not configured".to_owned(),
        ))
    }
}
