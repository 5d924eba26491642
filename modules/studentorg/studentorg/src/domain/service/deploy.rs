use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::DeployPipeline;
use crate::secret::SecretString;

/// Authenticated trigger for the external deployment pipeline.
pub struct DeployService {
    token: Option<SecretString>,
    pipeline: Arc<dyn DeployPipeline>,
}

impl DeployService {
    /// With no `token` configured every request is rejected.
    pub fn new(token: Option<SecretString>, pipeline: Arc<dyn DeployPipeline>) -> Self {
        Self { token, pipeline }
    }

    /// Check the presented bearer token, then call the pipeline once.
    ///
    /// # Errors
    /// `Unauthorized` before any side effect when the token is missing or
    /// wrong; `ExternalOperation` when the pipeline fails.
    #[instrument(skip_all)]
    pub async fn trigger(&self, presented: Option<&str>) -> Result<(), DomainError> {
        self.authorize(presented)?;

        info!("Deploy authorized, triggering pipeline");
        self.pipeline
            .trigger()
            .await
            .inspect_err(|e| error!(error = %e, "Deployment failed"))?;

        info!("Deployment triggered");
        Ok(())
    }

    fn authorize(&self, presented: Option<&str>) -> Result<(), DomainError> {
        match (&self.token, presented) {
            (Some(token), Some(candidate)) if token.matches(candidate) => Ok(()),
            _ => {
                warn!(
                    token_configured = self.token.is_some(),
                    token_presented = presented.is_some(),
                    "Deploy request rejected"
                );
                Err(DomainError::Unauthorized)
            }
        }
    }
}
