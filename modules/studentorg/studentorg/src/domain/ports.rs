use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Outbound port to the external deployment pipeline.
#[async_trait]
pub trait DeployPipeline: Send + Sync {
    /// Ask the pipeline to deploy the latest revision.
    ///
    /// Failures surface as `DomainError::ExternalOperation` with diagnostic
    /// text; callers do not retry.
    async fn trigger(&self) -> Result<(), DomainError>;
}
