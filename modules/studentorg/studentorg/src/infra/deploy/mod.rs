//! Adapters for the deployment pipeline port.

mod http_pipeline_client;

pub use http_pipeline_client::{DisabledPipeline, HttpPipelineClient};
