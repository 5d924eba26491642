//! StudentOrg module configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::secret::SecretString;

/// Deploy trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Shared bearer token. When absent every deploy request is rejected.
    pub token: Option<SecretString>,
    /// Endpoint of the external deployment pipeline.
    pub pipeline_url: Option<Url>,
    /// Timeout for the pipeline call in seconds.
    pub timeout_secs: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            token: None,
            pipeline_url: None,
            timeout_secs: 60,
        }
    }
}

impl DeployConfig {
    /// Token with blank values treated as unset.
    #[must_use]
    pub fn effective_token(&self) -> Option<SecretString> {
        self.token.as_ref().filter(|t| !t.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_deploy() {
        let cfg = DeployConfig::default();
        assert!(cfg.effective_token().is_none());
        assert!(cfg.pipeline_url.is_none());
        assert_eq!(cfg.timeout_secs, 60);
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let cfg: DeployConfig = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        assert!(cfg.effective_token().is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<DeployConfig, _> = serde_json::from_str(r#"{"tokn": "x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn serialized_config_hides_token() {
        let cfg: DeployConfig =
            serde_json::from_str(r#"{"token": "s3cr3t", "pipeline_url": "http://ci.local/hook"}"#)
                .unwrap();
        let dumped = serde_json::to_string(&cfg).unwrap();
        assert!(!dumped.contains("s3cr3t"));
        assert!(dumped.contains("[REDACTED]"));
    }
}
