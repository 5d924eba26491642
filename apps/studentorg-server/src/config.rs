//! Layered server configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. YAML file passed with `--config`
//! 3. Environment variables `STUDENTORG__*`, with `__` separating sections
//!    (`STUDENTORG__DEPLOY__TOKEN` sets `deploy.token`)
//! 4. CLI overrides (`--port`, `--mock`, `-v`)

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use studentorg::config::DeployConfig;

pub const ENV_PREFIX: &str = "STUDENTORG__";

/// DSN used by `--mock`.
pub const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dsn: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://studentorg.db?mode=rwc".to_owned(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub deploy: DeployConfig,
}

/// CLI values that override the loaded configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub mock: bool,
    pub verbose: u8,
}

impl AppConfig {
    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Fails on a missing file, malformed YAML, unknown keys or bad values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.display()
            );
        }
        Self::figment(path)
            .extract()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port {
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map_or(self.server.bind_addr.as_str(), |(host, _)| host);
            self.server.bind_addr = format!("{host}:{port}");
        }
        if cli.mock {
            self.database.dsn = MOCK_DSN.to_owned();
            self.database.max_connections = 1;
        }
        let level = match cli.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }

    /// Effective configuration as YAML. The deploy token prints as `[REDACTED]`.
    ///
    /// # Errors
    /// Fails if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration")
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    fn load(path: Option<&str>) -> figment::error::Result<AppConfig> {
        AppConfig::load(path.map(Path::new)).map_err(|e| format!("{e:#}").into())
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let cfg = load(None)?;
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
            assert_eq!(cfg.server.request_timeout_secs, 30);
            assert_eq!(cfg.database.max_connections, 10);
            assert_eq!(cfg.logging.level, "info");
            assert!(cfg.deploy.token.is_none());
            assert_eq!(cfg.deploy.timeout_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "studentorg.yaml",
                r#"
server:
  bind_addr: "0.0.0.0:9000"
logging:
  level: "debug"
  json: true
deploy:
  pipeline_url: "https://ci.example.edu/hooks/deploy"
"#,
            )?;
            jail.set_env("STUDENTORG__SERVER__BIND_ADDR", "0.0.0.0:9100");
            jail.set_env("STUDENTORG__DEPLOY__TOKEN", "t0k3n");

            let cfg = load(Some("studentorg.yaml"))?;
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9100");
            assert_eq!(cfg.logging.level, "debug");
            assert!(cfg.logging.json);
            assert_eq!(
                cfg.deploy.pipeline_url.as_ref().map(ToString::to_string),
                Some("https://ci.example.edu/hooks/deploy".to_owned())
            );
            assert!(
                cfg.deploy
                    .effective_token()
                    .is_some_and(|t| t.matches("t0k3n"))
            );
            Ok(())
        });
    }

    #[test]
    fn numeric_deploy_token_loads_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("STUDENTORG__DEPLOY__TOKEN", "123456");
            let cfg = load(None)?;
            assert!(
                cfg.deploy
                    .effective_token()
                    .is_some_and(|t| t.matches("123456"))
            );

            jail.clear_env();
            jail.create_file("numeric.yaml", "deploy:\n  token: 987654\n")?;
            let cfg = load(Some("numeric.yaml"))?;
            assert!(
                cfg.deploy
                    .effective_token()
                    .is_some_and(|t| t.matches("987654"))
            );
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "server:\n  bind_address: \"x\"\n")?;
            assert!(load(Some("bad.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = load(Some("nope.yaml")).unwrap_err();
            assert!(err.to_string().contains("does not exist"));
            Ok(())
        });
    }

    #[test]
    fn cli_overrides_port_mock_and_verbosity() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(CliOverrides {
            port: Some(9999),
            mock: true,
            verbose: 2,
        });

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9999");
        assert_eq!(cfg.database.dsn, MOCK_DSN);
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn yaml_output_redacts_token() {
        let mut cfg = AppConfig::default();
        cfg.deploy.token = Some(studentorg::secret::SecretString::new("super-secret"));

        let yaml = cfg.to_yaml().unwrap();

        assert!(!yaml.contains("super-secret"));
        assert!(yaml.contains("[REDACTED]"));
        assert!(yaml.contains("bind_addr"));
    }
}
