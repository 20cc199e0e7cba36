//! Client configuration
//!
//! Settings are layered from `config/default`, `config/local` and
//! `SPLUNK_CLIENT_*` environment variables (nested keys separated by `__`,
//! e.g. `SPLUNK_CLIENT_SERVICE__HOST`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Namespace, Result};

/// Default number of entries requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub namespace: NamespaceConfig,
    pub collections: CollectionConfig,
    pub logging: LoggingConfig,
}

/// Location of the Splunk management port
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

/// Owner/app scope requests are issued in
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamespaceConfig {
    pub owner: Option<String>,
    pub app: Option<String>,
}

/// Defaults applied by entity collections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    pub page_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                scheme: "https".to_string(),
                host: "localhost".to_string(),
                port: 8089,
            },
            namespace: NamespaceConfig::default(),
            collections: CollectionConfig {
                page_size: DEFAULT_PAGE_SIZE,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

impl ClientConfig {
    /// Load configuration from config files and the environment
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SPLUNK_CLIENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("service.scheme", "https")?
            .set_default("service.host", "localhost")?
            .set_default("service.port", 8089)?
            .set_default("collections.page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        debug!("Loaded client configuration for {}", config.base_url());
        Ok(config)
    }

    /// Check the loaded values are usable
    pub fn validate(&self) -> Result<()> {
        if self.service.host.trim().is_empty() {
            return Err(Error::configuration("service.host cannot be empty"));
        }
        if !matches!(self.service.scheme.as_str(), "http" | "https") {
            return Err(Error::configuration(format!(
                "service.scheme must be http or https, got '{}'",
                self.service.scheme
            )));
        }
        if self.collections.page_size == 0 {
            return Err(Error::configuration(
                "collections.page_size must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Base URL of the management port
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.service.scheme, self.service.host, self.service.port
        )
    }

    /// Namespace collections are scoped to
    pub fn namespace(&self) -> Namespace {
        let non_empty = |value: &Option<String>| value.clone().filter(|value| !value.is_empty());
        Namespace {
            owner: non_empty(&self.namespace.owner),
            app: non_empty(&self.namespace.app),
        }
    }
}
