//! TableQuery configuration.
//!
//! Provides [`TableQueryConfig`], the connection settings handed to the store
//! client. Values are loaded from environment variables; nothing in the core
//! reads the environment on its own, the host builds the config and passes it
//! down explicitly.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{QueryError, TableQueryResult};

/// Connection settings for the store client.
///
/// # Examples
///
/// ```
/// use tablequery_core::config::TableQueryConfig;
///
/// let config = TableQueryConfig::default();
/// assert_eq!(config.default_region, "us-east-1");
/// assert!(config.endpoint_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TableQueryConfig {
    /// AWS region the table lives in.
    #[builder(default = String::from("us-east-1"), setter(into))]
    pub default_region: String,

    /// Override for the DynamoDB endpoint (e.g. a local emulator).
    #[builder(default, setter(strip_option, into))]
    pub endpoint_url: Option<String>,

    /// Attempts per page fetch made by the SDK retry layer (1 disables retries).
    #[builder(default = 3)]
    pub max_attempts: u32,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"), setter(into))]
    pub log_level: String,
}

impl Default for TableQueryConfig {
    fn default() -> Self {
        Self {
            default_region: String::from("us-east-1"),
            endpoint_url: None,
            max_attempts: 3,
            log_level: String::from("info"),
        }
    }
}

impl TableQueryConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` |
    /// | `TABLEQUERY_ENDPOINT_URL` | *(unset)* |
    /// | `TABLEQUERY_MAX_ATTEMPTS` | `3` |
    /// | `LOG_LEVEL` | `info` |
    pub fn from_env() -> TableQueryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TableQueryResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("DEFAULT_REGION")) {
            config.default_region = v;
        }
        if let Some(v) = lookup("TABLEQUERY_ENDPOINT_URL").filter(|v| !v.trim().is_empty()) {
            config.endpoint_url = Some(v);
        }
        if let Some(v) = lookup("TABLEQUERY_MAX_ATTEMPTS") {
            config.max_attempts = match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(QueryError::Config(format!(
                        "TABLEQUERY_MAX_ATTEMPTS must be a positive integer, got {v:?}"
                    )));
                }
            };
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }
}
