//! Provider configuration.
//!
//! Built once and passed by reference to [`crate::provider::Provider::new`].

use crate::error::ProviderError;
use std::env;
use std::time::Duration;

/// Controller used when `GNS3_HOST` is unset
pub const DEFAULT_HOST: &str = "http://localhost:3080";

/// Connection settings for the GNS3 controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Controller base URL, without trailing slash
    pub host: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Validate `host` and build a config without a timeout
    pub fn new(host: impl Into<String>) -> Result<Self, ProviderError> {
        let host = host.into();
        let trimmed = host.trim().trim_end_matches('/');
        let address = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));
        match address {
            None => {
                return Err(ProviderError::InvalidConfig(format!(
                    "host must start with http:// or https://, got {:?}",
                    host
                )));
            }
            Some("") => {
                return Err(ProviderError::InvalidConfig(format!("host {:?} has no address", host)));
            }
            Some(_) => {}
        }
        Ok(Self {
            host: trimmed.to_string(),
            request_timeout: None,
        })
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load from `GNS3_HOST` (default `http://localhost:3080`) and optional `GNS3_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ProviderError> {
        let host = env::var("GNS3_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let timeout = env::var("GNS3_TIMEOUT_SECS").ok();
        Self::from_values(host, timeout.as_deref())
    }

    fn from_values(host: String, timeout_secs: Option<&str>) -> Result<Self, ProviderError> {
        let config = Self::new(host)?;
        match timeout_secs.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(config),
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ProviderError::InvalidConfig(format!(
                        "GNS3_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(ProviderError::InvalidConfig(
                        "GNS3_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
        }
    }
}
