use crate::types::{AppError, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the memory service credential.
pub const API_KEY_VAR: &str = "ZEP_API_KEY";
/// Optional override for the memory service base URL.
pub const API_URL_VAR: &str = "ZEP_API_URL";
/// Optional per-request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "ZEP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://api.getzep.com";

/// Memory service credential. Never empty; redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AppError::Config(
                "memory service API key must not be empty".to_string(),
            ));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct MemoryConfig {
    pub api_key: ApiKey,
    pub api_url: String,
    pub timeout: Option<Duration>,
}

impl MemoryConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads configuration from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!("{} environment variable is not set.", API_KEY_VAR))
            })
            .and_then(ApiKey::new)?;

        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            api_url,
            timeout,
        })
    }
}
