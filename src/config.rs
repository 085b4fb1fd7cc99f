//! Dispatch configuration.
//!
//! ```ignore
//! // Defaults: unmatched paths fall back to `_null`, GET/HEAD/POST allowed
//! let config = ServiceConfig::default();
//!
//! // Strict 404s and diagnostic 500 bodies
//! let config = ServiceConfig::default().strict().with_debug(true);
//!
//! // From REMISC_NOT_FOUND / REMISC_DEBUG / REMISC_ALLOWED_METHODS
//! let config = ServiceConfig::from_env()?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_NOT_FOUND: &str = "REMISC_NOT_FOUND";
pub const ENV_DEBUG: &str = "REMISC_DEBUG";
pub const ENV_ALLOWED_METHODS: &str = "REMISC_ALLOWED_METHODS";

/// What happens to a path that matches no operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundPolicy {
    /// Route to the null operation.
    #[default]
    Fallback,
    /// Answer `404 Not Found`.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub not_found: NotFoundPolicy,
    /// Append the failure description to `500` bodies.
    pub debug: bool,
    /// Methods that may invoke an operation. `OPTIONS` is always answered.
    pub allowed_methods: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            not_found: NotFoundPolicy::Fallback,
            debug: false,
            allowed_methods: vec!["GET".into(), "HEAD".into(), "POST".into()],
        }
    }
}

impl ServiceConfig {
    /// Use the strict (404) not-found policy.
    pub fn strict(mut self) -> Self {
        self.not_found = NotFoundPolicy::Strict;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_allowed_methods<I, M>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: AsRef<str>,
    {
        self.allowed_methods = methods
            .into_iter()
            .map(|m| m.as_ref().to_ascii_uppercase())
            .collect();
        self
    }

    pub fn allows(&self, method: &str) -> bool {
        self.allowed_methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_NOT_FOUND) {
            config.not_found = match value.trim().to_ascii_lowercase().as_str() {
                "fallback" => NotFoundPolicy::Fallback,
                "strict" => NotFoundPolicy::Strict,
                _ => return Err(invalid(ENV_NOT_FOUND, value)),
            };
        }

        if let Some(value) = lookup(ENV_DEBUG) {
            config.debug = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(invalid(ENV_DEBUG, value)),
            };
        }

        if let Some(value) = lookup(ENV_ALLOWED_METHODS) {
            let methods: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .collect();
            if methods.is_empty() {
                return Err(invalid(ENV_ALLOWED_METHODS, value));
            }
            config = config.with_allowed_methods(methods);
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}
