//! Estimation gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the generative estimation gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key. Absence is tolerated: the UI degrades to a
    /// "missing credential" banner and submissions short-circuit to the
    /// failed path without a network call.
    pub gemini_api_key: Option<String>,

    /// Model used for estimation
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the generative language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a usable API key is present
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.is_empty() && k != "undefined")
    }

    /// Validate gateway configuration
    ///
    /// A missing API key is not a validation failure (see field docs);
    /// only structurally broken values are rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.is_empty() {
            return Err(ValidationError::invalid("model", "must not be empty"));
        }
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::invalid(
                "base_url",
                "must be an http(s) URL",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::invalid(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    120
}
