//! GeminiEstimator - Estimator implementation for the Gemini API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::from_app_config(&app_config.ai);
//! let estimator = GeminiEstimator::new(config);
//! ```
//!
//! A missing API key does not fail construction; `estimate` short-circuits
//! to `MissingCredential` without touching the network, so the session
//! degrades to its failed path instead of crashing.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::budget::BudgetResult;
use crate::domain::project::ProjectParams;
use crate::ports::{Estimator, EstimatorError};

use super::prompt::{build_prompt, system_instruction};
use super::wire::{
    budget_response_schema, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part,
};

/// Configuration for the Gemini estimator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; None degrades every call to `MissingCredential`.
    api_key: Option<Secret<String>>,
    /// Model to use (e.g. "gemini-3-flash-preview").
    pub model: String,
    /// Base URL for the generative language API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Creates a configuration without a credential.
    pub fn without_credential() -> Self {
        Self {
            api_key: None,
            ..Self::new(String::new())
        }
    }

    /// Builds from the loaded application configuration. Done once at
    /// startup; the environment is never re-read per call.
    pub fn from_app_config(config: &AiConfig) -> Self {
        Self {
            api_key: config
                .has_api_key()
                .then(|| Secret::new(config.gemini_api_key.clone().unwrap_or_default())),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// Gemini API estimator.
pub struct GeminiEstimator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiEstimator {
    /// Creates a new estimator with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts the params into the request payload: the estimation
    /// prompt plus every attached file as an inline data part.
    fn to_request(&self, params: &ProjectParams) -> GenerateContentRequest {
        let mut parts = vec![Part::text(build_prompt(params))];
        parts.extend(params.files.iter().map(Part::inline));

        GenerateContentRequest {
            contents: vec![Content { parts }],
            system_instruction: Some(Content {
                parts: vec![Part::text(system_instruction())],
            }),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: budget_response_schema(),
            },
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        params: &ProjectParams,
    ) -> Result<Response, EstimatorError> {
        let request = self.to_request(params);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EstimatorError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    EstimatorError::network(format!("Connection failed: {}", e))
                } else {
                    EstimatorError::network(e.to_string())
                }
            })
    }

    /// Checks the response status, mapping failures to port errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, EstimatorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "estimation request failed");

        match status.as_u16() {
            401 | 403 => Err(EstimatorError::AuthenticationFailed),
            429 => Err(EstimatorError::RateLimited {
                retry_after_secs: retry_after.unwrap_or(30),
            }),
            400 => Err(EstimatorError::InvalidRequest(error_body)),
            500..=599 => Err(EstimatorError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(EstimatorError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Decodes the candidate text into a validated budget.
    fn parse_budget(&self, response: GenerateContentResponse) -> Result<BudgetResult, EstimatorError> {
        let text = response
            .first_candidate_text()
            .ok_or(EstimatorError::EmptyResponse)?;

        let budget: BudgetResult = serde_json::from_str(&text)
            .map_err(|e| EstimatorError::parse(format!("Failed to decode budget: {}", e)))?;

        budget
            .validate_structure()
            .map_err(|e| EstimatorError::schema_violation(e.to_string()))?;

        Ok(budget)
    }
}

#[async_trait]
impl Estimator for GeminiEstimator {
    async fn estimate(&self, params: &ProjectParams) -> Result<BudgetResult, EstimatorError> {
        let Some(api_key) = self.config.api_key() else {
            tracing::warn!("estimate requested with no API credential configured");
            return Err(EstimatorError::MissingCredential);
        };
        tracing::debug!(model = %self.config.model, project = %params.name, "dispatching estimation request");
        let response = self.send_request(api_key, params).await?;
        let response = self.handle_response_status(response).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EstimatorError::parse(format!("Failed to parse response: {}", e)))?;

        let budget = self.parse_budget(body)?;
        tracing::debug!(
            categories = budget.categories.len(),
            total = budget.total_cost,
            "estimation response accepted"
        );
        Ok(budget)
    }
}
