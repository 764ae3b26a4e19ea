//! Gemini estimation gateway adapter.
//!
//! Implements the Estimator port against the Gemini `generateContent`
//! API with a JSON-schema-constrained response.

mod estimator;
mod prompt;
mod wire;

pub use estimator::{GeminiConfig, GeminiEstimator};
