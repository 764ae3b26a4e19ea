//! Adapters - concrete implementations of the ports.

pub mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiEstimator};
pub use mock::{MockEstimator, MockOutcome};
