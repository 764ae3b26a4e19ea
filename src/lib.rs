//! BuildBudget - AI-assisted construction budget estimation engine
//!
//! This crate implements the session core of a construction cost estimator:
//! project parameters are forwarded to a generative estimation gateway and
//! the returned budget is managed as an undoable, toggleable session state.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
