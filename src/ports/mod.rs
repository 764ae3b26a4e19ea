//! Ports - interfaces the domain uses to talk to the outside world.

mod estimator;

pub use estimator::{Estimator, EstimatorError};
