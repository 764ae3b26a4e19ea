//! Domain layer: value objects and the session core.

pub mod budget;
pub mod foundation;
pub mod project;
pub mod session;
