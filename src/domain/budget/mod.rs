//! Budget result value objects returned by the estimation gateway.

mod result;

pub use result::{BudgetCategory, BudgetResult, LineItem, RecommendedScope};
