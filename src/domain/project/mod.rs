//! Project parameter value objects.

mod params;

pub use params::{
    CostScenario, DemolitionType, ProjectFile, ProjectParams, ScopeToggle, ShellDelivery,
    SitePrepType,
};
