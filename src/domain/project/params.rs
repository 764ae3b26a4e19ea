//! ProjectParams value object - the per-submission project configuration.
//!
//! One mutable instance exists per session. It is edited field by field in
//! the presentation layer's edit buffers and handed to the session manager
//! on submit; submissions themselves treat it as an immutable value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Cost scenario selecting the pricing band for the estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostScenario {
    #[serde(rename = "Economy/Budget")]
    Economy,
    #[default]
    #[serde(rename = "Standard/Market")]
    Standard,
    #[serde(rename = "Premium/Luxury")]
    Premium,
}

impl fmt::Display for CostScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CostScenario::Economy => "Economy/Budget",
            CostScenario::Standard => "Standard/Market",
            CostScenario::Premium => "Premium/Luxury",
        };
        write!(f, "{}", s)
    }
}

/// Delivery standard for the structural shell scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellDelivery {
    #[serde(rename = "Cold/Dark Shell")]
    DarkShell,
    #[serde(rename = "Warm Shell")]
    WarmShell,
    #[default]
    #[serde(rename = "Vanilla Box (White Box)")]
    VanillaBox,
}

impl fmt::Display for ShellDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShellDelivery::DarkShell => "Cold/Dark Shell",
            ShellDelivery::WarmShell => "Warm Shell",
            ShellDelivery::VanillaBox => "Vanilla Box (White Box)",
        };
        write!(f, "{}", s)
    }
}

/// Detail selector for the demolition scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemolitionType {
    #[serde(rename = "Site Demolition Only")]
    SiteOnly,
    #[serde(rename = "Building Demolition Only")]
    BuildingOnly,
    #[serde(rename = "Site and Building Demolition")]
    Both,
}

impl fmt::Display for DemolitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DemolitionType::SiteOnly => "Site Demolition Only",
            DemolitionType::BuildingOnly => "Building Demolition Only",
            DemolitionType::Both => "Site and Building Demolition",
        };
        write!(f, "{}", s)
    }
}

/// Detail selector for the site preparation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SitePrepType {
    #[serde(rename = "Grading and Compaction")]
    Grading,
    #[serde(rename = "Utility Stubs to Building Pad")]
    StubsToPad,
    #[serde(rename = "Utility Stubs to Lot Line")]
    StubsToLotLine,
}

impl fmt::Display for SitePrepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SitePrepType::Grading => "Grading and Compaction",
            SitePrepType::StubsToPad => "Utility Stubs to Building Pad",
            SitePrepType::StubsToLotLine => "Utility Stubs to Lot Line",
        };
        write!(f, "{}", s)
    }
}

/// An attached project document (drawings, surveys, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Original file name
    pub name: String,
    /// MIME type, e.g. "application/pdf"
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

/// Identifies one of the five construction scope flags.
///
/// UI toggle identifiers map onto this enum and the flag is flipped through
/// an explicit match; scope flags are never looked up by field-name string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeToggle {
    Demolition,
    SitePrep,
    Structure,
    Interior,
    CustomScope,
}

impl ScopeToggle {
    /// All scope toggles in presentation order.
    pub fn all() -> [ScopeToggle; 5] {
        [
            ScopeToggle::Demolition,
            ScopeToggle::SitePrep,
            ScopeToggle::Structure,
            ScopeToggle::Interior,
            ScopeToggle::CustomScope,
        ]
    }
}

/// Project configuration submitted for estimation.
///
/// Invariant: area fields are non-negative (enforced by [`validate`]).
/// A scope flag may be true while its detail list is empty; that is a
/// valid, if uninformative, state.
///
/// [`validate`]: ProjectParams::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParams {
    pub name: String,

    /// Existing building area in square feet (drives demolition costs)
    pub existing_building_sqft: f64,
    /// Existing site area in square feet (drives demolition costs)
    pub existing_site_sqft: f64,
    /// Proposed site area in square feet (drives new construction costs)
    pub proposed_site_sqft: f64,
    /// Proposed building area in square feet (drives new construction costs)
    pub proposed_building_sqft: f64,

    pub scenario: CostScenario,
    pub location: String,

    pub include_demolition: bool,
    pub demolition_types: Vec<DemolitionType>,
    pub include_site_prep: bool,
    pub site_prep_types: Vec<SitePrepType>,
    pub include_structure: bool,
    pub shell_delivery: ShellDelivery,
    pub include_interior: bool,
    pub include_custom_scope: bool,
    pub custom_scope: String,

    pub files: Vec<ProjectFile>,
}

impl Default for ProjectParams {
    fn default() -> Self {
        Self {
            name: "New Construction Project".to_string(),
            existing_building_sqft: 0.0,
            existing_site_sqft: 0.0,
            proposed_site_sqft: 0.0,
            proposed_building_sqft: 0.0,
            scenario: CostScenario::Standard,
            location: "Austin, TX".to_string(),
            include_demolition: false,
            demolition_types: Vec::new(),
            include_site_prep: false,
            site_prep_types: Vec::new(),
            include_structure: false,
            shell_delivery: ShellDelivery::VanillaBox,
            include_interior: false,
            include_custom_scope: false,
            custom_scope: String::new(),
            files: Vec::new(),
        }
    }
}

impl ProjectParams {
    /// Validates structural invariants (non-negative areas).
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("existing_building_sqft", self.existing_building_sqft),
            ("existing_site_sqft", self.existing_site_sqft),
            ("proposed_site_sqft", self.proposed_site_sqft),
            ("proposed_building_sqft", self.proposed_building_sqft),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::negative(field, value));
            }
        }
        Ok(())
    }

    /// Returns whether the given scope flag is enabled.
    pub fn scope_enabled(&self, toggle: ScopeToggle) -> bool {
        match toggle {
            ScopeToggle::Demolition => self.include_demolition,
            ScopeToggle::SitePrep => self.include_site_prep,
            ScopeToggle::Structure => self.include_structure,
            ScopeToggle::Interior => self.include_interior,
            ScopeToggle::CustomScope => self.include_custom_scope,
        }
    }

    /// Sets the given scope flag.
    pub fn set_scope(&mut self, toggle: ScopeToggle, enabled: bool) {
        match toggle {
            ScopeToggle::Demolition => self.include_demolition = enabled,
            ScopeToggle::SitePrep => self.include_site_prep = enabled,
            ScopeToggle::Structure => self.include_structure = enabled,
            ScopeToggle::Interior => self.include_interior = enabled,
            ScopeToggle::CustomScope => self.include_custom_scope = enabled,
        }
    }

    /// Flips the given scope flag and returns the new value.
    pub fn toggle_scope(&mut self, toggle: ScopeToggle) -> bool {
        let next = !self.scope_enabled(toggle);
        self.set_scope(toggle, next);
        next
    }
}
