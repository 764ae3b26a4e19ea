//! Prompt construction for the estimation request.
//!
//! One fixed, deterministic transformation of the parameters: existing
//! areas drive demolition costs, proposed areas drive new construction,
//! and the model is constrained to emit categories 1:1 with the selected
//! scope flags.

use crate::domain::project::ProjectParams;

/// System instruction sent with every estimation request.
pub fn system_instruction() -> &'static str {
    "You are a professional estimator. Be precise. ONLY include categories \
     that match the user's selected scope. If a scope is not selected, do \
     not generate a category for it. Always return valid JSON. Ensure \
     'recommendedScopes' is populated with valuable additions relevant to \
     the specific project parameters."
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the estimation prompt for the given parameters.
pub fn build_prompt(params: &ProjectParams) -> String {
    let custom_scope = if params.include_custom_scope && !params.custom_scope.is_empty() {
        params.custom_scope.as_str()
    } else {
        "None"
    };

    format!(
        "Act as a Senior Quantity Surveyor and Construction Cost Estimator.\n\
         Project: {name}\n\
         Location: {location}\n\
         Cost Scenario: {scenario}\n\
         \n\
         CORE CALCULATION RULES:\n\
         1. DEMOLITION COSTS: Must be calculated based ONLY on existing square footage \
         ({existing_building} SF building, {existing_site} SF site).\n\
         2. NEW CONSTRUCTION: Must be calculated based on proposed square footage \
         ({proposed_building} SF building, {proposed_site} SF site).\n\
         \n\
         SCOPE SELECTION (CRITICAL: ONLY include categories in the response for the \
         items listed as TRUE below):\n\
         - Demolition Selected: {demolition} (Types: {demolition_types})\n\
         - Site Prep Selected: {site_prep} (Types: {site_prep_types})\n\
         - Structural Shell Selected: {structure} (Standard: {shell_delivery})\n\
         - Interior Fit-out Selected: {interior}\n\
         - Custom Scope/Details: {custom_scope}\n\
         \n\
         Instructions for Output:\n\
         1. ONLY return budget categories for the scopes selected above.\n\
         2. If 'Structural Shell' is FALSE, do NOT include a Shell Construction category.\n\
         3. If 'Interior Fit-out' is FALSE, do NOT include an Interior Fit-out category.\n\
         4. If a custom scope is provided, incorporate its costs as appropriate \
         categories or line items.\n\
         5. Calculate costs based on local material/labor rates for {location}.\n\
         6. Use unique string IDs for all categories and items.\n\
         7. Ensure every line item has an \"included\" property set to true by default.\n\
         \n\
         EXPERT ADVICE & ADDITIONAL SCOPES:\n\
         - In the \"expertAdvice\" field, provide a high-level summary of the overall \
         budget health.\n\
         - In the \"recommendedScopes\" field, provide an array of 3-5 specific project \
         components that are NOT currently in the budget but likely necessary, each with \
         a name, why it is critical for this project type and location, and a placeholder \
         cost range (e.g., \"$5k - $15k\" or \"2-3% of Total\").\n\
         \n\
         Return strictly JSON matching the response schema.",
        name = params.name,
        location = params.location,
        scenario = params.scenario,
        existing_building = params.existing_building_sqft,
        existing_site = params.existing_site_sqft,
        proposed_building = params.proposed_building_sqft,
        proposed_site = params.proposed_site_sqft,
        demolition = params.include_demolition,
        demolition_types = join(&params.demolition_types),
        site_prep = params.include_site_prep,
        site_prep_types = join(&params.site_prep_types),
        structure = params.include_structure,
        shell_delivery = params.shell_delivery,
        interior = params.include_interior,
        custom_scope = custom_scope,
    )
}
