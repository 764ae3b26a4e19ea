//! BudgetResult - the structured budget returned by the estimation gateway.
//!
//! Field names (camelCase on the wire) are the bit-exact response contract
//! shared with the gateway's JSON schema. `totalCost` is informational
//! only: the authoritative displayed total is always the sum of included
//! line items, recomputed on every read and never cached.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// The smallest toggle-able costed unit within a budget category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within the enclosing category
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Only included items contribute to subtotals and the grand total
    pub included: bool,
}

/// A costed category of work, one per selected scope flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    /// Unique within the result
    pub id: String,
    pub name: String,
    /// Originally suggested category amount (informational)
    pub amount: f64,
    /// Percentage-of-total hint (informational)
    pub percentage: f64,
    pub items: Vec<LineItem>,
}

impl BudgetCategory {
    /// Sum of amounts over items currently included.
    pub fn included_subtotal(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.included)
            .map(|item| item.amount)
            .sum()
    }
}

/// An advisory scope suggestion. Never contributes to totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedScope {
    pub name: String,
    /// Why this scope is likely necessary for the project
    pub importance: String,
    /// Free-text placeholder estimate, e.g. "$5k - $15k"
    pub suggested_cost_range: String,
}

/// Structured budget breakdown produced by the estimation gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    /// Gateway-reported total; informational only, may diverge from
    /// [`displayed_total`] once items are toggled
    ///
    /// [`displayed_total`]: BudgetResult::displayed_total
    pub total_cost: f64,
    pub site_cost_per_sq_ft: f64,
    pub shell_cost_per_sq_ft: f64,
    #[serde(default)]
    pub cost_index: Option<f64>,
    pub categories: Vec<BudgetCategory>,
    pub expert_advice: String,
    pub recommended_scopes: Vec<RecommendedScope>,
    pub risk_factors: Vec<String>,
    pub timeline_weeks: f64,
    /// Hints about documents that would improve the estimate
    #[serde(default)]
    pub needed_files: Option<Vec<String>>,
}

impl BudgetResult {
    /// The authoritative grand total: sum of amounts over all included
    /// items across all categories. Recomputed fresh on every call.
    pub fn displayed_total(&self) -> f64 {
        self.categories
            .iter()
            .map(BudgetCategory::included_subtotal)
            .sum()
    }

    /// Looks up a line item by category and item id.
    pub fn find_item(&self, category_id: &str, item_id: &str) -> Option<&LineItem> {
        self.categories
            .iter()
            .find(|cat| cat.id == category_id)?
            .items
            .iter()
            .find(|item| item.id == item_id)
    }

    /// Flips the `included` flag of exactly the targeted item.
    ///
    /// Returns false without mutating anything when either id is unknown.
    pub fn toggle_item(&mut self, category_id: &str, item_id: &str) -> bool {
        let Some(category) = self.categories.iter_mut().find(|cat| cat.id == category_id)
        else {
            return false;
        };
        let Some(item) = category.items.iter_mut().find(|item| item.id == item_id) else {
            return false;
        };
        item.included = !item.included;
        true
    }

    /// Structural validation of a gateway response.
    ///
    /// Enforced symmetrically with the request schema: every category has
    /// at least one item, category ids are unique within the result, and
    /// item ids are unique within their category. Malformed responses are
    /// rejected at the gateway boundary rather than propagated partially.
    pub fn validate_structure(&self) -> Result<(), ValidationError> {
        let mut category_ids = std::collections::HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() {
                return Err(ValidationError::empty_field("category.id"));
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "categories",
                    format!("duplicate category id '{}'", category.id),
                ));
            }
            if category.items.is_empty() {
                return Err(ValidationError::invalid_format(
                    "categories",
                    format!("category '{}' has no line items", category.id),
                ));
            }
            let mut item_ids = std::collections::HashSet::new();
            for item in &category.items {
                if item.id.is_empty() {
                    return Err(ValidationError::empty_field("item.id"));
                }
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ValidationError::invalid_format(
                        "items",
                        format!(
                            "duplicate item id '{}' in category '{}'",
                            item.id, category.id
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, amount: f64, included: bool) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            amount,
            included,
        }
    }

    fn category(id: &str, items: Vec<LineItem>) -> BudgetCategory {
        BudgetCategory {
            id: id.to_string(),
            name: format!("Category {}", id),
            amount: items.iter().map(|i| i.amount).sum(),
            percentage: 100.0,
            items,
        }
    }

    fn result_with(categories: Vec<BudgetCategory>) -> BudgetResult {
        BudgetResult {
            total_cost: categories
                .iter()
                .flat_map(|c| c.items.iter())
                .map(|i| i.amount)
                .sum(),
            site_cost_per_sq_ft: 12.0,
            shell_cost_per_sq_ft: 210.0,
            cost_index: Some(1.02),
            categories,
            expert_advice: "Budget looks healthy.".to_string(),
            recommended_scopes: vec![],
            risk_factors: vec![],
            timeline_weeks: 32.0,
            needed_files: None,
        }
    }

    #[test]
    fn displayed_total_sums_only_included_items() {
        let result = result_with(vec![category(
            "shell",
            vec![item("framing", 50_000.0, true), item("roof", 30_000.0, false)],
        )]);
        assert_eq!(result.displayed_total(), 50_000.0);
    }

    #[test]
    fn displayed_total_recomputes_after_toggle() {
        let mut result = result_with(vec![category(
            "shell",
            vec![item("framing", 50_000.0, true), item("roof", 30_000.0, true)],
        )]);
        assert_eq!(result.displayed_total(), 80_000.0);

        assert!(result.toggle_item("shell", "roof"));
        assert_eq!(result.displayed_total(), 50_000.0);

        assert!(result.toggle_item("shell", "roof"));
        assert_eq!(result.displayed_total(), 80_000.0);
    }

    #[test]
    fn displayed_total_may_diverge_from_reported_total() {
        let mut result = result_with(vec![category(
            "shell",
            vec![item("framing", 50_000.0, true), item("roof", 30_000.0, true)],
        )]);
        result.toggle_item("shell", "roof");
        assert_eq!(result.total_cost, 80_000.0);
        assert_eq!(result.displayed_total(), 50_000.0);
    }

    #[test]
    fn recommended_scopes_never_affect_totals() {
        let mut result = result_with(vec![category(
            "interior",
            vec![item("drywall", 10_000.0, true)],
        )]);
        result.recommended_scopes.push(RecommendedScope {
            name: "Landscaping".to_string(),
            importance: "Required by zoning".to_string(),
            suggested_cost_range: "$5k - $15k".to_string(),
        });
        assert_eq!(result.displayed_total(), 10_000.0);
    }

    #[test]
    fn toggle_item_unknown_category_is_noop() {
        let mut result = result_with(vec![category(
            "shell",
            vec![item("framing", 50_000.0, true)],
        )]);
        let before = result.clone();
        assert!(!result.toggle_item("nope", "framing"));
        assert_eq!(result, before);
    }

    #[test]
    fn toggle_item_unknown_item_is_noop() {
        let mut result = result_with(vec![category(
            "shell",
            vec![item("framing", 50_000.0, true)],
        )]);
        let before = result.clone();
        assert!(!result.toggle_item("shell", "nope"));
        assert_eq!(result, before);
    }

    #[test]
    fn validate_structure_accepts_well_formed_result() {
        let result = result_with(vec![
            category("shell", vec![item("framing", 1.0, true)]),
            category("interior", vec![item("drywall", 2.0, true)]),
        ]);
        assert!(result.validate_structure().is_ok());
    }

    #[test]
    fn validate_structure_rejects_empty_category() {
        let result = result_with(vec![category("shell", vec![])]);
        assert!(result.validate_structure().is_err());
    }

    #[test]
    fn validate_structure_rejects_duplicate_category_ids() {
        let result = result_with(vec![
            category("shell", vec![item("a", 1.0, true)]),
            category("shell", vec![item("b", 2.0, true)]),
        ]);
        assert!(result.validate_structure().is_err());
    }

    #[test]
    fn validate_structure_rejects_duplicate_item_ids_within_category() {
        let result = result_with(vec![category(
            "shell",
            vec![item("a", 1.0, true), item("a", 2.0, true)],
        )]);
        assert!(result.validate_structure().is_err());
    }

    #[test]
    fn validate_structure_allows_same_item_id_across_categories() {
        let result = result_with(vec![
            category("shell", vec![item("labor", 1.0, true)]),
            category("interior", vec![item("labor", 2.0, true)]),
        ]);
        assert!(result.validate_structure().is_ok());
    }

    #[test]
    fn deserializes_from_wire_contract() {
        let json = r#"{
            "totalCost": 80000,
            "siteCostPerSqFt": 12.5,
            "shellCostPerSqFt": 210,
            "costIndex": 1.02,
            "categories": [{
                "id": "shell",
                "name": "Shell Construction",
                "amount": 80000,
                "percentage": 100,
                "items": [
                    {"id": "framing", "name": "Framing", "amount": 50000, "included": true},
                    {"id": "roof", "name": "Roofing", "amount": 30000, "included": true}
                ]
            }],
            "expertAdvice": "Healthy budget.",
            "recommendedScopes": [
                {"name": "Landscaping", "importance": "Zoning", "suggestedCostRange": "$5k - $15k"}
            ],
            "riskFactors": ["Material escalation"],
            "timelineWeeks": 32
        }"#;
        let result: BudgetResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.displayed_total(), 80_000.0);
        assert_eq!(result.needed_files, None);
        assert!(result.validate_structure().is_ok());
    }

    #[test]
    fn deserialize_rejects_missing_required_field() {
        // No "included" on the line item
        let json = r#"{
            "totalCost": 1, "siteCostPerSqFt": 1, "shellCostPerSqFt": 1,
            "categories": [{"id": "c", "name": "C", "amount": 1, "percentage": 100,
                "items": [{"id": "i", "name": "I", "amount": 1}]}],
            "expertAdvice": "", "recommendedScopes": [], "riskFactors": [],
            "timelineWeeks": 1
        }"#;
        assert!(serde_json::from_str::<BudgetResult>(json).is_err());
    }
}
