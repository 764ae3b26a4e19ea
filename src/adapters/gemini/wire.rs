//! Wire types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::project::ProjectFile;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One request part: either text or inline binary data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(file: &ProjectFile) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// Response body for `generateContent` (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// The response schema constraining the model's output to the
/// `BudgetResult` shape. This is the bit-exact contract shared with
/// [`BudgetResult::validate_structure`] on the read side.
///
/// [`BudgetResult::validate_structure`]: crate::domain::budget::BudgetResult::validate_structure
pub fn budget_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalCost": { "type": "NUMBER" },
            "siteCostPerSqFt": { "type": "NUMBER" },
            "shellCostPerSqFt": { "type": "NUMBER" },
            "costIndex": { "type": "NUMBER" },
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "amount": { "type": "NUMBER" },
                        "percentage": { "type": "NUMBER" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "id": { "type": "STRING" },
                                    "name": { "type": "STRING" },
                                    "amount": { "type": "NUMBER" },
                                    "included": { "type": "BOOLEAN" }
                                },
                                "required": ["id", "name", "amount", "included"]
                            }
                        }
                    },
                    "required": ["id", "name", "amount", "percentage", "items"]
                }
            },
            "expertAdvice": { "type": "STRING" },
            "recommendedScopes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "importance": { "type": "STRING" },
                        "suggestedCostRange": { "type": "STRING" }
                    },
                    "required": ["name", "importance", "suggestedCostRange"]
                }
            },
            "riskFactors": { "type": "ARRAY", "items": { "type": "STRING" } },
            "timelineWeeks": { "type": "NUMBER" },
            "neededFiles": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [
            "totalCost", "siteCostPerSqFt", "shellCostPerSqFt", "costIndex",
            "categories", "expertAdvice", "recommendedScopes", "riskFactors",
            "timelineWeeks"
        ]
    })
}
