// ABOUTME: Types for structured AI generation output
// ABOUTME: Deserialization doubles as the output schema check

use serde::{Deserialize, Serialize};

/// The shape the model must return. Every field is required; a missing or
/// wrong-typed field fails deserialization and with it the whole
/// generation. Unknown extra fields are tolerated. There is deliberately
/// no technicalConstraints field here: user-authored constraints are
/// carried through from the request and never overwritten by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSpecOutput {
    pub title: String,
    pub goal: String,
    pub target_user: String,
    pub summary: String,
    pub product_type: String,
    pub complexity: String,
    pub estimated_timeline: String,
    pub success_criteria: Vec<String>,
    pub stories: Vec<AiStoryOutput>,
    pub risks: Vec<String>,
    pub unknowns: Vec<String>,
    pub milestones: Vec<AiMilestoneOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStoryOutput {
    pub title: String,
    pub description: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMilestoneOutput {
    pub title: String,
    pub description: String,
}
