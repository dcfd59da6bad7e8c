// ABOUTME: Prompt construction for spec generation
// ABOUTME: Embeds user input; absent constraints become explicit instructions

use crate::validator::GenerateSpecRequest;

// Absent optional fields are substituted, never omitted: leaving a line out
// lets the model treat the constraint as ignorable instead of defaulting
// sensibly from product type and goal.
const SUCCESS_CRITERIA_FALLBACK: &str =
    "Not specified by user, some reasonable defaults can be assumed based on the goal and product type";
const TECHNICAL_CONSTRAINTS_FALLBACK: &str =
    "None specified, use your judgement to assume any reasonable constraints based on the product type and goal";
const TIMELINE_FALLBACK: &str =
    "Not specified by user, use your judgement to assume a reasonable timeline for a product of this type and complexity";
const BUDGET_FALLBACK: &str =
    "Not specified by user, use your judgement to assume a reasonable budget for a product of this type and complexity";

const OUTPUT_STRUCTURE: &str = r#"{
  "title": "string",
  "goal": "string",
  "targetUser": "string",
  "summary": "string",
  "productType": "string",
  "complexity": "string",
  "estimatedTimeline": "string",
  "successCriteria": ["string"],
  "stories": [
    {
      "title": "string",
      "description": "string",
      "tasks": ["string"]
    }
  ],
  "risks": ["string"],
  "unknowns": ["string"],
  "milestones": [
    {
      "title": "string",
      "description": "string"
    }
  ]
}"#;

/// System prompt for every generation call.
pub fn system_prompt() -> String {
    "You are a senior product architect.".to_string()
}

/// Build the single-instruction generation prompt from a validated request.
pub fn spec_prompt(request: &GenerateSpecRequest) -> String {
    format!(
        "Use the following user constraints carefully.\n\
         \n\
         User Input:\n\
         Title: {title}\n\
         Goal: {goal}\n\
         Target Users: {target_users}\n\
         Product Type: {product_type}\n\
         \n\
         Success Criteria: {success_criteria}\n\
         Technical Constraints: {technical_constraints}\n\
         Timeline Constraint: {timeline_constraint}\n\
         Budget Constraint: {budget_constraint}\n\
         \n\
         Generate a structured product specification in STRICT JSON format.\n\
         \n\
         Return ONLY valid JSON with this structure:\n\
         \n\
         {structure}\n\
         \n\
         Respect technical, budget, and timeline constraints while planning.",
        title = request.title,
        goal = request.goal,
        target_users = request.target_users,
        product_type = request.product_type,
        success_criteria = request
            .success_criteria
            .as_deref()
            .unwrap_or(SUCCESS_CRITERIA_FALLBACK),
        technical_constraints = request
            .technical_constraints
            .as_deref()
            .unwrap_or(TECHNICAL_CONSTRAINTS_FALLBACK),
        timeline_constraint = request
            .timeline_constraint
            .as_deref()
            .unwrap_or(TIMELINE_FALLBACK),
        budget_constraint = request
            .budget_constraint
            .as_deref()
            .unwrap_or(BUDGET_FALLBACK),
        structure = OUTPUT_STRUCTURE,
    )
}
