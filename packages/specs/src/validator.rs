// ABOUTME: Input validation for every external boundary of the spec pipeline
// ABOUTME: Payload structs plus validation functions returning field-level errors

use serde::{Deserialize, Serialize};

use crate::pagination::{PaginationParams, DEFAULT_PAGE_SIZE, MIN_PAGE};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 200;
pub const GOAL_MIN: usize = 10;
pub const TARGET_USERS_MIN: usize = 3;
pub const PRODUCT_TYPE_MIN: usize = 2;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn check_min(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("must be at least {} characters", min),
        ));
    }
}

fn check_max(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("cannot exceed {} characters", max),
        ));
    }
}

// ============================================================================
// Generation request
// ============================================================================

/// Raw generation request body, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpecPayload {
    pub title: Option<String>,
    pub goal: Option<String>,
    pub target_users: Option<String>,
    pub product_type: Option<String>,
    pub success_criteria: Option<String>,
    pub technical_constraints: Option<String>,
    pub timeline_constraint: Option<String>,
    pub budget_constraint: Option<String>,
}

/// A generation request that passed validation.
#[derive(Debug, Clone)]
pub struct GenerateSpecRequest {
    pub title: String,
    pub goal: String,
    pub target_users: String,
    pub product_type: String,
    pub success_criteria: Option<String>,
    pub technical_constraints: Option<String>,
    pub timeline_constraint: Option<String>,
    pub budget_constraint: Option<String>,
}

impl GenerateSpecPayload {
    pub fn validate(self) -> Result<GenerateSpecRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required(&mut errors, "title", self.title, TITLE_MIN);
        let goal = required(&mut errors, "goal", self.goal, GOAL_MIN);
        let target_users = required(&mut errors, "targetUsers", self.target_users, TARGET_USERS_MIN);
        let product_type = required(&mut errors, "productType", self.product_type, PRODUCT_TYPE_MIN);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GenerateSpecRequest {
            title: title.unwrap_or_default(),
            goal: goal.unwrap_or_default(),
            target_users: target_users.unwrap_or_default(),
            product_type: product_type.unwrap_or_default(),
            success_criteria: self.success_criteria,
            technical_constraints: self.technical_constraints,
            timeline_constraint: self.timeline_constraint,
            budget_constraint: self.budget_constraint,
        })
    }
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<String>,
    min: usize,
) -> Option<String> {
    match value {
        None => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(v) => {
            check_min(errors, field, &v, min);
            Some(v)
        }
    }
}

// ============================================================================
// Update request
// ============================================================================

/// Raw partial-update body. Unrecognized fields are dropped during
/// deserialization, so a body with only unknown keys counts as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecPayload {
    pub title: Option<String>,
    pub goal: Option<String>,
    pub target_user: Option<String>,
    pub summary: Option<String>,
    pub timeline_constraint: Option<String>,
    pub budget_constraint: Option<String>,
    pub technical_constraints: Option<Vec<String>>,
    pub success_criteria: Option<Vec<String>>,
}

/// An update request that passed validation: at least one field present,
/// and every present field within its bounds.
#[derive(Debug, Clone, Default)]
pub struct UpdateSpecRequest {
    pub title: Option<String>,
    pub goal: Option<String>,
    pub target_user: Option<String>,
    pub summary: Option<String>,
    pub timeline_constraint: Option<String>,
    pub budget_constraint: Option<String>,
    pub technical_constraints: Option<Vec<String>>,
    pub success_criteria: Option<Vec<String>>,
}

impl UpdateSpecPayload {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.goal.is_none()
            && self.target_user.is_none()
            && self.summary.is_none()
            && self.timeline_constraint.is_none()
            && self.budget_constraint.is_none()
            && self.technical_constraints.is_none()
            && self.success_criteria.is_none()
    }

    pub fn validate(self) -> Result<UpdateSpecRequest, Vec<FieldError>> {
        if self.is_empty() {
            return Err(vec![FieldError::new(
                "body",
                "At least one field must be provided",
            )]);
        }

        let mut errors = Vec::new();

        if let Some(title) = &self.title {
            check_min(&mut errors, "title", title, TITLE_MIN);
            check_max(&mut errors, "title", title, TITLE_MAX);
        }
        if let Some(goal) = &self.goal {
            check_min(&mut errors, "goal", goal, GOAL_MIN);
        }
        if let Some(target_user) = &self.target_user {
            check_min(&mut errors, "targetUser", target_user, TARGET_USERS_MIN);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateSpecRequest {
            title: self.title,
            goal: self.goal,
            target_user: self.target_user,
            summary: self.summary,
            timeline_constraint: self.timeline_constraint,
            budget_constraint: self.budget_constraint,
            technical_constraints: self.technical_constraints,
            success_criteria: self.success_criteria,
        })
    }
}

// ============================================================================
// List query and identifier params
// ============================================================================

/// Query parameters for the list endpoint. Out-of-range page/limit values
/// are clamped rather than rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSpecsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub product_type: Option<String>,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListSpecsQuery {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            product_type: None,
        }
    }
}

impl ListSpecsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::with_page_and_limit(self.page, self.limit)
    }
}

/// Validate an identifier path parameter. A malformed ID is a validation
/// failure, not a missing row.
pub fn validate_spec_id(id: &str) -> Result<(), Vec<FieldError>> {
    if specforge_core::is_entity_id(id) {
        Ok(())
    } else {
        Err(vec![FieldError::new("id", "Invalid spec ID")])
    }
}
