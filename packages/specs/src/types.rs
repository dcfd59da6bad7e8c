// ABOUTME: Entity types for product specifications
// ABOUTME: Row structs for the six spec tables plus reassembled detail views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root specification row. The four ownership lists hold child IDs in
/// creation order and always match the children whose foreign key points
/// back at this spec.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub id: String,
    pub title: String,
    pub goal: String,
    pub target_user: String,
    pub summary: String,
    pub product_type: String,
    pub complexity: String,
    pub estimated_timeline: String,
    #[sqlx(json)]
    pub success_criteria: Vec<String>,
    #[sqlx(json)]
    pub technical_constraints: Vec<String>,
    pub timeline_constraint: String,
    pub budget_constraint: String,
    #[sqlx(json)]
    pub stories: Vec<String>,
    #[sqlx(json)]
    pub risks: Vec<String>,
    #[sqlx(json)]
    pub unknowns: Vec<String>,
    #[sqlx(json)]
    pub milestones: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User story row. `order` is the zero-based position within the parent
/// spec; `tasks` holds owned task IDs in task order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: i64,
    pub spec_id: String,
    #[sqlx(json)]
    pub tasks: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    pub order: i64,
    pub story_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: String,
    pub content: String,
    pub order: i64,
    pub spec_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Structurally identical to [`Risk`]; kept separate because the two play
/// different roles in a spec and live in different tables.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unknown {
    pub id: String,
    pub content: String,
    pub order: i64,
    pub spec_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: i64,
    pub spec_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scalar-only projection returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    pub id: String,
    pub title: String,
    pub goal: String,
    pub product_type: String,
    pub complexity: String,
    pub estimated_timeline: String,
    pub created_at: DateTime<Utc>,
}

/// A story with its tasks expanded, in ascending task order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: i64,
    pub spec_id: String,
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoryDetail {
    pub fn assemble(story: Story, tasks: Vec<Task>) -> Self {
        Self {
            id: story.id,
            title: story.title,
            description: story.description,
            order: story.order,
            spec_id: story.spec_id,
            tasks,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

/// Fully reassembled spec: every ownership list resolved into child
/// objects, each list in ascending `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDetail {
    pub id: String,
    pub title: String,
    pub goal: String,
    pub target_user: String,
    pub summary: String,
    pub product_type: String,
    pub complexity: String,
    pub estimated_timeline: String,
    pub success_criteria: Vec<String>,
    pub technical_constraints: Vec<String>,
    pub timeline_constraint: String,
    pub budget_constraint: String,
    pub stories: Vec<StoryDetail>,
    pub risks: Vec<Risk>,
    pub unknowns: Vec<Unknown>,
    pub milestones: Vec<Milestone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpecDetail {
    pub fn assemble(
        spec: Spec,
        stories: Vec<StoryDetail>,
        risks: Vec<Risk>,
        unknowns: Vec<Unknown>,
        milestones: Vec<Milestone>,
    ) -> Self {
        Self {
            id: spec.id,
            title: spec.title,
            goal: spec.goal,
            target_user: spec.target_user,
            summary: spec.summary,
            product_type: spec.product_type,
            complexity: spec.complexity,
            estimated_timeline: spec.estimated_timeline,
            success_criteria: spec.success_criteria,
            technical_constraints: spec.technical_constraints,
            timeline_constraint: spec.timeline_constraint,
            budget_constraint: spec.budget_constraint,
            stories,
            risks,
            unknowns,
            milestones,
            created_at: spec.created_at,
            updated_at: spec.updated_at,
        }
    }
}
