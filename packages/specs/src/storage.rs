// ABOUTME: Decomposition, persistence, and retrieval for product specifications
// ABOUTME: Materializes AI output into the six-table entity graph and reads it back

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use specforge_core::generate_entity_id;

use crate::ai_types::AiSpecOutput;
use crate::error::{Result, SpecError};
use crate::types::{Milestone, Risk, Spec, SpecDetail, SpecSummary, Story, StoryDetail, Task, Unknown};
use crate::validator::{GenerateSpecRequest, ListSpecsQuery, UpdateSpecRequest};

/// Sentinel stored when the user gave no timeline/budget constraint.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Normalize an optional free-text constraint to a list. Absent or empty
/// becomes an empty list; anything else becomes a one-element list.
fn to_string_list(value: Option<&str>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(s) if s.is_empty() => Vec::new(),
        Some(s) => vec![s.to_string()],
    }
}

/// Storage handle for the spec entity graph. Holds an injected pool; one
/// instance is shared across requests.
#[derive(Clone)]
pub struct SpecStorage {
    pool: SqlitePool,
}

impl SpecStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Liveness probe for the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Materialize validated AI output into the full entity graph.
    ///
    /// Children are created strictly in array order and `order` is the
    /// zero-based array position; the spec's ownership lists are filled in
    /// last, once every child exists. The whole sequence runs in one
    /// transaction, so a failed child write leaves nothing behind.
    /// `technicalConstraints` comes from the user request, never from the
    /// AI output.
    pub async fn create_from_ai(
        &self,
        ai: &AiSpecOutput,
        request: &GenerateSpecRequest,
    ) -> Result<SpecDetail> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let spec_id = generate_entity_id();
        let technical_constraints = to_string_list(request.technical_constraints.as_deref());
        let timeline_constraint = request
            .timeline_constraint
            .clone()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        let budget_constraint = request
            .budget_constraint
            .clone()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        sqlx::query(
            r#"
            INSERT INTO specs (
                id, title, goal, target_user, summary, product_type, complexity,
                estimated_timeline, success_criteria, technical_constraints,
                timeline_constraint, budget_constraint,
                stories, risks, unknowns, milestones, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '[]', '[]', '[]', '[]', ?, ?)
            "#,
        )
        .bind(&spec_id)
        .bind(&ai.title)
        .bind(&ai.goal)
        .bind(&ai.target_user)
        .bind(&ai.summary)
        .bind(&ai.product_type)
        .bind(&ai.complexity)
        .bind(&ai.estimated_timeline)
        .bind(serde_json::to_string(&ai.success_criteria)?)
        .bind(serde_json::to_string(&technical_constraints)?)
        .bind(&timeline_constraint)
        .bind(&budget_constraint)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // Stories and their tasks, in array order
        let mut story_ids = Vec::with_capacity(ai.stories.len());
        let mut stories = Vec::with_capacity(ai.stories.len());
        for (i, s) in ai.stories.iter().enumerate() {
            let story_id = generate_entity_id();
            sqlx::query(
                r#"
                INSERT INTO stories (id, title, description, "order", spec_id, tasks, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, '[]', ?, ?)
                "#,
            )
            .bind(&story_id)
            .bind(&s.title)
            .bind(&s.description)
            .bind(i as i64)
            .bind(&spec_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            let mut task_ids = Vec::with_capacity(s.tasks.len());
            let mut tasks = Vec::with_capacity(s.tasks.len());
            for (j, content) in s.tasks.iter().enumerate() {
                let task_id = generate_entity_id();
                sqlx::query(
                    r#"
                    INSERT INTO tasks (id, content, "order", story_id, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&task_id)
                .bind(content)
                .bind(j as i64)
                .bind(&story_id)
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                tasks.push(Task {
                    id: task_id.clone(),
                    content: content.clone(),
                    order: j as i64,
                    story_id: story_id.clone(),
                    created_at: now,
                    updated_at: now,
                });
                task_ids.push(task_id);
            }

            sqlx::query("UPDATE stories SET tasks = ? WHERE id = ?")
                .bind(serde_json::to_string(&task_ids)?)
                .bind(&story_id)
                .execute(&mut *tx)
                .await?;

            stories.push(StoryDetail {
                id: story_id.clone(),
                title: s.title.clone(),
                description: s.description.clone(),
                order: i as i64,
                spec_id: spec_id.clone(),
                tasks,
                created_at: now,
                updated_at: now,
            });
            story_ids.push(story_id);
        }

        // Risks
        let mut risk_ids = Vec::with_capacity(ai.risks.len());
        let mut risks = Vec::with_capacity(ai.risks.len());
        for (i, content) in ai.risks.iter().enumerate() {
            let risk_id = generate_entity_id();
            sqlx::query(
                r#"
                INSERT INTO risks (id, content, "order", spec_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&risk_id)
            .bind(content)
            .bind(i as i64)
            .bind(&spec_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            risks.push(Risk {
                id: risk_id.clone(),
                content: content.clone(),
                order: i as i64,
                spec_id: spec_id.clone(),
                created_at: now,
                updated_at: now,
            });
            risk_ids.push(risk_id);
        }

        // Unknowns
        let mut unknown_ids = Vec::with_capacity(ai.unknowns.len());
        let mut unknowns = Vec::with_capacity(ai.unknowns.len());
        for (i, content) in ai.unknowns.iter().enumerate() {
            let unknown_id = generate_entity_id();
            sqlx::query(
                r#"
                INSERT INTO unknowns (id, content, "order", spec_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&unknown_id)
            .bind(content)
            .bind(i as i64)
            .bind(&spec_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            unknowns.push(Unknown {
                id: unknown_id.clone(),
                content: content.clone(),
                order: i as i64,
                spec_id: spec_id.clone(),
                created_at: now,
                updated_at: now,
            });
            unknown_ids.push(unknown_id);
        }

        // Milestones
        let mut milestone_ids = Vec::with_capacity(ai.milestones.len());
        let mut milestones = Vec::with_capacity(ai.milestones.len());
        for (i, m) in ai.milestones.iter().enumerate() {
            let milestone_id = generate_entity_id();
            sqlx::query(
                r#"
                INSERT INTO milestones (id, title, description, "order", spec_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&milestone_id)
            .bind(&m.title)
            .bind(&m.description)
            .bind(i as i64)
            .bind(&spec_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            milestones.push(Milestone {
                id: milestone_id.clone(),
                title: m.title.clone(),
                description: m.description.clone(),
                order: i as i64,
                spec_id: spec_id.clone(),
                created_at: now,
                updated_at: now,
            });
            milestone_ids.push(milestone_id);
        }

        // Final spec update with all child IDs
        sqlx::query("UPDATE specs SET stories = ?, risks = ?, unknowns = ?, milestones = ? WHERE id = ?")
            .bind(serde_json::to_string(&story_ids)?)
            .bind(serde_json::to_string(&risk_ids)?)
            .bind(serde_json::to_string(&unknown_ids)?)
            .bind(serde_json::to_string(&milestone_ids)?)
            .bind(&spec_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            "Created spec {} ({} stories, {} risks, {} unknowns, {} milestones)",
            spec_id,
            story_ids.len(),
            risk_ids.len(),
            unknown_ids.len(),
            milestone_ids.len()
        );

        Ok(SpecDetail {
            id: spec_id,
            title: ai.title.clone(),
            goal: ai.goal.clone(),
            target_user: ai.target_user.clone(),
            summary: ai.summary.clone(),
            product_type: ai.product_type.clone(),
            complexity: ai.complexity.clone(),
            estimated_timeline: ai.estimated_timeline.clone(),
            success_criteria: ai.success_criteria.clone(),
            technical_constraints,
            timeline_constraint,
            budget_constraint,
            stories,
            risks,
            unknowns,
            milestones,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a spec with every ownership list resolved into child objects,
    /// each list in ascending `order`.
    pub async fn get_spec(&self, id: &str) -> Result<SpecDetail> {
        let spec = sqlx::query_as::<_, Spec>("SELECT * FROM specs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| SpecError::NotFound("Spec".to_string()))?;

        let story_rows =
            sqlx::query_as::<_, Story>(r#"SELECT * FROM stories WHERE spec_id = ? ORDER BY "order" ASC"#)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let mut stories = Vec::with_capacity(story_rows.len());
        for story in story_rows {
            let tasks =
                sqlx::query_as::<_, Task>(r#"SELECT * FROM tasks WHERE story_id = ? ORDER BY "order" ASC"#)
                    .bind(&story.id)
                    .fetch_all(&self.pool)
                    .await?;
            stories.push(StoryDetail::assemble(story, tasks));
        }

        let risks =
            sqlx::query_as::<_, Risk>(r#"SELECT * FROM risks WHERE spec_id = ? ORDER BY "order" ASC"#)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let unknowns =
            sqlx::query_as::<_, Unknown>(r#"SELECT * FROM unknowns WHERE spec_id = ? ORDER BY "order" ASC"#)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let milestones = sqlx::query_as::<_, Milestone>(
            r#"SELECT * FROM milestones WHERE spec_id = ? ORDER BY "order" ASC"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SpecDetail::assemble(spec, stories, risks, unknowns, milestones))
    }

    /// List spec summaries, most recent first, optionally filtered by
    /// product type. Returns the page of rows plus the unfiltered total
    /// for the same filter.
    pub async fn list_specs(&self, query: &ListSpecsQuery) -> Result<(Vec<SpecSummary>, i64)> {
        let (limit, offset) = query.pagination().validate();

        let (specs, total) = match &query.product_type {
            Some(product_type) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM specs WHERE product_type = ?")
                        .bind(product_type)
                        .fetch_one(&self.pool)
                        .await?;

                let specs = sqlx::query_as::<_, SpecSummary>(
                    r#"
                    SELECT id, title, goal, product_type, complexity, estimated_timeline, created_at
                    FROM specs WHERE product_type = ?
                    ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(product_type)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (specs, total)
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM specs")
                    .fetch_one(&self.pool)
                    .await?;

                let specs = sqlx::query_as::<_, SpecSummary>(
                    r#"
                    SELECT id, title, goal, product_type, complexity, estimated_timeline, created_at
                    FROM specs
                    ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (specs, total)
            }
        };

        Ok((specs, total))
    }

    /// Apply a validated partial update to a spec's mutable scalar fields.
    pub async fn update_spec(&self, id: &str, update: &UpdateSpecRequest) -> Result<Spec> {
        let current = sqlx::query_as::<_, Spec>("SELECT * FROM specs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| SpecError::NotFound("Spec".to_string()))?;

        let title = update.title.as_deref().unwrap_or(&current.title);
        let goal = update.goal.as_deref().unwrap_or(&current.goal);
        let target_user = update.target_user.as_deref().unwrap_or(&current.target_user);
        let summary = update.summary.as_deref().unwrap_or(&current.summary);
        let timeline_constraint = update
            .timeline_constraint
            .as_deref()
            .unwrap_or(&current.timeline_constraint);
        let budget_constraint = update
            .budget_constraint
            .as_deref()
            .unwrap_or(&current.budget_constraint);
        let technical_constraints = update
            .technical_constraints
            .as_ref()
            .unwrap_or(&current.technical_constraints);
        let success_criteria = update
            .success_criteria
            .as_ref()
            .unwrap_or(&current.success_criteria);
        let now = Utc::now();

        let spec = sqlx::query_as::<_, Spec>(
            r#"
            UPDATE specs
            SET title = ?, goal = ?, target_user = ?, summary = ?,
                timeline_constraint = ?, budget_constraint = ?,
                technical_constraints = ?, success_criteria = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(goal)
        .bind(target_user)
        .bind(summary)
        .bind(timeline_constraint)
        .bind(budget_constraint)
        .bind(serde_json::to_string(technical_constraints)?)
        .bind(serde_json::to_string(success_criteria)?)
        .bind(now)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        info!("Updated spec {}", id);
        Ok(spec)
    }

    /// Delete a spec and everything it owns. Leaf entities go first:
    /// tasks, then the story/risk/unknown/milestone rows, then the spec.
    pub async fn delete_spec(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM specs WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(SpecError::NotFound("Spec".to_string()));
        }

        sqlx::query("DELETE FROM tasks WHERE story_id IN (SELECT id FROM stories WHERE spec_id = ?)")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM stories WHERE spec_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM risks WHERE spec_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM unknowns WHERE spec_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM milestones WHERE spec_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM specs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Deleted spec {} and all owned children", id);
        Ok(())
    }
}
