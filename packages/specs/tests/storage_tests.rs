// ABOUTME: Integration tests for the decomposition and retrieval engine
// ABOUTME: Exercises ordering, referential closure, cascade, pagination, and round-trips

use sqlx::sqlite::SqlitePoolOptions;

use specforge_specs::ai_types::{AiMilestoneOutput, AiSpecOutput, AiStoryOutput};
use specforge_specs::db::MIGRATOR;
use specforge_specs::storage::{SpecStorage, NOT_SPECIFIED};
use specforge_specs::validator::{GenerateSpecRequest, ListSpecsQuery, UpdateSpecPayload};
use specforge_specs::SpecError;

// ============================================================================
// Test setup
// ============================================================================

async fn setup_storage() -> SpecStorage {
    // Single connection so the in-memory database is shared across queries.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();

    SpecStorage::new(pool)
}

fn acme_request() -> GenerateSpecRequest {
    GenerateSpecRequest {
        title: "Acme CRM".to_string(),
        goal: "Help small sales teams track leads without spreadsheets".to_string(),
        target_users: "sales reps at 5-20 person startups".to_string(),
        product_type: "saas".to_string(),
        success_criteria: None,
        technical_constraints: None,
        timeline_constraint: None,
        budget_constraint: None,
    }
}

/// Model output matching the canonical end-to-end scenario: two stories
/// (three tasks and one task), two risks, one unknown, three milestones.
fn acme_ai_output() -> AiSpecOutput {
    AiSpecOutput {
        title: "Acme CRM".to_string(),
        goal: "Help small sales teams track leads without spreadsheets".to_string(),
        target_user: "Sales reps at early-stage startups".to_string(),
        summary: "A lightweight CRM focused on lead tracking".to_string(),
        product_type: "saas".to_string(),
        complexity: "medium".to_string(),
        estimated_timeline: "3 months".to_string(),
        success_criteria: vec![
            "50 paying teams in 6 months".to_string(),
            "Under 5 minutes to first lead".to_string(),
        ],
        stories: vec![
            AiStoryOutput {
                title: "Lead capture".to_string(),
                description: "Reps can record new leads quickly".to_string(),
                tasks: vec![
                    "Build the lead form".to_string(),
                    "Store lead submissions".to_string(),
                    "Show a confirmation state".to_string(),
                ],
            },
            AiStoryOutput {
                title: "Pipeline view".to_string(),
                description: "Reps can see every lead by stage".to_string(),
                tasks: vec!["Render the pipeline board".to_string()],
            },
        ],
        risks: vec![
            "Teams may resist switching from spreadsheets".to_string(),
            "Email integration scope could balloon".to_string(),
        ],
        unknowns: vec!["Which CRMs do prospects migrate from?".to_string()],
        milestones: vec![
            AiMilestoneOutput {
                title: "MVP".to_string(),
                description: "Lead capture working end to end".to_string(),
            },
            AiMilestoneOutput {
                title: "Beta".to_string(),
                description: "Pipeline view with 10 pilot teams".to_string(),
            },
            AiMilestoneOutput {
                title: "Launch".to_string(),
                description: "Public availability".to_string(),
            },
        ],
    }
}

async fn orders(storage: &SpecStorage, table: &str, fk_column: &str, fk: &str) -> Vec<i64> {
    sqlx::query_scalar(&format!(
        r#"SELECT "order" FROM {} WHERE {} = ? ORDER BY "order" ASC"#,
        table, fk_column
    ))
    .bind(fk)
    .fetch_all(storage.pool())
    .await
    .unwrap()
}

async fn child_ids(storage: &SpecStorage, table: &str, fk_column: &str, fk: &str) -> Vec<String> {
    sqlx::query_scalar(&format!(
        r#"SELECT id FROM {} WHERE {} = ? ORDER BY "order" ASC"#,
        table, fk_column
    ))
    .bind(fk)
    .fetch_all(storage.pool())
    .await
    .unwrap()
}

async fn count(storage: &SpecStorage, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(storage.pool())
        .await
        .unwrap()
}

// ============================================================================
// Decomposition
// ============================================================================

#[tokio::test]
async fn test_decomposition_ordering() {
    let storage = setup_storage().await;
    let spec = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    assert_eq!(orders(&storage, "stories", "spec_id", &spec.id).await, vec![0, 1]);
    assert_eq!(
        orders(&storage, "tasks", "story_id", &spec.stories[0].id).await,
        vec![0, 1, 2]
    );
    assert_eq!(
        orders(&storage, "tasks", "story_id", &spec.stories[1].id).await,
        vec![0]
    );
    assert_eq!(orders(&storage, "risks", "spec_id", &spec.id).await, vec![0, 1]);
    assert_eq!(orders(&storage, "unknowns", "spec_id", &spec.id).await, vec![0]);
    assert_eq!(
        orders(&storage, "milestones", "spec_id", &spec.id).await,
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn test_referential_closure() {
    let storage = setup_storage().await;
    let created = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    // The stored ownership lists must contain exactly the IDs of the rows
    // whose foreign key points back at the spec, in order.
    let row = sqlx::query_as::<_, specforge_specs::types::Spec>("SELECT * FROM specs WHERE id = ?")
        .bind(&created.id)
        .fetch_one(storage.pool())
        .await
        .unwrap();

    assert_eq!(row.stories, child_ids(&storage, "stories", "spec_id", &created.id).await);
    assert_eq!(row.risks, child_ids(&storage, "risks", "spec_id", &created.id).await);
    assert_eq!(row.unknowns, child_ids(&storage, "unknowns", "spec_id", &created.id).await);
    assert_eq!(
        row.milestones,
        child_ids(&storage, "milestones", "spec_id", &created.id).await
    );

    for story in &created.stories {
        let story_row =
            sqlx::query_as::<_, specforge_specs::types::Story>("SELECT * FROM stories WHERE id = ?")
                .bind(&story.id)
                .fetch_one(storage.pool())
                .await
                .unwrap();
        assert_eq!(
            story_row.tasks,
            child_ids(&storage, "tasks", "story_id", &story.id).await
        );
    }
}

#[tokio::test]
async fn test_constraint_default_policy() {
    let storage = setup_storage().await;
    let spec = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    assert_eq!(spec.timeline_constraint, NOT_SPECIFIED);
    assert_eq!(spec.budget_constraint, NOT_SPECIFIED);
    assert!(spec.technical_constraints.is_empty());

    // The defaults are persisted, not just echoed.
    let fetched = storage.get_spec(&spec.id).await.unwrap();
    assert_eq!(fetched.timeline_constraint, NOT_SPECIFIED);
    assert_eq!(fetched.budget_constraint, NOT_SPECIFIED);
}

#[tokio::test]
async fn test_technical_constraints_come_from_request() {
    let storage = setup_storage().await;
    let mut request = acme_request();
    request.technical_constraints = Some("Rust backend, SQLite storage".to_string());
    request.timeline_constraint = Some("6 weeks".to_string());

    let spec = storage
        .create_from_ai(&acme_ai_output(), &request)
        .await
        .unwrap();

    assert_eq!(
        spec.technical_constraints,
        vec!["Rust backend, SQLite storage".to_string()]
    );
    assert_eq!(spec.timeline_constraint, "6 weeks");
}

#[tokio::test]
async fn test_create_with_empty_children() {
    let storage = setup_storage().await;
    let mut output = acme_ai_output();
    output.stories.clear();
    output.risks.clear();
    output.unknowns.clear();
    output.milestones.clear();

    let spec = storage
        .create_from_ai(&output, &acme_request())
        .await
        .unwrap();

    assert!(spec.stories.is_empty());
    let fetched = storage.get_spec(&spec.id).await.unwrap();
    assert!(fetched.stories.is_empty());
    assert!(fetched.risks.is_empty());
    assert!(fetched.unknowns.is_empty());
    assert!(fetched.milestones.is_empty());
}

// ============================================================================
// Retrieval
// ============================================================================

#[tokio::test]
async fn test_round_trip_reassembly() {
    let storage = setup_storage().await;
    let output = acme_ai_output();
    let created = storage
        .create_from_ai(&output, &acme_request())
        .await
        .unwrap();

    let fetched = storage.get_spec(&created.id).await.unwrap();

    assert_eq!(fetched.title, output.title);
    assert_eq!(fetched.summary, output.summary);
    assert_eq!(fetched.success_criteria, output.success_criteria);

    assert_eq!(fetched.stories.len(), output.stories.len());
    for (story, expected) in fetched.stories.iter().zip(&output.stories) {
        assert_eq!(story.title, expected.title);
        assert_eq!(story.description, expected.description);
        let contents: Vec<&str> = story.tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, expected.tasks.iter().map(String::as_str).collect::<Vec<_>>());
    }

    let risk_contents: Vec<&str> = fetched.risks.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(risk_contents, output.risks.iter().map(String::as_str).collect::<Vec<_>>());

    let unknown_contents: Vec<&str> = fetched.unknowns.iter().map(|u| u.content.as_str()).collect();
    assert_eq!(
        unknown_contents,
        output.unknowns.iter().map(String::as_str).collect::<Vec<_>>()
    );

    let milestone_titles: Vec<&str> = fetched.milestones.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        milestone_titles,
        output.milestones.iter().map(|m| m.title.as_str()).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_get_missing_spec_is_not_found() {
    let storage = setup_storage().await;
    let err = storage.get_spec("507f1f77bcf86cd799439011").await.unwrap_err();
    assert!(matches!(err, SpecError::NotFound(_)));
}

// ============================================================================
// Listing and pagination
// ============================================================================

async fn seed_specs(storage: &SpecStorage, specs: &[(&str, &str)]) {
    for (title, product_type) in specs {
        let mut output = acme_ai_output();
        output.title = title.to_string();
        output.product_type = product_type.to_string();
        storage
            .create_from_ai(&output, &acme_request())
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_list_pagination_law() {
    let storage = setup_storage().await;
    seed_specs(
        &storage,
        &[
            ("Alpha", "saas"),
            ("Beta", "saas"),
            ("Gamma", "cli"),
            ("Delta", "saas"),
            ("Epsilon", "cli"),
        ],
    )
    .await;

    let query = ListSpecsQuery {
        page: 1,
        limit: 2,
        product_type: None,
    };
    let (page1, total) = storage.list_specs(&query).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page1.len(), 2);

    let pagination = specforge_specs::pagination::Pagination::new(&query.pagination(), total);
    assert_eq!(pagination.pages, 3);

    // Most recent first: the last seeded spec leads the first page.
    assert_eq!(page1[0].title, "Epsilon");

    let (page3, _) = storage
        .list_specs(&ListSpecsQuery {
            page: 3,
            limit: 2,
            product_type: None,
        })
        .await
        .unwrap();
    assert_eq!(page3.len(), 1);

    // A page beyond the last yields an empty list, not an error.
    let (beyond, total) = storage
        .list_specs(&ListSpecsQuery {
            page: 4,
            limit: 2,
            product_type: None,
        })
        .await
        .unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 5);
}

#[tokio::test]
async fn test_list_filters_by_product_type() {
    let storage = setup_storage().await;
    seed_specs(
        &storage,
        &[("Alpha", "saas"), ("Beta", "cli"), ("Gamma", "cli")],
    )
    .await;

    let (specs, total) = storage
        .list_specs(&ListSpecsQuery {
            page: 1,
            limit: 20,
            product_type: Some("cli".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert!(specs.iter().all(|s| s.product_type == "cli"));
}

// ============================================================================
// Updates
// ============================================================================

#[tokio::test]
async fn test_update_applies_only_provided_fields() {
    let storage = setup_storage().await;
    let created = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    let update = UpdateSpecPayload {
        title: Some("Acme CRM v2".to_string()),
        success_criteria: Some(vec!["100 paying teams".to_string()]),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let updated = storage.update_spec(&created.id, &update).await.unwrap();

    assert_eq!(updated.title, "Acme CRM v2");
    assert_eq!(updated.success_criteria, vec!["100 paying teams".to_string()]);
    // Untouched fields survive.
    assert_eq!(updated.goal, created.goal);
    assert_eq!(updated.summary, created.summary);

    // And the change is persisted.
    let fetched = storage.get_spec(&created.id).await.unwrap();
    assert_eq!(fetched.title, "Acme CRM v2");
}

#[tokio::test]
async fn test_update_missing_spec_is_not_found() {
    let storage = setup_storage().await;
    let update = UpdateSpecPayload {
        title: Some("New title".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let err = storage
        .update_spec("507f1f77bcf86cd799439011", &update)
        .await
        .unwrap_err();
    assert!(matches!(err, SpecError::NotFound(_)));
}

// ============================================================================
// Cascading delete
// ============================================================================

#[tokio::test]
async fn test_cascade_completeness() {
    let storage = setup_storage().await;
    let doomed = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();
    let survivor = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    storage.delete_spec(&doomed.id).await.unwrap();

    for table in ["stories", "risks", "unknowns", "milestones"] {
        assert!(child_ids(&storage, table, "spec_id", &doomed.id).await.is_empty());
    }
    for story in &doomed.stories {
        assert!(child_ids(&storage, "tasks", "story_id", &story.id).await.is_empty());
    }
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM specs WHERE id = ?")
        .bind(&doomed.id)
        .fetch_one(storage.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // The other spec's graph is untouched.
    let fetched = storage.get_spec(&survivor.id).await.unwrap();
    assert_eq!(fetched.stories.len(), 2);
    assert_eq!(count(&storage, "specs").await, 1);
    assert_eq!(count(&storage, "tasks").await, 4);
}

#[tokio::test]
async fn test_delete_missing_spec_is_not_found() {
    let storage = setup_storage().await;
    let err = storage
        .delete_spec("507f1f77bcf86cd799439011")
        .await
        .unwrap_err();
    assert!(matches!(err, SpecError::NotFound(_)));
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn test_end_to_end_acme_scenario() {
    let storage = setup_storage().await;

    let created = storage
        .create_from_ai(&acme_ai_output(), &acme_request())
        .await
        .unwrap();

    assert_eq!(created.stories.len(), 2);
    assert_eq!(created.stories[0].tasks.len(), 3);
    assert_eq!(created.stories[1].tasks.len(), 1);
    assert_eq!(created.risks.len(), 2);
    assert_eq!(created.unknowns.len(), 1);
    assert_eq!(created.milestones.len(), 3);

    let fetched = storage.get_spec(&created.id).await.unwrap();
    assert_eq!(fetched.stories.len(), 2);
    assert_eq!(
        fetched.stories[0].tasks.iter().map(|t| t.order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        fetched.milestones.iter().map(|m| m.order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    storage.delete_spec(&created.id).await.unwrap();
    let err = storage.get_spec(&created.id).await.unwrap_err();
    assert!(matches!(err, SpecError::NotFound(_)));
}

#[tokio::test]
async fn test_ping() {
    let storage = setup_storage().await;
    storage.ping().await.unwrap();
}
