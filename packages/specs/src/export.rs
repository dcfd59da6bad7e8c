// ABOUTME: Markdown export for product specifications
// ABOUTME: Deterministic flat-document rendering of a reassembled spec

use crate::types::SpecDetail;

/// Render a spec as a flat markdown document.
///
/// Sections appear in a fixed order and empty sections are omitted. Child
/// lists are rendered in the order they arrive, which reassembly guarantees
/// is ascending `order`.
pub fn spec_to_markdown(spec: &SpecDetail) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", spec.title));
    lines.push(String::new());
    lines.push(format!("> {}", spec.summary));
    lines.push(String::new());
    lines.push(format!(
        "**Product Type:** {} | **Complexity:** {} | **Timeline:** {}",
        spec.product_type, spec.complexity, spec.estimated_timeline
    ));
    lines.push(String::new());

    lines.push("## Overview".to_string());
    lines.push(String::new());
    lines.push(format!("**Goal:** {}", spec.goal));
    lines.push(String::new());
    lines.push(format!("**Target Users:** {}", spec.target_user));
    lines.push(String::new());

    if !spec.timeline_constraint.is_empty() {
        lines.push(format!("**Timeline Constraint:** {}", spec.timeline_constraint));
        lines.push(String::new());
    }
    if !spec.budget_constraint.is_empty() {
        lines.push(format!("**Budget Constraint:** {}", spec.budget_constraint));
        lines.push(String::new());
    }

    if !spec.success_criteria.is_empty() {
        lines.push("## Success Criteria".to_string());
        lines.push(String::new());
        for criterion in &spec.success_criteria {
            lines.push(format!("- {}", criterion));
        }
        lines.push(String::new());
    }

    if !spec.technical_constraints.is_empty() {
        lines.push("## Technical Constraints".to_string());
        lines.push(String::new());
        for constraint in &spec.technical_constraints {
            lines.push(format!("- {}", constraint));
        }
        lines.push(String::new());
    }

    if !spec.stories.is_empty() {
        lines.push("## User Stories & Tasks".to_string());
        lines.push(String::new());
        for (i, story) in spec.stories.iter().enumerate() {
            lines.push(format!("### {}. {}", i + 1, story.title));
            lines.push(String::new());
            lines.push(story.description.clone());
            lines.push(String::new());
            if !story.tasks.is_empty() {
                for task in &story.tasks {
                    lines.push(format!("- [ ] {}", task.content));
                }
                lines.push(String::new());
            }
        }
    }

    if !spec.milestones.is_empty() {
        lines.push("## Milestones".to_string());
        lines.push(String::new());
        for (i, milestone) in spec.milestones.iter().enumerate() {
            lines.push(format!(
                "{}. **{}** — {}",
                i + 1,
                milestone.title,
                milestone.description
            ));
        }
        lines.push(String::new());
    }

    if !spec.risks.is_empty() {
        lines.push("## Risks".to_string());
        lines.push(String::new());
        for risk in &spec.risks {
            lines.push(format!("- {}", risk.content));
        }
        lines.push(String::new());
    }

    if !spec.unknowns.is_empty() {
        lines.push("## Unknowns".to_string());
        lines.push(String::new());
        for unknown in &spec.unknowns {
            lines.push(format!("- {}", unknown.content));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// File name for a downloaded export: slugged title plus a `-spec.md`
/// suffix.
pub fn export_file_name(spec: &SpecDetail) -> String {
    let slug = spec
        .title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{}-spec.md", slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Milestone, Risk, Task, Unknown};
    use chrono::Utc;

    fn sample_spec() -> SpecDetail {
        let now = Utc::now();
        let spec_id = "507f1f77bcf86cd799439011".to_string();
        let story_id = "507f1f77bcf86cd799439012".to_string();

        SpecDetail {
            id: spec_id.clone(),
            title: "Acme CRM".to_string(),
            goal: "Track leads without spreadsheets".to_string(),
            target_user: "Sales reps".to_string(),
            summary: "A lightweight CRM".to_string(),
            product_type: "saas".to_string(),
            complexity: "medium".to_string(),
            estimated_timeline: "3 months".to_string(),
            success_criteria: vec!["50 paying teams".to_string()],
            technical_constraints: vec![],
            timeline_constraint: "Not specified".to_string(),
            budget_constraint: "Not specified".to_string(),
            stories: vec![crate::types::StoryDetail {
                id: story_id.clone(),
                title: "Lead capture".to_string(),
                description: "Capture leads from a web form".to_string(),
                order: 0,
                spec_id: spec_id.clone(),
                tasks: vec![
                    Task {
                        id: "507f1f77bcf86cd799439013".to_string(),
                        content: "Build the form".to_string(),
                        order: 0,
                        story_id: story_id.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                    Task {
                        id: "507f1f77bcf86cd799439014".to_string(),
                        content: "Store submissions".to_string(),
                        order: 1,
                        story_id: story_id.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                ],
                created_at: now,
                updated_at: now,
            }],
            risks: vec![Risk {
                id: "507f1f77bcf86cd799439015".to_string(),
                content: "Churn if onboarding is slow".to_string(),
                order: 0,
                spec_id: spec_id.clone(),
                created_at: now,
                updated_at: now,
            }],
            unknowns: vec![Unknown {
                id: "507f1f77bcf86cd799439016".to_string(),
                content: "Pricing model".to_string(),
                order: 0,
                spec_id: spec_id.clone(),
                created_at: now,
                updated_at: now,
            }],
            milestones: vec![Milestone {
                id: "507f1f77bcf86cd799439017".to_string(),
                title: "MVP".to_string(),
                description: "First working version".to_string(),
                order: 0,
                spec_id,
                created_at: now,
                updated_at: now,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_markdown_structure() {
        let markdown = spec_to_markdown(&sample_spec());

        assert!(markdown.starts_with("# Acme CRM\n"));
        assert!(markdown.contains("> A lightweight CRM"));
        assert!(markdown.contains(
            "**Product Type:** saas | **Complexity:** medium | **Timeline:** 3 months"
        ));
        assert!(markdown.contains("### 1. Lead capture"));
        assert!(markdown.contains("- [ ] Build the form"));
        assert!(markdown.contains("1. **MVP** — First working version"));
        assert!(markdown.contains("- Churn if onboarding is slow"));
        assert!(markdown.contains("- Pricing model"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let markdown = spec_to_markdown(&sample_spec());

        let overview = markdown.find("## Overview").unwrap();
        let criteria = markdown.find("## Success Criteria").unwrap();
        let stories = markdown.find("## User Stories & Tasks").unwrap();
        let milestones = markdown.find("## Milestones").unwrap();
        let risks = markdown.find("## Risks").unwrap();
        let unknowns = markdown.find("## Unknowns").unwrap();

        assert!(overview < criteria);
        assert!(criteria < stories);
        assert!(stories < milestones);
        assert!(milestones < risks);
        assert!(risks < unknowns);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut spec = sample_spec();
        spec.technical_constraints.clear();
        spec.risks.clear();

        let markdown = spec_to_markdown(&spec);

        assert!(!markdown.contains("## Technical Constraints"));
        assert!(!markdown.contains("## Risks"));
        assert!(markdown.contains("## Unknowns"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let spec = sample_spec();
        assert_eq!(spec_to_markdown(&spec), spec_to_markdown(&spec));
    }

    #[test]
    fn test_export_file_name_slug() {
        let mut spec = sample_spec();
        spec.title = "My  Great App".to_string();
        assert_eq!(export_file_name(&spec), "my-great-app-spec.md");
    }
}
