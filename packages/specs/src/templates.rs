// ABOUTME: Built-in idea templates for the generation form
// ABOUTME: Read-only presets mapping common product shapes to sensible defaults

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub defaults: TemplateDefaults,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefaults {
    pub product_type: &'static str,
    pub technical_constraints: &'static str,
    pub success_criteria: &'static str,
}

/// The built-in template set offered to new users.
pub fn builtin_templates() -> Vec<IdeaTemplate> {
    vec![
        IdeaTemplate {
            name: "Web App",
            description: "Standard web application with auth, dashboard, and API",
            defaults: TemplateDefaults {
                product_type: "web-app",
                technical_constraints: "React/Next.js frontend, REST API, PostgreSQL database",
                success_criteria: "Sub-2s page loads, 99.9% uptime, mobile-responsive design",
            },
        },
        IdeaTemplate {
            name: "Mobile App",
            description: "Native or cross-platform mobile application",
            defaults: TemplateDefaults {
                product_type: "mobile-app",
                technical_constraints: "React Native, offline-first, iOS and Android support",
                success_criteria: "4.5+ App Store rating, <3s cold start, offline capability",
            },
        },
        IdeaTemplate {
            name: "Internal Tool",
            description: "Admin dashboard or internal team productivity tool",
            defaults: TemplateDefaults {
                product_type: "web-app",
                technical_constraints: "SSO/LDAP auth, role-based access, audit logging",
                success_criteria: "90% team adoption within 2 weeks, reduces manual work by 50%",
            },
        },
        IdeaTemplate {
            name: "API / Backend",
            description: "REST or GraphQL API service with integrations",
            defaults: TemplateDefaults {
                product_type: "api",
                technical_constraints: "RESTful design, rate limiting, versioned endpoints, OpenAPI spec",
                success_criteria: "<100ms p95 latency, 99.99% uptime, comprehensive API docs",
            },
        },
        IdeaTemplate {
            name: "SaaS Product",
            description: "Multi-tenant SaaS with billing, onboarding, and analytics",
            defaults: TemplateDefaults {
                product_type: "saas",
                technical_constraints: "Multi-tenant architecture, Stripe billing, usage analytics",
                success_criteria: "10% free-to-paid conversion, <5% monthly churn, NPS 40+",
            },
        },
    ]
}
