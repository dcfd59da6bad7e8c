// ABOUTME: Shared constant vocabularies for Specforge
// ABOUTME: Advisory tag lists for product types and complexity levels

/// Known product type tags. The field itself stays free-form; these are the
/// values the built-in templates and UI pickers offer.
pub const PRODUCT_TYPES: &[&str] = &[
    "web-app",
    "mobile-app",
    "api",
    "desktop-app",
    "cli",
    "saas",
    "other",
];

/// Complexity tags the model is nudged toward. Model-assigned, free-form.
pub const COMPLEXITY_LEVELS: &[&str] = &["low", "medium", "high", "very-high"];
