// ABOUTME: Shared utilities for Specforge
// ABOUTME: Entity ID generation and product tag vocabularies

pub mod constants;
pub mod ids;

pub use constants::{COMPLEXITY_LEVELS, PRODUCT_TYPES};
pub use ids::{generate_entity_id, is_entity_id, ENTITY_ID_LEN};
