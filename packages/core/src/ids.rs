// ABOUTME: Entity ID generation for Specforge
// ABOUTME: 24-character hex tokens that sort by creation time

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Length of every entity identifier, in characters.
pub const ENTITY_ID_LEN: usize = 24;

lazy_static::lazy_static! {
    // 40-bit token drawn once per process so concurrent processes cannot
    // collide even when their counters align.
    static ref PROCESS_TOKEN: u64 = rand::thread_rng().gen_range(0..(1u64 << 40));

    static ref COUNTER: AtomicU32 = AtomicU32::new(rand::thread_rng().gen());
}

/// Generate a unique entity ID.
///
/// Layout: 4-byte big-endian unix timestamp (seconds), 5-byte per-process
/// random token, 3-byte incrementing counter, hex-encoded to 24 lowercase
/// characters. IDs created in a later second never sort before IDs created
/// earlier.
pub fn generate_entity_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as u32;
    let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

    format!("{:08x}{:010x}{:06x}", secs, *PROCESS_TOKEN, count)
}

/// Check whether a string has the entity ID shape: exactly 24 hex
/// characters, either case.
pub fn is_entity_id(value: &str) -> bool {
    value.len() == ENTITY_ID_LEN && value.chars().all(|c| c.is_ascii_hexdigit())
}
