//! Deterministic cache key derivation
//!
//! Keys are derived by hashing a normalized representation of the input with
//! SHA-256 and prefixing a namespace tag, so the query-text and
//! embedding-vector cache families never collide on the shared backend.

use sha2::{Digest, Sha256};

/// Namespace for cache entries keyed by normalized query text
pub const SEARCH_NAMESPACE: &str = "search";

/// Namespace for cache entries keyed by an embedding vector
pub const EMBEDDING_NAMESPACE: &str = "embedding";

/// Namespace for rate-limiter counters
pub const RATE_LIMIT_NAMESPACE: &str = "rate";

/// Decimal places kept when deriving a key from a float vector
const VECTOR_PRECISION: usize = 6;

/// Derives a stable cache key from a raw user query.
///
/// The query is lowercased and trimmed before hashing, so "Sad Robots",
/// "  sad robots  " and "SAD ROBOTS" all resolve to the same entry.
pub fn search_key(query: &str) -> String {
    let normalized = query.trim().to_lowercase();
    format!("{}:{}", SEARCH_NAMESPACE, sha256_hex(normalized.as_bytes()))
}

/// Derives a stable cache key from an embedding vector.
///
/// Components are rounded to six decimal places to absorb floating-point
/// jitter from repeated model inference, then serialized in a fixed
/// comma-separated layout before hashing.
pub fn embedding_key(vector: &[f32]) -> String {
    let serialized: Vec<String> = vector.iter().map(|v| round_component(*v)).collect();
    format!(
        "{}:{}",
        EMBEDDING_NAMESPACE,
        sha256_hex(serialized.join(",").as_bytes())
    )
}

/// Derives the counter key for a client identity.
pub fn rate_limit_key(identity: &str) -> String {
    format!("{}:{}", RATE_LIMIT_NAMESPACE, identity)
}

fn round_component(value: f32) -> String {
    let scale = 10f64.powi(VECTOR_PRECISION as i32);
    let rounded = (f64::from(value) * scale).round() / scale;
    // Collapse -0.0 so jitter around zero cannot flip the serialized sign.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", VECTOR_PRECISION, rounded)
}

fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}
