//! SQL DDL for initializing the model registration storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (surrogate, not meaningful)
/// - `model_name` shared by all rows of one load-balanced group
/// - `litellm_params` / `model_info` JSON blobs serialized as text
/// - `created_at` RFC3339 insertion timestamp
///
/// `model_name` is deliberately NOT unique: a group holds one row per
/// credential. The index backs the group-scoped delete and count.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS model_registrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_name TEXT NOT NULL,
    litellm_params TEXT NOT NULL, -- JSON blob, serialized as text
    model_info TEXT NOT NULL,     -- JSON blob, serialized as text
    created_at TEXT NOT NULL      -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_model_registrations_model_name
    ON model_registrations(model_name);
"#;
