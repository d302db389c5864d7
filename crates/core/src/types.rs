//! Primitive aliases shared across crates.

/// Primary keys are PostgreSQL `BIGSERIAL`.
pub type DbId = i64;

/// Timestamps are stored as `TIMESTAMPTZ` and handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
