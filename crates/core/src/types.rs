/// Jobs are keyed by an opaque string id (UUID v4 in practice).
pub type JobId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
