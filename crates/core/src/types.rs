/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Row bookkeeping timestamps (`created_at`, `updated_at`) are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Transfer window bounds are wall-clock times without a zone, matching the
/// `DD.MM.YYYY HH:MM:SS` wire format.
pub type WindowTime = chrono::NaiveDateTime;
