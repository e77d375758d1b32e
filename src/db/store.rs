use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::api::job::models::{JobApplication, JobStatus};

/// Storage-level errors
#[derive(Debug)]
pub enum StoreError {
    /// Query or connection failure
    Database(sqlx::Error),

    /// Schema migration failed
    Migration(sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to a job
    Corrupt(String),

    /// The backend is missing required settings
    Configuration(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Migration(e) => write!(f, "Migration error: {}", e),
            StoreError::Corrupt(msg) => write!(f, "Corrupt record: {}", msg),
            StoreError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            StoreError::Migration(e) => Some(e),
            StoreError::Corrupt(_) | StoreError::Configuration(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(e)
    }
}

/// Persistence for job applications
///
/// Implementations never write `company_name`, `role`,
/// `job_application_link` or `date_applied` outside of `insert`.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Cheap round trip used by the health probes
    async fn ping(&self) -> Result<(), StoreError>;

    /// All jobs, oldest first
    async fn list(&self) -> Result<Vec<JobApplication>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError>;

    /// Highest order key currently in the `status` column
    async fn max_order(&self, status: JobStatus) -> Result<Option<i64>, StoreError>;

    async fn insert(&self, job: &JobApplication) -> Result<JobApplication, StoreError>;

    /// Persist the mutable fields of `job`; `None` if it no longer exists
    async fn update(&self, job: &JobApplication) -> Result<Option<JobApplication>, StoreError>;

    /// Move a job to `status` at `order` in one write
    async fn set_status(
        &self,
        id: Uuid,
        status: JobStatus,
        order: i64,
        changed_at: DateTime<Utc>,
    ) -> Result<Option<JobApplication>, StoreError>;

    /// Returns whether a job was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn close(&self) {}
}
