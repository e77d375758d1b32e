use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::api::job::models::{JobApplication, JobStatus};
use crate::db::models::JobRow;
use crate::db::store::{JobStore, StoreError};

const COLUMNS: &str = "id, company_name, role, status, sort_order, date_applied, \
    job_application_link, notes, meeting_links, interview_rounds, offer_deadline, \
    priority, location, last_status_change, created_at, updated_at";

/// Repository for job application database operations
pub struct PgJobRepository {
    pool: Pool<Postgres>,
}

impl PgJobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_job(row: Option<JobRow>) -> Result<Option<JobApplication>, StoreError> {
    row.map(JobApplication::try_from).transpose()
}

#[async_trait]
impl JobStore for PgJobRepository {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM job_applications ORDER BY created_at ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} job applications", rows.len());
        rows.into_iter().map(JobApplication::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM job_applications WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        into_job(row)
    }

    async fn max_order(&self, status: JobStatus) -> Result<Option<i64>, StoreError> {
        let max = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(sort_order) FROM job_applications WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    async fn insert(&self, job: &JobApplication) -> Result<JobApplication, StoreError> {
        debug!(
            "Inserting job: company={}, role={}, order={}",
            job.company_name, job.role, job.order
        );

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO job_applications (
                id, company_name, role, status, sort_order, date_applied,
                job_application_link, notes, meeting_links, interview_rounds,
                offer_deadline, priority, location, last_status_change,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(job.id)
        .bind(&job.company_name)
        .bind(&job.role)
        .bind(job.status.as_str())
        .bind(job.order)
        .bind(job.date_applied)
        .bind(&job.job_application_link)
        .bind(&job.notes)
        .bind(Json(&job.meeting_links))
        .bind(Json(&job.interview_rounds))
        .bind(job.offer_deadline)
        .bind(job.priority.as_str())
        .bind(&job.location)
        .bind(job.last_status_change)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await?;

        JobApplication::try_from(row)
    }

    async fn update(&self, job: &JobApplication) -> Result<Option<JobApplication>, StoreError> {
        debug!("Updating job id={}", job.id);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE job_applications SET
                status = $2,
                sort_order = $3,
                notes = $4,
                meeting_links = $5,
                interview_rounds = $6,
                offer_deadline = $7,
                priority = $8,
                location = $9,
                last_status_change = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(job.id)
        .bind(job.status.as_str())
        .bind(job.order)
        .bind(&job.notes)
        .bind(Json(&job.meeting_links))
        .bind(Json(&job.interview_rounds))
        .bind(job.offer_deadline)
        .bind(job.priority.as_str())
        .bind(&job.location)
        .bind(job.last_status_change)
        .bind(job.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        into_job(row)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: JobStatus,
        order: i64,
        changed_at: DateTime<Utc>,
    ) -> Result<Option<JobApplication>, StoreError> {
        debug!("Moving job id={} to status={} order={}", id, status, order);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE job_applications
            SET status = $2, sort_order = $3, last_status_change = $4, updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(order)
        .bind(changed_at)
        .fetch_optional(&self.pool)
        .await?;

        into_job(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Delete job id={}: {} rows affected", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
