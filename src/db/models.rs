use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::api::job::models::{InterviewRound, JobApplication, JobStatus, Priority};
use crate::db::store::StoreError;

/// Database representation of a job application with all columns
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_name: String,
    pub role: String,
    pub status: String,
    pub sort_order: i64,
    pub date_applied: DateTime<Utc>,
    pub job_application_link: Option<String>,
    pub notes: Option<String>,
    pub meeting_links: Json<Vec<String>>,
    pub interview_rounds: Json<Vec<InterviewRound>>,
    pub offer_deadline: Option<DateTime<Utc>>,
    pub priority: String,
    pub location: Option<String>,
    pub last_status_change: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for JobApplication {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status: JobStatus = row
            .status
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("job {}: {}", row.id, e)))?;
        let priority: Priority = row
            .priority
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("job {}: {}", row.id, e)))?;

        Ok(JobApplication {
            id: row.id,
            company_name: row.company_name,
            role: row.role,
            status,
            order: row.sort_order,
            date_applied: row.date_applied,
            job_application_link: row.job_application_link,
            notes: row.notes,
            meeting_links: row.meeting_links.0,
            interview_rounds: row.interview_rounds.0,
            offer_deadline: row.offer_deadline,
            priority,
            location: row.location,
            last_status_change: row.last_status_change,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, priority: &str) -> JobRow {
        let now = Utc::now();
        JobRow {
            id: Uuid::new_v4(),
            company_name: "Acme".into(),
            role: "Engineer".into(),
            status: status.into(),
            sort_order: 2000,
            date_applied: now,
            job_application_link: None,
            notes: None,
            meeting_links: Json(vec!["https://meet.example/x".into()]),
            interview_rounds: Json(vec![]),
            offer_deadline: None,
            priority: priority.into(),
            location: None,
            last_status_change: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn maps_row_columns_onto_job() {
        let job = JobApplication::try_from(row("Offer Received", "High")).unwrap();
        assert_eq!(job.status, JobStatus::OfferReceived);
        assert_eq!(job.priority, Priority::High);
        assert_eq!(job.order, 2000);
        assert_eq!(job.meeting_links.len(), 1);
    }

    #[test]
    fn unknown_status_is_corrupt() {
        let err = JobApplication::try_from(row("archived", "Low")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
