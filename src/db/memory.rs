use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::api::job::models::{JobApplication, JobStatus};
use crate::db::store::{JobStore, StoreError};

/// Process-local store, kept in insertion order.
///
/// Nothing survives a restart; meant for local runs and tests.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<JobApplication>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError> {
        Ok(self.jobs.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn max_order(&self, status: JobStatus) -> Result<Option<i64>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .filter(|j| j.status == status)
            .map(|j| j.order)
            .max())
    }

    async fn insert(&self, job: &JobApplication) -> Result<JobApplication, StoreError> {
        debug!("Memory store: inserting job id={}", job.id);
        self.jobs.write().await.push(job.clone());
        Ok(job.clone())
    }

    async fn update(&self, job: &JobApplication) -> Result<Option<JobApplication>, StoreError> {
        let mut jobs = self.jobs.write().await;
        let Some(stored) = jobs.iter_mut().find(|j| j.id == job.id) else {
            return Ok(None);
        };

        stored.status = job.status;
        stored.order = job.order;
        stored.notes = job.notes.clone();
        stored.meeting_links = job.meeting_links.clone();
        stored.interview_rounds = job.interview_rounds.clone();
        stored.offer_deadline = job.offer_deadline;
        stored.priority = job.priority;
        stored.location = job.location.clone();
        stored.last_status_change = job.last_status_change;
        stored.updated_at = job.updated_at;

        Ok(Some(stored.clone()))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: JobStatus,
        order: i64,
        changed_at: DateTime<Utc>,
    ) -> Result<Option<JobApplication>, StoreError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.iter_mut().find(|j| j.id == id).map(|stored| {
            stored.status = status;
            stored.order = order;
            stored.last_status_change = changed_at;
            stored.updated_at = changed_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::models::Priority;

    fn job(company: &str, status: JobStatus, order: i64) -> JobApplication {
        let now = Utc::now();
        JobApplication {
            id: Uuid::new_v4(),
            company_name: company.into(),
            role: "Engineer".into(),
            status,
            order,
            date_applied: now,
            job_application_link: None,
            notes: None,
            meeting_links: Vec::new(),
            interview_rounds: Vec::new(),
            offer_deadline: None,
            priority: Priority::Medium,
            location: None,
            last_status_change: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn max_order_is_per_column() {
        let store = MemoryJobStore::new();
        store.insert(&job("a", JobStatus::Applied, 1000)).await.unwrap();
        store.insert(&job("b", JobStatus::Applied, 3000)).await.unwrap();
        store.insert(&job("c", JobStatus::Rejected, 9000)).await.unwrap();

        assert_eq!(store.max_order(JobStatus::Applied).await.unwrap(), Some(3000));
        assert_eq!(store.max_order(JobStatus::Rejected).await.unwrap(), Some(9000));
        assert_eq!(store.max_order(JobStatus::Interviewing).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryJobStore::new();
        for name in ["first", "second", "third"] {
            store.insert(&job(name, JobStatus::Applied, 1000)).await.unwrap();
        }
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.company_name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[actix_web::test]
    async fn update_never_touches_identity_fields() {
        let store = MemoryJobStore::new();
        let original = store.insert(&job("Acme", JobStatus::Applied, 1000)).await.unwrap();

        let mut edited = original.clone();
        edited.company_name = "Other".into();
        edited.notes = Some("recruiter called".into());
        let saved = store.update(&edited).await.unwrap().unwrap();

        assert_eq!(saved.company_name, "Acme");
        assert_eq!(saved.notes.as_deref(), Some("recruiter called"));
    }

    #[actix_web::test]
    async fn set_status_on_unknown_id_is_none() {
        let store = MemoryJobStore::new();
        let result = store
            .set_status(Uuid::new_v4(), JobStatus::Rejected, 1000, Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryJobStore::new();
        let stored = store.insert(&job("Acme", JobStatus::Applied, 1000)).await.unwrap();

        assert!(store.delete(stored.id).await.unwrap());
        assert!(!store.delete(stored.id).await.unwrap());
        assert!(store.get(stored.id).await.unwrap().is_none());
    }
}
