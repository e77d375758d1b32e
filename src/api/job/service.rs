use actix_web::{HttpResponse, ResponseError};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::validation::ErrorResponse;
use crate::db::store::{JobStore, StoreError};
use super::board::{self, Board, BoardStats};
use super::dto::{CreateJobRequest, UpdateJobRequest, UpdateStatusRequest};
use super::models::{JobApplication, JobStatus};

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Storage operation failed
    Store(StoreError),

    /// Validation failed
    ValidationError(String),

    /// Job not found
    NotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(e) => write!(f, "Store error: {}", e),
            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(id) => write!(f, "Job not found: {}", id),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Store(e) => {
                error!("Store error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                })
            }
            ServiceError::ValidationError(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": format!("Job not found for id {}", id)}),
                })
            }
        }
    }
}

/// Ids are opaque to clients; anything that is not a UUID cannot exist.
fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::NotFound(raw.to_string()))
}

/// Job service containing business logic
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobApplication>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_job(&self, id: &str) -> Result<JobApplication, ServiceError> {
        let uuid = parse_id(id)?;
        self.store
            .get(uuid)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Order key for a card appended to the `status` column
    async fn next_order_in(&self, status: JobStatus) -> Result<i64, ServiceError> {
        let max = self.store.max_order(status).await?;
        Ok(board::next_order(max))
    }

    /// Create a job application
    ///
    /// # Business Logic
    /// - Requires company name, role and date applied
    /// - Always starts in the Applied column, appended after its last card
    /// - Priority defaults to Medium, location to "Unknown"
    pub async fn create_job(&self, req: CreateJobRequest) -> Result<JobApplication, ServiceError> {
        let (Some(company_name), Some(role), Some(date_applied)) =
            (req.company_name, req.role, req.date_applied)
        else {
            return Err(ServiceError::ValidationError(
                "Missing required fields".to_string(),
            ));
        };

        info!("Service: Creating job company={}, role={}", company_name, role);

        let order = self.next_order_in(JobStatus::Applied).await?;
        let now = Utc::now();
        let job = JobApplication {
            id: Uuid::new_v4(),
            company_name,
            role,
            status: JobStatus::Applied,
            order,
            date_applied,
            job_application_link: req.job_application_link,
            notes: req.notes,
            meeting_links: Vec::new(),
            interview_rounds: Vec::new(),
            offer_deadline: None,
            priority: req.priority.unwrap_or_default(),
            location: Some(
                req.location
                    .filter(|location| !location.trim().is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            last_status_change: now,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert(&job).await?;
        info!("Service: Job created with id={}, order={}", created.id, created.order);
        Ok(created)
    }

    /// Update the mutable fields of a job
    ///
    /// Identity fields in the request are dropped. A status that differs
    /// from the stored one is treated as a status transition.
    pub async fn update_job(
        &self,
        id: &str,
        req: UpdateJobRequest,
    ) -> Result<JobApplication, ServiceError> {
        let mut job = self.get_job(id).await?;

        let ignored = req.identity_changes(&job);
        if !ignored.is_empty() {
            warn!(
                "Service: Ignoring changes to immutable fields {:?} on job {}",
                ignored, job.id
            );
        }

        let now = Utc::now();
        let transition = req.status.filter(|status| *status != job.status);
        let requested_order = req.order;
        req.apply_to(&mut job);

        match transition {
            Some(status) => {
                job.order = match requested_order {
                    Some(order) => order,
                    None => self.next_order_in(status).await?,
                };
                info!(
                    "Service: Job {} moving {} -> {} at order {}",
                    job.id, job.status, status, job.order
                );
                job.status = status;
                job.last_status_change = now;
            }
            None => {
                if let Some(order) = requested_order {
                    job.order = order;
                }
            }
        }
        job.updated_at = now;

        self.store
            .update(&job)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Move a job to another column
    ///
    /// Without an explicit order the job is appended to the target column.
    /// Status, order and last-status-change are persisted in one write.
    pub async fn update_status(
        &self,
        id: &str,
        req: UpdateStatusRequest,
    ) -> Result<JobApplication, ServiceError> {
        let status = req
            .status
            .ok_or_else(|| ServiceError::ValidationError("Status is required".to_string()))?;
        let uuid = parse_id(id)?;

        let order = match req.order {
            Some(order) => order,
            None => self.next_order_in(status).await?,
        };

        let previous = self
            .store
            .get(uuid)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?
            .status;

        let job = self
            .store
            .set_status(uuid, status, order, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        info!(
            "Service: Job {} moving {} -> {} at order {}",
            job.id, previous, job.status, job.order
        );
        Ok(job)
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), ServiceError> {
        let uuid = parse_id(id)?;
        if !self.store.delete(uuid).await? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        info!("Service: Job {} deleted", uuid);
        Ok(())
    }

    pub async fn board(&self) -> Result<Board, ServiceError> {
        Ok(board::partition(self.store.list().await?))
    }

    pub async fn stats(&self) -> Result<BoardStats, ServiceError> {
        Ok(board::stats(&self.store.list().await?))
    }
}
