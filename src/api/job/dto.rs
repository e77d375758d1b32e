use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::dates;
use super::models::{self, InterviewRound, JobApplication, JobStatus, Priority};

/// Body of `POST /jobs`
///
/// Required fields are `Option`s so that a missing value surfaces as a
/// per-field validation error rather than an opaque deserialize failure.
/// Any `status` in the body is ignored; new jobs always start in Applied.
#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(
        required(message = "Company name is required"),
        length(min = 1, max = 200, message = "Company name must be between 1 and 200 characters")
    )]
    pub company_name: Option<String>,

    #[validate(
        required(message = "Role is required"),
        length(min = 1, max = 200, message = "Role must be between 1 and 200 characters")
    )]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    #[validate(required(message = "Date applied is required"))]
    pub date_applied: Option<DateTime<Utc>>,

    #[validate(length(max = 2048, message = "Application link is too long"))]
    pub job_application_link: Option<String>,

    #[validate(length(max = 10000, message = "Notes must be at most 10000 characters"))]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "models::deserialize_optional_priority")]
    pub priority: Option<Priority>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
}

/// Body of `PUT /jobs/{id}`
///
/// Absent fields are left untouched. The identity fields are accepted so
/// that clients can post back a whole card, but they are never applied.
#[derive(Deserialize, Debug, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub job_application_link: Option<String>,
    pub date_applied: Option<serde_json::Value>,

    pub status: Option<JobStatus>,
    pub order: Option<i64>,

    #[validate(length(max = 10000, message = "Notes must be at most 10000 characters"))]
    pub notes: Option<String>,

    pub meeting_links: Option<Vec<String>>,
    pub interview_rounds: Option<Vec<InterviewRound>>,

    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    pub offer_deadline: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "models::deserialize_optional_priority")]
    pub priority: Option<Priority>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
}

impl UpdateJobRequest {
    /// Names of identity fields whose requested value differs from `job`
    pub fn identity_changes(&self, job: &JobApplication) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if self.company_name.as_ref().is_some_and(|v| *v != job.company_name) {
            changed.push("companyName");
        }
        if self.role.as_ref().is_some_and(|v| *v != job.role) {
            changed.push("role");
        }
        if self.job_application_link.is_some()
            && self.job_application_link != job.job_application_link
        {
            changed.push("jobApplicationLink");
        }
        if let Some(value) = &self.date_applied {
            let same = value
                .as_str()
                .and_then(|raw| dates::parse(raw).ok())
                .is_some_and(|dt| dt == job.date_applied);
            if !same && !value.is_null() {
                changed.push("dateApplied");
            }
        }

        changed
    }

    /// Copy the present non-identity, non-status fields onto `job`
    pub fn apply_to(self, job: &mut JobApplication) {
        if let Some(notes) = self.notes {
            job.notes = Some(notes);
        }
        if let Some(links) = self.meeting_links {
            job.meeting_links = links;
        }
        if let Some(rounds) = self.interview_rounds {
            job.interview_rounds = rounds;
        }
        if let Some(deadline) = self.offer_deadline {
            job.offer_deadline = Some(deadline);
        }
        if let Some(priority) = self.priority {
            job.priority = priority;
        }
        if let Some(location) = self.location {
            job.location = Some(location);
        }
    }
}

/// Body of `PATCH /jobs/{id}/update-status`
#[derive(Deserialize, Debug, Validate)]
pub struct UpdateStatusRequest {
    #[validate(required(message = "Status is required"))]
    pub status: Option<JobStatus>,
    pub order: Option<i64>,
}

/// Response for a single created or modified job
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: JobApplication,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
