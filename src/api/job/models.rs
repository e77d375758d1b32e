use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::dates;

/// Kanban column a job application sits in
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Applied,
    Interviewing,
    #[serde(rename = "Offer Received")]
    OfferReceived,
    Rejected,
}

impl JobStatus {
    /// All statuses in board column order
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::OfferReceived,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::OfferReceived => "Offer Received",
            JobStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown job status: {}", s))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// Form selects post `""` for "no choice"; treat it like an absent priority
pub fn deserialize_optional_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    #[serde(default)]
    pub round_name: String,
    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A tracked job application
///
/// `company_name`, `role`, `job_application_link` and `date_applied` are
/// fixed at creation; nothing after `JobService::create_job` writes them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub company_name: String,
    pub role: String,
    pub status: JobStatus,
    pub order: i64,
    pub date_applied: DateTime<Utc>,
    pub job_application_link: Option<String>,
    pub notes: Option<String>,
    pub meeting_links: Vec<String>,
    pub interview_rounds: Vec<InterviewRound>,
    pub offer_deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub location: Option<String>,
    pub last_status_change: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&JobStatus::OfferReceived).unwrap();
        assert_eq!(json, "\"Offer Received\"");

        let parsed: JobStatus = serde_json::from_str("\"Interviewing\"").unwrap();
        assert_eq!(parsed, JobStatus::Interviewing);

        assert!(serde_json::from_str::<JobStatus>("\"offer_received\"").is_err());
    }

    #[test]
    fn status_round_trips_through_its_column_value() {
        for status in JobStatus::ALL {
            assert_eq!(status.as_str().parse::<JobStatus>(), Ok(status));
        }
        assert!("Ghosted".parse::<JobStatus>().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!("High".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn blank_priority_reads_as_absent() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "deserialize_optional_priority")]
            priority: Option<Priority>,
        }

        let blank: Body = serde_json::from_str(r#"{"priority":" "}"#).unwrap();
        assert_eq!(blank.priority, None);
        let missing: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.priority, None);
        let high: Body = serde_json::from_str(r#"{"priority":"High"}"#).unwrap();
        assert_eq!(high.priority, Some(Priority::High));
        assert!(serde_json::from_str::<Body>(r#"{"priority":"Urgent"}"#).is_err());
    }

    #[test]
    fn interview_round_accepts_plain_dates() {
        let round: InterviewRound = serde_json::from_str(
            r#"{"roundName":"Onsite","date":"2024-03-05","feedback":"went well"}"#,
        )
        .unwrap();
        assert_eq!(round.round_name, "Onsite");
        assert_eq!(
            round.date.unwrap().to_rfc3339(),
            "2024-03-05T00:00:00+00:00"
        );
    }
}
