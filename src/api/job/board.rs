use serde::Serialize;

use super::models::{JobApplication, JobStatus};

/// Gap between neighbouring cards so a card can be dropped between two
/// others without renumbering the column.
pub const ORDER_STEP: i64 = 1000;

/// Order key for a card appended to a column whose current maximum is `max`
pub fn next_order(max: Option<i64>) -> i64 {
    match max {
        Some(max) => max.saturating_add(ORDER_STEP),
        None => ORDER_STEP,
    }
}

#[derive(Debug, Serialize)]
pub struct BoardColumn {
    pub status: JobStatus,
    pub jobs: Vec<JobApplication>,
}

#[derive(Debug, Serialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

/// Per-status card counts for the board header
#[derive(Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub applied: usize,
    pub interviewing: usize,
    pub offer_received: usize,
    pub rejected: usize,
}

/// Split jobs into one column per status, in board order.
///
/// Cards within a column are sorted by order key; equal keys fall back to
/// creation time so the layout is stable across reloads.
pub fn partition(jobs: Vec<JobApplication>) -> Board {
    let mut columns: Vec<BoardColumn> = JobStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            jobs: Vec::new(),
        })
        .collect();

    for job in jobs {
        if let Some(column) = columns.iter_mut().find(|c| c.status == job.status) {
            column.jobs.push(job);
        }
    }

    for column in &mut columns {
        column
            .jobs
            .sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
    }

    Board { columns }
}

pub fn stats(jobs: &[JobApplication]) -> BoardStats {
    jobs.iter().fold(
        BoardStats {
            total: jobs.len(),
            ..BoardStats::default()
        },
        |mut acc, job| {
            match job.status {
                JobStatus::Applied => acc.applied += 1,
                JobStatus::Interviewing => acc.interviewing += 1,
                JobStatus::OfferReceived => acc.offer_received += 1,
                JobStatus::Rejected => acc.rejected += 1,
            }
            acc
        },
    )
}
