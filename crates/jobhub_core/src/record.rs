use crate::JobStatus;

/// Backend identifier of a job posting, always carried as a string.
pub type JobId = String;

/// Identity of an issued reload; later requests have larger ids.
pub type RequestId = u64;

/// Canonical job posting after field normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobRecord {
    pub id: JobId,
    pub company: String,
    pub status: JobStatus,
    pub position: String,
    /// Raw fit score; clamped to [0, 100] only when rendered.
    pub score: Option<f64>,
    pub salary_posted: String,
    pub salary_estimate: String,
    /// Captured HTML of the posting page, if the backend stored one.
    pub snapshot: Option<String>,
    pub url: String,
}

impl JobRecord {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingState {
    Submitting,
    Failed(String),
    /// Scrape did not show up in the list before the pending TTL elapsed.
    Expired,
}

/// Client-only placeholder between "URL submitted" and "job visible in list".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub id: String,
    pub url: String,
    pub submitted_at_ms: u64,
    pub state: PendingState,
}

impl PendingSubmission {
    pub(crate) fn new(seq: u64, url: String, submitted_at_ms: u64) -> Self {
        Self {
            id: format!("pending-{submitted_at_ms}-{seq}"),
            url,
            submitted_at_ms,
            state: PendingState::Submitting,
        }
    }

    pub fn status(&self) -> JobStatus {
        JobStatus::New
    }
}
