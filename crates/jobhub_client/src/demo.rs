use std::sync::Mutex;

use jobhub_core::{JobRecord, JobStatus};

use crate::{ApiError, FailureKind, JobsApi, ScrapeReceipt};

/// In-memory backend for trying the dashboard without a running API.
#[derive(Debug)]
pub struct DemoJobsApi {
    inner: Mutex<DemoState>,
}

#[derive(Debug)]
struct DemoState {
    jobs: Vec<JobRecord>,
    next_id: u64,
}

impl Default for DemoJobsApi {
    fn default() -> Self {
        Self::with_jobs(Self::sample_jobs())
    }
}

impl DemoJobsApi {
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        let next_id = jobs.len() as u64 + 1;
        Self {
            inner: Mutex::new(DemoState { jobs, next_id }),
        }
    }

    pub fn sample_jobs() -> Vec<JobRecord> {
        [
            ("1", "Acme Corp", JobStatus::Applied, "Frontend Engineer", 72.0, "$120,000", "$115,000"),
            ("2", "Globex", JobStatus::Interview, "Full Stack Developer", 84.0, "$130,000", "$128,000"),
            ("3", "Initech", JobStatus::Offer, "Backend Engineer", 90.0, "$140,000", "$135,000"),
            ("4", "Umbrella", JobStatus::Rejected, "Data Engineer", 65.0, "$125,000", "$123,000"),
            ("5", "Soylent", JobStatus::Applied, "DevOps Engineer", 77.0, "$118,000", "$120,000"),
        ]
        .into_iter()
        .map(|(id, company, status, position, score, posted, estimate)| JobRecord {
            id: id.to_string(),
            company: company.to_string(),
            status,
            position: position.to_string(),
            score: Some(score),
            salary_posted: posted.to_string(),
            salary_estimate: estimate.to_string(),
            snapshot: None,
            url: String::new(),
        })
        .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DemoState>, ApiError> {
        self.inner
            .lock()
            .map_err(|_| ApiError::new(FailureKind::Network, "demo backend poisoned"))
    }
}

#[async_trait::async_trait]
impl JobsApi for DemoJobsApi {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, ApiError> {
        Ok(self.lock()?.jobs.clone())
    }

    async fn submit_url(&self, url: &str) -> Result<ScrapeReceipt, ApiError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ApiError::invalid_argument("URL is required"));
        }
        let mut state = self.lock()?;
        if !state.jobs.iter().any(|job| job.url == url) {
            let id = state.next_id.to_string();
            state.next_id += 1;
            state.jobs.push(JobRecord {
                url: url.to_string(),
                ..JobRecord::new(id)
            });
        }
        Ok(ScrapeReceipt::Acknowledged)
    }

    async fn update_status(
        &self,
        job_id: &str,
        status: JobStatus,
    ) -> Result<Option<JobRecord>, ApiError> {
        if job_id.trim().is_empty() {
            return Err(ApiError::invalid_argument("job id and status are required"));
        }
        let mut state = self.lock()?;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| {
                ApiError::new(FailureKind::HttpStatus(404), "Failed to update status: 404")
            })?;
        job.status = status;
        Ok(Some(job.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submitted_urls_appear_once() {
        let api = DemoJobsApi::default();
        api.submit_url("https://jobs.example.com/1").await.unwrap();
        api.submit_url("https://jobs.example.com/1").await.unwrap();

        let jobs = api.list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 6);
        let added = jobs.last().unwrap();
        assert_eq!(added.id, "6");
        assert_eq!(added.status, JobStatus::New);
        assert_eq!(added.score, None);
    }

    #[tokio::test]
    async fn status_updates_persist_and_unknown_ids_fail() {
        let api = DemoJobsApi::default();
        let updated = api.update_status("2", JobStatus::Offer).await.unwrap();
        assert_eq!(updated.map(|job| job.status), Some(JobStatus::Offer));
        assert_eq!(api.list_jobs().await.unwrap()[1].status, JobStatus::Offer);

        let err = api.update_status("99", JobStatus::Offer).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(404));
    }

    #[tokio::test]
    async fn empty_arguments_are_rejected() {
        let api = DemoJobsApi::default();
        assert_eq!(
            api.submit_url("  ").await.unwrap_err().kind,
            FailureKind::InvalidArgument
        );
        assert_eq!(
            api.update_status("", JobStatus::New).await.unwrap_err().kind,
            FailureKind::InvalidArgument
        );
    }
}
