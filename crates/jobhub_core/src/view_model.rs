use crate::{
    average_score, format_salary, metric_cards, picker_options, score_display, top_job, AppState,
    JobId, JobStatus, MetricCard, PendingState, ScoreDisplay, StatusCounts, TextCell,
};

/// What the job table shows instead of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableNotice {
    Loading,
    Error(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub metrics: Vec<MetricCard>,
    pub status_counts: StatusCounts,
    pub average_score: Option<i64>,
    pub insight: Option<InsightView>,
    pub pending_rows: Vec<PendingRowView>,
    pub rows: Vec<JobRowView>,
    pub notice: Option<TableNotice>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightView {
    pub job_id: JobId,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub score: ScoreDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRowView {
    pub pending_id: String,
    pub url: String,
    pub status: JobStatus,
    /// "Fetching...", "Scrape failed: ..." or "Scrape timed out".
    pub headline: String,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub company: TextCell,
    pub status: JobStatus,
    /// Remaining statuses when this row's picker is open.
    pub picker: Option<Vec<JobStatus>>,
    pub position: TextCell,
    pub score: ScoreDisplay,
    pub salary_posted: TextCell,
    pub salary_estimate: TextCell,
    pub url: Option<String>,
    pub has_snapshot: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let jobs = state.jobs();
        let status_counts = StatusCounts::from_jobs(jobs);
        let average = average_score(jobs);
        let metrics = metric_cards(&status_counts, average, jobs.len(), state.pending().len());

        let insight = top_job(jobs).map(|job| InsightView {
            job_id: job.id.clone(),
            company: job.company.clone(),
            position: job.position.clone(),
            status: job.status,
            score: score_display(job.score),
        });

        let pending_rows = state
            .pending()
            .iter()
            .map(|pending| {
                let (headline, failed) = match &pending.state {
                    PendingState::Submitting => ("Fetching...".to_string(), false),
                    PendingState::Failed(message) => (format!("Scrape failed: {message}"), true),
                    PendingState::Expired => ("Scrape timed out".to_string(), true),
                };
                PendingRowView {
                    pending_id: pending.id.clone(),
                    url: pending.url.clone(),
                    status: pending.status(),
                    headline,
                    failed,
                }
            })
            .collect();

        let notice = if state.is_loading() {
            Some(TableNotice::Loading)
        } else if let Some(error) = state.error() {
            Some(TableNotice::Error(error.to_string()))
        } else if jobs.is_empty() {
            Some(TableNotice::Empty)
        } else {
            None
        };

        let rows = if notice.is_none() {
            jobs.iter()
                .map(|job| {
                    let status = state.displayed_status(job);
                    let picker = (state.open_picker() == Some(job.id.as_str()))
                        .then(|| picker_options(status));
                    JobRowView {
                        job_id: job.id.clone(),
                        company: TextCell::or_placeholder(&job.company, "Unknown"),
                        status,
                        picker,
                        position: TextCell::or_placeholder(&job.position, "Not specified"),
                        score: score_display(job.score),
                        salary_posted: format_salary(&job.salary_posted),
                        salary_estimate: format_salary(&job.salary_estimate),
                        url: (!job.url.is_empty()).then(|| job.url.clone()),
                        has_snapshot: job.snapshot.is_some(),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            metrics,
            status_counts,
            average_score: average,
            insight,
            pending_rows,
            rows,
            notice,
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
        }
    }

    pub fn scoring_active(&self) -> bool {
        self.average_score.is_some()
    }
}
