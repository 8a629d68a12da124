use std::collections::BTreeMap;
use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::{JobId, JobRecord, JobStatus, PendingState, PendingSubmission, RequestId};

/// Placeholders still submitting after this long are marked expired.
pub const DEFAULT_PENDING_TTL_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    jobs: Vec<JobRecord>,
    /// Newest first.
    pending: Vec<PendingSubmission>,
    loading: bool,
    error: Option<String>,
    latest_request: RequestId,
    /// Optimistic statuses shown until the next successful reload.
    status_overlay: BTreeMap<JobId, JobStatus>,
    open_picker: Option<JobId>,
    detached: bool,
    pending_seq: u64,
    pending_ttl_ms: Option<u64>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            pending: Vec::new(),
            loading: false,
            error: None,
            latest_request: 0,
            status_overlay: BTreeMap::new(),
            open_picker: None,
            detached: false,
            pending_seq: 0,
            pending_ttl_ms: Some(DEFAULT_PENDING_TTL_MS),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` keeps placeholders forever.
    pub fn with_pending_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.pending_ttl_ms = ttl.map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn pending(&self) -> &[PendingSubmission] {
        &self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub fn open_picker(&self) -> Option<&str> {
        self.open_picker.as_deref()
    }

    pub fn find_job(&self, job_id: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    /// Status as the user currently sees it, including optimistic edits.
    pub fn displayed_status(&self, job: &JobRecord) -> JobStatus {
        self.status_overlay
            .get(&job.id)
            .copied()
            .unwrap_or(job.status)
    }

    /// Returns true once if the state changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    /// Issues a new reload id. Responses to older ids are dropped on arrival.
    pub(crate) fn begin_reload(&mut self, preserve_error: bool) -> RequestId {
        self.latest_request += 1;
        self.loading = true;
        if !preserve_error {
            self.error = None;
        }
        self.mark_dirty();
        self.latest_request
    }

    /// Applies a list response; returns false when it was stale or arrived after detach.
    pub(crate) fn apply_jobs_loaded(
        &mut self,
        request: RequestId,
        result: Result<Vec<JobRecord>, String>,
    ) {
        if self.detached || request != self.latest_request {
            return;
        }
        match result {
            Ok(jobs) => {
                self.jobs = jobs;
                self.status_overlay.clear();
                if let Some(open) = self.open_picker.as_deref() {
                    if self.find_job(open).is_none() {
                        self.open_picker = None;
                    }
                }
                self.prune_pending();
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        self.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn push_pending(&mut self, url: String, now_ms: u64) -> String {
        self.pending_seq += 1;
        let pending = PendingSubmission::new(self.pending_seq, url, now_ms);
        let id = pending.id.clone();
        self.pending.insert(0, pending);
        self.mark_dirty();
        id
    }

    pub(crate) fn mark_pending_failed(&mut self, pending_id: &str, message: &str) {
        if let Some(pending) = self.pending.iter_mut().find(|p| p.id == pending_id) {
            pending.state = PendingState::Failed(message.to_string());
            self.mark_dirty();
        }
    }

    pub(crate) fn dismiss_pending(&mut self, pending_id: &str) {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != pending_id);
        if self.pending.len() != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn expire_pending(&mut self, now_ms: u64) {
        let Some(ttl) = self.pending_ttl_ms else {
            return;
        };
        let mut changed = false;
        for pending in &mut self.pending {
            if pending.state == PendingState::Submitting
                && now_ms.saturating_sub(pending.submitted_at_ms) >= ttl
            {
                pending.state = PendingState::Expired;
                changed = true;
            }
        }
        if changed {
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_picker(&mut self, job_id: JobId) {
        if self.find_job(&job_id).is_none() {
            return;
        }
        if self.open_picker.as_deref() == Some(job_id.as_str()) {
            self.open_picker = None;
        } else {
            self.open_picker = Some(job_id);
        }
        self.mark_dirty();
    }

    pub(crate) fn close_picker(&mut self) {
        if self.open_picker.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_overlay(&mut self, job_id: JobId, status: JobStatus) {
        self.status_overlay.insert(job_id, status);
        self.mark_dirty();
    }

    pub(crate) fn detach(&mut self) {
        self.detached = true;
    }

    fn prune_pending(&mut self) {
        if self.pending.is_empty() || self.jobs.is_empty() {
            return;
        }
        let jobs = &self.jobs;
        self.pending
            .retain(|pending| !jobs.iter().any(|job| !job.url.is_empty() && job.url == pending.url));
    }
}
