#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Dashboard attached or user asked for fresh data.
    ReloadRequested,
    /// Engine finished a list request.
    JobsLoaded {
        request: crate::RequestId,
        result: Result<Vec<crate::JobRecord>, String>,
    },
    /// User submitted the capture form.
    UrlSubmitted { url: String, now_ms: u64 },
    /// Engine finished posting a URL for scraping.
    ScrapeFinished {
        pending_id: String,
        result: Result<(), String>,
    },
    /// User clicked the status pill of a row.
    StatusPillClicked { job_id: crate::JobId },
    /// User picked a status from the open picker.
    StatusChosen {
        job_id: crate::JobId,
        status: crate::JobStatus,
    },
    /// Engine finished a status PATCH.
    StatusUpdateFinished {
        job_id: crate::JobId,
        status: crate::JobStatus,
        result: Result<(), String>,
    },
    /// User removed a stale placeholder.
    PendingDismissed { pending_id: String },
    /// Clock tick used to expire orphaned placeholders.
    Tick { now_ms: u64 },
    /// Dashboard is going away; later engine results are ignored.
    Detached,
    /// Fallback for placeholder wiring.
    NoOp,
}
