#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadJobs {
        request: crate::RequestId,
    },
    SubmitUrl {
        pending_id: String,
        url: String,
    },
    UpdateStatus {
        job_id: crate::JobId,
        status: crate::JobStatus,
    },
}
