use std::fmt;

use jobhub_core::{JobId, JobRecord, JobStatus, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Config, message)
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidArgument, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No usable API endpoint could be resolved.
    Config,
    /// A required id/url argument was empty.
    InvalidArgument,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Config => write!(f, "configuration error"),
            FailureKind::InvalidArgument => write!(f, "invalid argument"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

/// What the scrape endpoint answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeReceipt {
    /// Success status with an empty or non-JSON body.
    Acknowledged,
    Body(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    JobsListed {
        request: RequestId,
        result: Result<Vec<JobRecord>, ApiError>,
    },
    UrlSubmitted {
        pending_id: String,
        url: String,
        result: Result<ScrapeReceipt, ApiError>,
    },
    StatusUpdated {
        job_id: JobId,
        status: JobStatus,
        result: Result<Option<JobRecord>, ApiError>,
    },
}
