use std::fmt;
use std::str::FromStr;

/// Application stage of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum JobStatus {
    #[default]
    New,
    Applied,
    Rejected,
    Interview,
    Offer,
}

/// Color family a status is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Danger,
    Accent,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status {:?} (expected one of New, Applied, Rejected, Interview, Offer)",
            self.0
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl JobStatus {
    /// Picker order.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::New,
        JobStatus::Applied,
        JobStatus::Rejected,
        JobStatus::Interview,
        JobStatus::Offer,
    ];

    /// Backend values are trusted loosely: anything unrecognized or blank is `New`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::Applied => "applied",
            JobStatus::Rejected => "rejected",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    pub fn style(self) -> StatusStyle {
        let (label, tone) = match self {
            JobStatus::New => ("New", Tone::Neutral),
            JobStatus::Applied => ("Applied", Tone::Info),
            JobStatus::Rejected => ("Rejected", Tone::Danger),
            JobStatus::Interview => ("Interview", Tone::Accent),
            JobStatus::Offer => ("Offer", Tone::Success),
        };
        StatusStyle { label, tone }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStatusError(trimmed.to_string()))
    }
}

/// Statuses offered when the pill for `current` is opened.
pub fn picker_options(current: JobStatus) -> Vec<JobStatus> {
    JobStatus::ALL
        .into_iter()
        .filter(|status| *status != current)
        .collect()
}
