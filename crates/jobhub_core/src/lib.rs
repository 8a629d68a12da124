//! JobHub core: pure dashboard state machine and view-model helpers.
mod effect;
mod format;
mod metrics;
mod msg;
mod record;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use format::{format_salary, score_display, ScoreDisplay, TextCell, LOADING_BAR_PERCENT};
pub use metrics::{
    average_score, metric_cards, top_job, Accent, MetricCard, StatusCounts, TARGET_FIT,
};
pub use msg::Msg;
pub use record::{JobId, JobRecord, PendingState, PendingSubmission, RequestId};
pub use state::{AppState, DEFAULT_PENDING_TTL_MS};
pub use status::{picker_options, JobStatus, ParseStatusError, StatusStyle, Tone};
pub use update::update;
pub use view_model::{AppViewModel, InsightView, JobRowView, PendingRowView, TableNotice};
