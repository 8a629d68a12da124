//! JobHub client: backend API access and effect execution.
mod api;
mod config;
mod demo;
mod engine;
mod filename;
mod normalize;
mod persist;
mod snapshot;
mod types;

pub use api::{JobsApi, ReqwestJobsApi};
pub use config::{ApiConfig, ClientSettings, DEFAULT_DEV_PROXY_TARGET, DEV_API_PREFIX};
pub use demo::DemoJobsApi;
pub use engine::EngineHandle;
pub use filename::preview_filename;
pub use normalize::{normalize_job, normalize_list};
pub use persist::{ensure_preview_dir, PersistError, PreviewWriter};
pub use snapshot::{prepare_snapshot, write_snapshot_preview, SnapshotError, SnapshotPreview};
pub use types::{ApiError, EngineEvent, FailureKind, ScrapeReceipt};
