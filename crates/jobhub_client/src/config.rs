use std::time::Duration;

use reqwest::Url;

use crate::ApiError;

/// Relative API prefix used in dev mode when no relative base is configured.
pub const DEV_API_PREFIX: &str = "/api/v1";
/// Upstream the dev prefix is forwarded to.
pub const DEFAULT_DEV_PROXY_TARGET: &str = "http://localhost:8000";

const JOBS_PATH: &str = "job-postings/";
const SCRAPE_PATH: &str = "scrape/jobs";

/// Where the backend lives.
///
/// Outside dev mode an explicit endpoint override wins over the base URL.
/// In dev mode the overrides are ignored and every request goes through the
/// local proxy upstream: a relative base (`/api`) is kept, anything else is
/// replaced by [`DEV_API_PREFIX`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub jobs_url: Option<String>,
    pub scrape_url: Option<String>,
    pub base_url: Option<String>,
    pub dev_mode: bool,
    pub dev_proxy_target: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            jobs_url: None,
            scrape_url: None,
            base_url: None,
            dev_mode: false,
            dev_proxy_target: DEFAULT_DEV_PROXY_TARGET.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// True when at least one endpoint can be resolved.
    pub fn is_configured(&self) -> bool {
        self.jobs_endpoint().is_ok() || self.scrape_endpoint().is_ok()
    }

    /// Effective base URL without a trailing slash.
    pub fn base(&self) -> Option<String> {
        let configured = non_blank(self.base_url.as_deref());
        let base = if self.dev_mode {
            let prefix = configured
                .filter(|base| base.starts_with('/'))
                .unwrap_or(DEV_API_PREFIX);
            format!(
                "{}{}",
                self.dev_proxy_target.trim().trim_end_matches('/'),
                prefix
            )
        } else {
            configured?.to_string()
        };
        Some(base.trim_end_matches('/').to_string())
    }

    pub fn jobs_endpoint(&self) -> Result<Url, ApiError> {
        self.endpoint(self.jobs_url.as_deref(), JOBS_PATH)
            .ok_or_else(|| ApiError::config("Missing JOBHUB_JOBS_API_URL or JOBHUB_API_BASE_URL"))
            .and_then(parse_absolute)
    }

    pub fn scrape_endpoint(&self) -> Result<Url, ApiError> {
        self.endpoint(self.scrape_url.as_deref(), SCRAPE_PATH)
            .ok_or_else(|| ApiError::config("Missing JOBHUB_SCRAPE_API_URL or JOBHUB_API_BASE_URL"))
            .and_then(parse_absolute)
    }

    /// `{base}/job-postings/{id}/status`, with `job_id` encoded as one path segment.
    pub fn status_endpoint(&self, job_id: &str) -> Result<Url, ApiError> {
        let base = self
            .base()
            .ok_or_else(|| ApiError::config("Missing JOBHUB_API_BASE_URL"))?;
        let mut url = parse_absolute(base)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["job-postings", job_id, "status"]);
        Ok(url)
    }

    fn endpoint(&self, direct: Option<&str>, path: &str) -> Option<String> {
        if !self.dev_mode {
            if let Some(direct) = non_blank(direct) {
                return Some(direct.to_string());
            }
        }
        self.base().map(|base| format!("{base}/{path}"))
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Whole-request deadline; `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_absolute(raw: String) -> Result<Url, ApiError> {
    Url::parse(&raw)
        .map_err(|err| ApiError::config(format!("API endpoint {raw:?} is not an absolute URL: {err}")))
}
