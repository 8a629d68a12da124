use jobhub_core::{JobRecord, JobStatus};
use jobhub_logging::{jobhub_debug, jobhub_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde_json::{json, Value};

use crate::normalize::{normalize_job, normalize_list};
use crate::{ApiConfig, ApiError, ClientSettings, FailureKind, ScrapeReceipt};

const JSON: &str = "application/json";

/// The three backend operations the dashboard depends on.
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, ApiError>;

    async fn submit_url(&self, url: &str) -> Result<ScrapeReceipt, ApiError>;

    /// Returns the updated job when the backend echoes one back.
    async fn update_status(
        &self,
        job_id: &str,
        status: JobStatus,
    ) -> Result<Option<JobRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsApi {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ReqwestJobsApi {
    pub fn new(config: ApiConfig, settings: &ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { config, client })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).header(ACCEPT, JSON)
    }

    fn json_request(&self, method: Method, url: Url, body: &Value) -> RequestBuilder {
        self.request(method, url)
            .header(CONTENT_TYPE, JSON)
            .body(body.to_string())
    }

    /// Sends and rejects any non-2xx status with `"{context}: {code}"`.
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{context}: {}", status.as_u16()),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl JobsApi for ReqwestJobsApi {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, ApiError> {
        let url = self.config.jobs_endpoint()?;
        jobhub_debug!("GET {}", url);
        let response = self
            .send(self.request(Method::GET, url), "Failed to fetch jobs")
            .await?;
        let body = read_body(response).await?;
        let value: Value = serde_json::from_slice(&body).map_err(|err| {
            ApiError::new(
                FailureKind::Decode,
                format!("Failed to decode jobs response: {err}"),
            )
        })?;
        Ok(normalize_list(&value))
    }

    async fn submit_url(&self, url: &str) -> Result<ScrapeReceipt, ApiError> {
        let target = url.trim();
        if target.is_empty() {
            return Err(ApiError::invalid_argument("URL is required"));
        }
        let endpoint = self.config.scrape_endpoint()?;
        jobhub_debug!("POST {} url={}", endpoint, target);
        let response = self
            .send(
                self.json_request(Method::POST, endpoint, &json!({ "url": target })),
                "Scrape request failed",
            )
            .await?;
        let body = read_body(response).await?;
        Ok(match serde_json::from_slice::<Value>(&body) {
            Ok(value) => ScrapeReceipt::Body(value),
            Err(_) => ScrapeReceipt::Acknowledged,
        })
    }

    async fn update_status(
        &self,
        job_id: &str,
        status: JobStatus,
    ) -> Result<Option<JobRecord>, ApiError> {
        if job_id.trim().is_empty() {
            return Err(ApiError::invalid_argument("job id and status are required"));
        }
        let endpoint = self.config.status_endpoint(job_id)?;
        jobhub_debug!("PATCH {} status={}", endpoint, status);
        let response = self
            .send(
                self.json_request(
                    Method::PATCH,
                    endpoint,
                    &json!({ "status": status.label() }),
                ),
                "Failed to update status",
            )
            .await?;
        let body = read_body(response).await?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) if value.is_object() => Ok(Some(normalize_job(&value))),
            Ok(_) => Ok(None),
            Err(err) => {
                jobhub_warn!("Status update for {} returned a non-JSON body: {}", job_id, err);
                Ok(None)
            }
        }
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>, ApiError> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(map_reqwest_error)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
