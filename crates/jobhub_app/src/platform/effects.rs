use std::time::Duration;

use jobhub_client::{EngineEvent, EngineHandle, ScrapeReceipt};
use jobhub_core::{Effect, JobId, Msg};
use jobhub_logging::{jobhub_debug, jobhub_info, jobhub_warn};

/// Bridges core effects to engine commands and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
    status_failures: Vec<(JobId, String)>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            status_failures: Vec::new(),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadJobs { request } => {
                    jobhub_debug!("LoadJobs request={}", request);
                    self.engine.list_jobs(request);
                }
                Effect::SubmitUrl { pending_id, url } => {
                    jobhub_info!("SubmitUrl pending_id={} url={}", pending_id, url);
                    self.engine.submit_url(pending_id, url);
                }
                Effect::UpdateStatus { job_id, status } => {
                    jobhub_info!("UpdateStatus job_id={} status={}", job_id, status);
                    self.engine.update_status(job_id, status);
                }
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.engine.in_flight()
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn recv(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        Some(self.translate(event))
    }

    /// Status updates that failed since the last call; they never reach the dashboard state.
    pub fn take_status_failures(&mut self) -> Vec<(JobId, String)> {
        std::mem::take(&mut self.status_failures)
    }

    fn translate(&mut self, event: EngineEvent) -> Msg {
        match event {
            EngineEvent::JobsListed { request, result } => {
                match &result {
                    Ok(jobs) => jobhub_debug!("Request {} listed {} jobs", request, jobs.len()),
                    Err(err) => jobhub_warn!("Request {} failed to list jobs: {}", request, err),
                }
                Msg::JobsLoaded {
                    request,
                    result: result.map_err(|err| err.to_string()),
                }
            }
            EngineEvent::UrlSubmitted {
                pending_id,
                url,
                result,
            } => {
                match &result {
                    Ok(ScrapeReceipt::Acknowledged) => {
                        jobhub_info!("Scrape of {} acknowledged", url)
                    }
                    Ok(ScrapeReceipt::Body(body)) => {
                        jobhub_info!("Scrape of {} accepted: {}", url, body)
                    }
                    Err(err) => jobhub_warn!("Scrape of {} failed: {}", url, err),
                }
                Msg::ScrapeFinished {
                    pending_id,
                    result: result.map(|_| ()).map_err(|err| err.to_string()),
                }
            }
            EngineEvent::StatusUpdated {
                job_id,
                status,
                result,
            } => {
                if let Err(err) = &result {
                    jobhub_warn!("Failed to set job {} to {}: {}", job_id, status, err);
                    self.status_failures.push((job_id.clone(), err.to_string()));
                }
                Msg::StatusUpdateFinished {
                    job_id,
                    status,
                    result: result.map(|_| ()).map_err(|err| err.to_string()),
                }
            }
        }
    }
}
