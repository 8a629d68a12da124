use std::cell::Cell;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobhub_core::{JobId, JobStatus, RequestId};
use jobhub_logging::jobhub_debug;

use crate::{EngineEvent, JobsApi};

enum EngineCommand {
    ListJobs { request: RequestId },
    SubmitUrl { pending_id: String, url: String },
    UpdateStatus { job_id: JobId, status: JobStatus },
}

/// Runs backend calls on a background tokio runtime.
///
/// Every command yields exactly one [`EngineEvent`], delivered in completion
/// order, so overlapping requests may finish out of dispatch order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    in_flight: Cell<usize>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn JobsApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("jobhub-engine")
            .build()?;

        thread::Builder::new()
            .name("jobhub-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                jobhub_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            in_flight: Cell::new(0),
        })
    }

    pub fn list_jobs(&self, request: RequestId) {
        self.send(EngineCommand::ListJobs { request });
    }

    pub fn submit_url(&self, pending_id: impl Into<String>, url: impl Into<String>) {
        self.send(EngineCommand::SubmitUrl {
            pending_id: pending_id.into(),
            url: url.into(),
        });
    }

    pub fn update_status(&self, job_id: impl Into<JobId>, status: JobStatus) {
        self.send(EngineCommand::UpdateStatus {
            job_id: job_id.into(),
            status,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let event = self.event_rx.try_recv().ok();
        self.note_received(event.is_some());
        event
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        let event = self.event_rx.recv_timeout(timeout).ok();
        self.note_received(event.is_some());
        event
    }

    /// Commands sent whose event has not been received yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_ok() {
            self.in_flight.set(self.in_flight.get() + 1);
        }
    }

    fn note_received(&self, received: bool) {
        if received {
            self.in_flight.set(self.in_flight.get().saturating_sub(1));
        }
    }
}

async fn handle_command(api: &dyn JobsApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::ListJobs { request } => EngineEvent::JobsListed {
            request,
            result: api.list_jobs().await,
        },
        EngineCommand::SubmitUrl { pending_id, url } => {
            let result = api.submit_url(&url).await;
            EngineEvent::UrlSubmitted {
                pending_id,
                url,
                result,
            }
        }
        EngineCommand::UpdateStatus { job_id, status } => {
            let result = api.update_status(&job_id, status).await;
            EngineEvent::StatusUpdated {
                job_id,
                status,
                result,
            }
        }
    }
}
