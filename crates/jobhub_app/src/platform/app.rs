use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use jobhub_client::{
    write_snapshot_preview, DemoJobsApi, EngineHandle, JobsApi, ReqwestJobsApi, SnapshotPreview,
};
use jobhub_core::{update, AppState, AppViewModel, JobId, JobStatus, Msg, PendingState};
use jobhub_logging::{jobhub_info, jobhub_warn};

use super::cli::{Cli, Command};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{self, parse_command};
use super::ui::render::{render_dashboard, render_snapshot};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::initialize(
        cli.log_destination(),
        jobhub_logging::parse_level(&cli.log_level),
    );

    let api: Arc<dyn JobsApi> = if cli.api.demo {
        jobhub_info!("Using the built-in demo backend");
        Arc::new(DemoJobsApi::default())
    } else {
        let config = cli.api.api_config();
        if !config.is_configured() {
            jobhub_warn!("No API endpoints configured; requests will fail");
        }
        Arc::new(ReqwestJobsApi::new(config, &cli.api.client_settings())?)
    };
    let engine = EngineHandle::new(api).context("failed to start the request engine")?;
    let state = AppState::new().with_pending_ttl(cli.pending_ttl());
    let mut session = Session::new(state, EffectRunner::new(engine), cli.preview_dir.clone());

    match cli.command {
        None | Some(Command::Dashboard) => run_dashboard(&mut session),
        Some(Command::List) => run_list(&mut session),
        Some(Command::Add { url }) => run_add(&mut session, &url),
        Some(Command::SetStatus { job, status }) => run_set_status(&mut session, &job, status),
        Some(Command::Snapshot { job }) => run_snapshot(&mut session, &job),
    }
}

/// Owns the dashboard state and feeds it messages from the user and the engine.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    preview_dir: PathBuf,
}

impl Session {
    pub fn new(state: AppState, runner: EffectRunner, preview_dir: PathBuf) -> Self {
        Self {
            state,
            runner,
            preview_dir,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Applies engine results that arrive within `timeout`; true if any did.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        let Some(msg) = self.runner.recv(timeout) else {
            return false;
        };
        self.dispatch(msg);
        while let Some(msg) = self.runner.recv(Duration::ZERO) {
            self.dispatch(msg);
        }
        true
    }

    /// Runs until no request is outstanding, including follow-up reloads.
    pub fn settle(&mut self) {
        while self.runner.in_flight() > 0 {
            self.pump(POLL_INTERVAL);
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn take_status_failures(&mut self) -> Vec<(JobId, String)> {
        self.runner.take_status_failures()
    }

    /// Resolves an exact job id, or else a 1-based row number.
    pub fn resolve_job(&self, needle: &str) -> Result<JobId> {
        let needle = needle.trim();
        if let Some(job) = self.state.find_job(needle) {
            return Ok(job.id.clone());
        }
        needle
            .parse::<usize>()
            .ok()
            .and_then(|row| row.checked_sub(1))
            .and_then(|index| self.state.jobs().get(index))
            .map(|job| job.id.clone())
            .ok_or_else(|| anyhow!("no job with id or row {needle:?}"))
    }

    pub fn write_snapshot(&self, job_id: &str) -> Result<(PathBuf, SnapshotPreview)> {
        let job = self
            .state
            .find_job(job_id)
            .ok_or_else(|| anyhow!("no job with id {job_id:?}"))?;
        Ok(write_snapshot_preview(&self.preview_dir, job)?)
    }
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

fn load(session: &mut Session) {
    session.dispatch(Msg::ReloadRequested);
    session.settle();
}

fn run_list(session: &mut Session) -> Result<ExitCode> {
    load(session);
    print!("{}", render_dashboard(&session.view()));
    match session.state().error() {
        Some(error) => bail!("{error}"),
        None => Ok(ExitCode::SUCCESS),
    }
}

fn run_add(session: &mut Session, url: &str) -> Result<ExitCode> {
    load(session);
    session.dispatch(Msg::UrlSubmitted {
        url: url.to_string(),
        now_ms: now_ms(),
    });
    session.settle();
    print!("{}", render_dashboard(&session.view()));

    let failed = session
        .state()
        .pending()
        .iter()
        .find_map(|pending| match &pending.state {
            PendingState::Failed(message) => Some(message.clone()),
            _ => None,
        });
    match (failed, session.state().error()) {
        (Some(message), _) => bail!("scrape of {url} failed: {message}"),
        (None, Some(error)) => bail!("{error}"),
        (None, None) => Ok(ExitCode::SUCCESS),
    }
}

fn run_set_status(session: &mut Session, job: &str, status: JobStatus) -> Result<ExitCode> {
    load(session);
    if let Some(error) = session.state().error() {
        bail!("{error}");
    }
    let job_id = session.resolve_job(job)?;
    session.dispatch(Msg::StatusChosen {
        job_id: job_id.clone(),
        status,
    });
    session.settle();

    let failures = session.take_status_failures();
    for (failed_id, message) in &failures {
        eprintln!("Warning: status of job {failed_id} was not saved: {message}");
    }
    if !failures.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    println!("Job {job_id} is now {status}");
    Ok(ExitCode::SUCCESS)
}

fn run_snapshot(session: &mut Session, job: &str) -> Result<ExitCode> {
    load(session);
    if let Some(error) = session.state().error() {
        bail!("{error}");
    }
    let job_id = session.resolve_job(job)?;
    let (path, preview) = session.write_snapshot(&job_id)?;
    println!("{}", render_snapshot(&path, &preview));
    Ok(ExitCode::SUCCESS)
}

/// Reads stdin lines on a separate thread; `None` marks end of input.
fn spawn_stdin_reader() -> Result<mpsc::Receiver<Option<String>>> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::Builder::new()
        .name("jobhub-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(Some(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        jobhub_warn!("Failed to read stdin: {}", err);
                        break;
                    }
                }
            }
            let _ = line_tx.send(None);
        })
        .context("failed to spawn the stdin reader")?;
    Ok(line_rx)
}

fn run_dashboard(session: &mut Session) -> Result<ExitCode> {
    let lines = spawn_stdin_reader()?;
    session.dispatch(Msg::ReloadRequested);
    println!("{}", input::HELP);

    loop {
        session.dispatch(Msg::Tick { now_ms: now_ms() });
        session.pump(POLL_INTERVAL);
        // Already logged by the effect runner.
        let _ = session.take_status_failures();

        if session.consume_dirty() {
            print!("{}", render_dashboard(&session.view()));
        }

        let line = match lines.try_recv() {
            Ok(Some(line)) => line,
            Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                session.settle();
                if session.consume_dirty() {
                    print!("{}", render_dashboard(&session.view()));
                }
                return Ok(ExitCode::SUCCESS);
            }
            Err(mpsc::TryRecvError::Empty) => continue,
        };

        match parse_command(&line) {
            Ok(Some(input::Command::Quit)) => {
                session.dispatch(Msg::Detached);
                return Ok(ExitCode::SUCCESS);
            }
            Ok(Some(command)) => {
                if let Err(err) = handle_command(session, command) {
                    println!("Error: {err:#}");
                }
            }
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
    }
}

fn handle_command(session: &mut Session, command: input::Command) -> Result<()> {
    match command {
        input::Command::Add(url) => session.dispatch(Msg::UrlSubmitted {
            url,
            now_ms: now_ms(),
        }),
        input::Command::Status { job, status: None } => {
            let job_id = session.resolve_job(&job)?;
            session.dispatch(Msg::StatusPillClicked { job_id });
        }
        input::Command::Status {
            job,
            status: Some(status),
        } => {
            let job_id = session.resolve_job(&job)?;
            session.dispatch(Msg::StatusChosen { job_id, status });
        }
        input::Command::Snapshot(job) => {
            let job_id = session.resolve_job(&job)?;
            let (path, preview) = session.write_snapshot(&job_id)?;
            println!("{}", render_snapshot(&path, &preview));
        }
        input::Command::Dismiss(row) => {
            let pending_id = session
                .state()
                .pending()
                .get(row - 1)
                .map(|pending| pending.id.clone())
                .ok_or_else(|| anyhow!("no pending submission {row}"))?;
            session.dispatch(Msg::PendingDismissed { pending_id });
        }
        input::Command::Reload => session.dispatch(Msg::ReloadRequested),
        input::Command::Show => print!("{}", render_dashboard(&session.view())),
        input::Command::Help => println!("{}", input::HELP),
        input::Command::Quit => session.dispatch(Msg::Detached),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobhub_core::JobRecord;

    fn session_with(api: DemoJobsApi, preview_dir: PathBuf) -> Session {
        let engine = EngineHandle::new(Arc::new(api)).unwrap();
        Session::new(AppState::new(), EffectRunner::new(engine), preview_dir)
    }

    fn demo_session() -> Session {
        session_with(DemoJobsApi::default(), PathBuf::from("snapshots"))
    }

    #[test]
    fn reload_settles_with_sample_jobs() {
        let mut session = demo_session();
        load(&mut session);
        assert!(!session.state().is_loading());
        assert_eq!(session.state().jobs().len(), 5);
        assert_eq!(session.view().average_score, Some(78));
    }

    #[test]
    fn jobs_resolve_by_id_or_row() {
        let mut session = session_with(
            DemoJobsApi::with_jobs(vec![JobRecord::new("a-17"), JobRecord::new("b-2")]),
            PathBuf::from("snapshots"),
        );
        load(&mut session);
        assert_eq!(session.resolve_job("b-2").unwrap(), "b-2");
        assert_eq!(session.resolve_job("1").unwrap(), "a-17");
        assert!(session.resolve_job("3").is_err());
        assert!(session.resolve_job("0").is_err());
    }

    #[test]
    fn submitted_url_becomes_a_job() {
        let mut session = demo_session();
        load(&mut session);
        session.dispatch(Msg::UrlSubmitted {
            url: "https://jobs.example.com/42".to_string(),
            now_ms: now_ms(),
        });
        assert_eq!(session.state().pending().len(), 1);
        session.settle();
        assert!(session.state().pending().is_empty());
        assert_eq!(session.state().jobs().len(), 6);
        assert!(session.state().error().is_none());
    }

    #[test]
    fn status_change_survives_reload() {
        let mut session = demo_session();
        load(&mut session);
        session.dispatch(Msg::StatusChosen {
            job_id: "2".to_string(),
            status: JobStatus::Offer,
        });
        session.settle();
        assert!(session.take_status_failures().is_empty());
        assert_eq!(session.state().find_job("2").unwrap().status, JobStatus::Offer);
    }

    #[test]
    fn snapshot_is_written_to_preview_dir() {
        let dir = tempfile::tempdir().unwrap();
        let job = JobRecord {
            company: "Initech".to_string(),
            snapshot: Some("<title>Role</title><p>Build things</p>".to_string()),
            ..JobRecord::new("7")
        };
        let preview_dir = dir.path().join("previews");
        let mut session = session_with(
            DemoJobsApi::with_jobs(vec![job, JobRecord::new("8")]),
            preview_dir.clone(),
        );
        load(&mut session);

        let (path, preview) = session.write_snapshot("7").unwrap();
        assert!(path.starts_with(&preview_dir));
        assert_eq!(preview.title.as_deref(), Some("Role"));
        assert!(std::fs::read_to_string(path).unwrap().contains("Build things"));
        assert!(session.write_snapshot("8").is_err());
    }
}
