use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use jobhub_client::{ApiConfig, ClientSettings, DEFAULT_DEV_PROXY_TARGET};
use jobhub_core::JobStatus;

use super::logging::{LogDestination, DEFAULT_LOG_FILE};

/// Track scraped job postings from the terminal
#[derive(Debug, Parser)]
#[command(name = "jobhub")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Interactive dashboard against a local backend
    jobhub --api-base-url http://localhost:8000/api/v1

    # Queue a posting for scraping and wait for it to show up
    jobhub add https://jobs.example.com/posting/42

    # Try the dashboard without a backend
    jobhub --demo
")]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Seconds before an unanswered submission is marked timed out (0 disables)
    #[arg(long, env = "JOBHUB_PENDING_TTL_SECS", default_value_t = 300, global = true)]
    pub pending_ttl_secs: u64,

    /// Directory snapshot previews are written to
    #[arg(long, env = "JOBHUB_PREVIEW_DIR", default_value = "snapshots", global = true)]
    pub preview_dir: PathBuf,

    /// Where log output goes
    #[arg(long, value_enum, env = "JOBHUB_LOG_TO", default_value = "file", global = true)]
    pub log_to: LogTarget,

    /// Log file used by `--log-to file|both`
    #[arg(long, env = "JOBHUB_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "JOBHUB_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Backend base URL, e.g. https://api.example.com/api/v1
    #[arg(long, env = "JOBHUB_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Full URL of the job list endpoint (overrides the base URL)
    #[arg(long, env = "JOBHUB_JOBS_API_URL", global = true)]
    pub jobs_api_url: Option<String>,

    /// Full URL of the scrape endpoint (overrides the base URL)
    #[arg(long, env = "JOBHUB_SCRAPE_API_URL", global = true)]
    pub scrape_api_url: Option<String>,

    /// Route all requests through the local development proxy
    #[arg(long, env = "JOBHUB_DEV", value_parser = BoolishValueParser::new(), global = true)]
    pub dev: bool,

    /// Upstream the development API prefix is forwarded to
    #[arg(long, env = "JOBHUB_DEV_PROXY_TARGET", default_value = DEFAULT_DEV_PROXY_TARGET, global = true)]
    pub dev_proxy_target: String,

    /// Use built-in sample jobs instead of a backend
    #[arg(long, env = "JOBHUB_DEMO", value_parser = BoolishValueParser::new(), global = true)]
    pub demo: bool,

    /// Seconds to wait for a TCP connection
    #[arg(long, env = "JOBHUB_CONNECT_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub connect_timeout_secs: u64,

    /// Seconds to wait for a whole request (unbounded when omitted)
    #[arg(long, env = "JOBHUB_REQUEST_TIMEOUT_SECS", global = true)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard (default)
    Dashboard,
    /// Print the tracked jobs and summary metrics
    List,
    /// Submit a posting URL for scraping
    Add {
        /// Job posting URL
        url: String,
    },
    /// Change the application status of a job
    SetStatus {
        /// Job id or row number
        job: String,
        /// New, Applied, Interview, Offer or Rejected
        status: JobStatus,
    },
    /// Write a job's captured page to an HTML file
    Snapshot {
        /// Job id or row number
        job: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match self.log_to {
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }

    pub fn pending_ttl(&self) -> Option<Duration> {
        (self.pending_ttl_secs > 0).then(|| Duration::from_secs(self.pending_ttl_secs))
    }
}

impl ApiArgs {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            jobs_url: self.jobs_api_url.clone(),
            scrape_url: self.scrape_api_url.clone(),
            base_url: self.api_base_url.clone(),
            dev_mode: self.dev,
            dev_proxy_target: self.dev_proxy_target.clone(),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
