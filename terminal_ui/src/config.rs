use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::api::DEFAULT_API_URL;
use crate::store::ResponseOrdering;

#[derive(Parser, Debug, Clone)]
#[command(name = "taskdesk", version, about = "Terminal client for the task API")]
pub struct Config {
    /// Base URL of the task API
    #[arg(long, env = "TASKDESK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Per-request timeout; the HTTP client default applies when unset
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes (the terminal is busy drawing)
    #[arg(long, default_value = "taskdesk.log")]
    pub log_file: PathBuf,

    /// Apply every list response as it arrives, even one older than the
    /// latest request
    #[arg(long)]
    pub legacy_ordering: bool,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn ordering(&self) -> ResponseOrdering {
        if self.legacy_ordering {
            ResponseOrdering::LastResolvedWins
        } else {
            ResponseOrdering::LatestRequestWins
        }
    }
}
