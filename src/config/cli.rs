//! Command-line arguments - the knobs that vary per run.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::domain::RetryPolicy;

/// Registers favorite courses the instant the registration window opens.
#[derive(Debug, Clone, Parser)]
#[command(name = "course-sniper", version, about)]
pub struct CliArgs {
    /// Delay in seconds between registration attempts
    #[arg(short = 'd', long = "delay", default_value_t = 5)]
    pub delay_secs: u64,

    /// Maximum number of registration retries per course
    #[arg(short = 'r', long = "retries", default_value_t = 5)]
    pub max_retries: u32,

    /// Keep retrying indefinitely until successful
    #[arg(short = 'i', long = "infinite")]
    pub infinite: bool,

    /// Wait for the announced registration instant before dispatching
    #[arg(long = "on-time")]
    pub on_time: bool,

    /// Offset in milliseconds before the first registration request
    #[arg(short = 'o', long = "offset", default_value_t = 300)]
    pub offset_ms: u64,

    /// Path to the credentials file
    #[arg(long = "config", default_value = "config.json")]
    pub config_path: PathBuf,
}

impl CliArgs {
    /// Retry policy implied by the flags.
    pub fn retry_policy(&self) -> RetryPolicy {
        let delay = Duration::from_secs(self.delay_secs);
        if self.infinite {
            RetryPolicy::unbounded(delay)
        } else {
            RetryPolicy::bounded(self.max_retries, delay)
        }
    }

    /// Start-of-window offset compensating client/server clock skew.
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}
