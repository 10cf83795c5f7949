//! Runtime configuration
//!
//! Built once at startup from the command line and the defaults in
//! [`crate::constants`]. Tests construct it directly with shorter delays.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{
    APP_NAME, DEBOUNCE_DELAY, LOG_FILE, REQUEST_TIMEOUT, STREAM_BUFFER_LINES,
};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about = "Browse and send the requests in a .http file")]
pub struct Cli {
    /// Path to the .http file to load and watch
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    pub request_timeout: Duration,
    pub debounce: Duration,
    pub stream_buffer_lines: usize,
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Config {
            file: file.into(),
            request_timeout: REQUEST_TIMEOUT,
            debounce: DEBOUNCE_DELAY,
            stream_buffer_lines: STREAM_BUFFER_LINES,
            log_file: PathBuf::from(LOG_FILE),
        }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self::new(cli.file)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = Config::new("api.http");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.debounce, Duration::from_millis(200));
        assert_eq!(config.stream_buffer_lines, 100);
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["reqfile"]).is_err());
        let cli = Cli::try_parse_from(["reqfile", "requests.http"]).unwrap();
        assert_eq!(Config::from_cli(cli).file, PathBuf::from("requests.http"));
    }
}
