//! Application constants
//!
//! Centralized location for reference values and configuration defaults.

use std::time::Duration;

/// Quiet period after the last file-change notification before reparsing
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(200);

/// Upper bound on the total duration of one dispatched request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Number of most recent lines kept for a streaming response
pub const STREAM_BUFFER_LINES: usize = 100;

/// Log file written next to the working directory
pub const LOG_FILE: &str = "reqfile.log";

/// UI poll interval for terminal input
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application name
pub const APP_NAME: &str = "reqfile";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
