//! API configuration.

use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Shared API secret required on `/segment`
    pub api_key: Option<String>,
    /// Root directory for per-request scratch workspaces
    pub work_dir: String,
    /// FFmpeg invocation timeout
    pub segment_timeout: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Age bound after which orphaned workspaces are swept
    pub workspace_max_age: Duration,
    /// Interval between housekeeping sweeps
    pub sweep_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_key: None,
            work_dir: "/tmp/vsplit".to_string(),
            segment_timeout: Duration::from_secs(900),
            max_body_size: 50 * 1024 * 1024, // 50MB
            workspace_max_age: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(600),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            api_key: std::env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/tmp/vsplit".to_string()),
            segment_timeout: Duration::from_secs(
                std::env::var("SEGMENT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(900),
            ),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50 * 1024 * 1024),
            workspace_max_age: Duration::from_secs(
                std::env::var("WORKSPACE_MAX_AGE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            sweep_interval: Duration::from_secs(
                std::env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
        }
    }
}
