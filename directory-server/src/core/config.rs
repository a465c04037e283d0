//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Database and log files |
//! | HTTP_PORT | 8000 | HTTP API port |
//! | LOG_LEVEL | info | tracing level filter |
//! | ENVIRONMENT | development | development \| staging \| production |

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level filter
    pub log_level: String,
    /// Runtime environment name
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
