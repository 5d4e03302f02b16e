use std::path::PathBuf;
use std::str::FromStr;

/// Tracker server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS (comma-separated in `CORS_ORIGINS`).
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after SIGINT/SIGTERM.
    pub shutdown_timeout_secs: u64,
    /// Root directory for uploaded attachments and log files.
    pub workspace_path: PathBuf,
    /// Largest accepted request body; bounds attachment uploads.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Read settings from the environment, falling back to local defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `WORKSPACE_PATH`        | `./workspace`           |
    /// | `MAX_UPLOAD_BYTES`      | `52428800` (50 MiB)     |
    ///
    /// Panics on unparsable numbers so a bad deployment fails at boot.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parsed_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parsed_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parsed_env("SHUTDOWN_TIMEOUT_SECS", 30),
            workspace_path: PathBuf::from(env_or("WORKSPACE_PATH", "./workspace")),
            max_upload_bytes: parsed_env("MAX_UPLOAD_BYTES", 50 * 1024 * 1024),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid number, got '{raw}': {e}")),
        Err(_) => default,
    }
}
