//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Configuration required to start a terminal session.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Case data directory. `None` plays the bundled sample case.
    pub data_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub save_dir: Option<PathBuf>,
    /// Mirror logs to stderr in addition to the session log file.
    pub log_to_stderr: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CASEBOOK_DATA_DIR` - Case data directory (default: bundled case)
    /// - `CASEBOOK_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `CASEBOOK_SAVE_DIR` - Directory for save slots (default: platform-specific)
    /// - `CASEBOOK_LOG_STDERR` - Also log to stderr (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            data_dir: env::var("CASEBOOK_DATA_DIR").ok().map(PathBuf::from),
            session_id: env::var("CASEBOOK_SESSION_ID").ok(),
            save_dir: env::var("CASEBOOK_SAVE_DIR").ok().map(PathBuf::from),
            log_to_stderr: false,
        };

        if let Some(enable) = read_env::<bool>("CASEBOOK_LOG_STDERR") {
            config.log_to_stderr = enable;
        } else if env::var("CASEBOOK_LOG_STDERR").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.log_to_stderr = true;
        }

        config
    }

    /// Save directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(default_save_dir)
    }
}

/// Platform-specific log directory, e.g. `~/.cache/casebook/logs` on Linux.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "casebook")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/casebook"))
        .join("logs")
}

/// Platform-specific save directory, e.g. `~/.local/share/casebook/saves` on Linux.
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "casebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("saves")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
