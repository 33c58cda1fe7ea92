use std::path::{Path, PathBuf};
use std::time::Duration;

use authority_register::config::{DB_FILE_NAME, REPORT_FILE_NAME};
use authority_register_persistence::store::DEFAULT_BUSY_TIMEOUT;
use authority_register_persistence::StoreConfig;

use crate::dispatch::Cli;

pub const DB_ENV: &str = "AUTHORITY_REGISTER_DB";
pub const REPORT_ENV: &str = "AUTHORITY_REGISTER_REPORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterConfig {
    pub db_path: PathBuf,
    pub report_path: PathBuf,
    pub busy_timeout: Duration,
}

impl RegisterConfig {
    /// Database and report side by side in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE_NAME),
            report_path: dir.join(REPORT_FILE_NAME),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Flags first, then environment, then files next to the executable.
    pub fn resolve(cli: &Cli) -> Self {
        Self::resolve_with(cli, |key| std::env::var_os(key).map(PathBuf::from), &exe_dir())
    }

    pub fn resolve_with(
        cli: &Cli,
        env: impl Fn(&str) -> Option<PathBuf>,
        default_dir: &Path,
    ) -> Self {
        let mut cfg = Self::in_dir(default_dir);
        if let Some(path) = cli.db.clone().or_else(|| env(DB_ENV)) {
            cfg.db_path = path;
        }
        if let Some(path) = cli.report.clone().or_else(|| env(REPORT_ENV)) {
            cfg.report_path = path;
        }
        if let Some(ms) = cli.busy_timeout_ms {
            cfg.busy_timeout = Duration::from_millis(ms);
        }
        cfg
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.db_path.clone(),
            busy_timeout: self.busy_timeout,
        }
    }
}

/// Directory of the running executable, so every client on the network share
/// finds the same database. Falls back to the working directory.
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
