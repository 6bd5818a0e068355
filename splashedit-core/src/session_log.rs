//! Per-run log handle
//!
//! Appends to a daily file `log/<yyyyMMdd>.log` under the working directory
//! and forwards every message to the `log` facade, so the console logger
//! (when the binary installs one) shows the same lines.

use anyhow::{Context, Result};
use log::Level;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Log sink owned by one editor run
#[derive(Clone)]
pub struct SessionLog {
    log_file: Arc<Mutex<Option<File>>>,
    log_path: Option<PathBuf>,
}

impl SessionLog {
    /// Opens (or creates) today's log file inside `log_dir`
    pub fn open(log_dir: &Path) -> Result<Self> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let log_path = log_dir.join(Self::file_name_for(chrono::Local::now().date_naive()));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        Ok(Self {
            log_file: Arc::new(Mutex::new(Some(file))),
            log_path: Some(log_path),
        })
    }

    /// Handle that only forwards to the `log` facade
    pub fn discard() -> Self {
        Self {
            log_file: Arc::new(Mutex::new(None)),
            log_path: None,
        }
    }

    /// Daily log file name, e.g. `20241031.log`
    pub fn file_name_for(date: chrono::NaiveDate) -> String {
        format!("{}.log", date.format("%Y%m%d"))
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn debug(&self, message: &str) {
        self.log_message(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log_message(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log_message(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log_message(Level::Error, message);
    }

    fn log_message(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);

        let timestamp = chrono::Local::now().format("%H:%M:%S");
        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(ref mut file) = *file_opt {
                let _ = writeln!(file, "[{}] [{}] {}", timestamp, level, message);
                let _ = file.flush();
            }
        }
    }
}
