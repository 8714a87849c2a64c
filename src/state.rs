//! Application state management
//!
//! Central state for the application including:
//! - The active run (cancel flag) if any
//! - Summary of the last finished run
//! - Log pane contents
//! - App data directory for settings

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::DatasetError;
use crate::logbook::LogBook;
use crate::models::{ProcessingStatus, RunSummary};
use crate::processor::CancelFlag;

/// Main application state
pub struct AppState {
    /// Cancel flag of the run in progress, `None` when idle
    pub active_run: Mutex<Option<CancelFlag>>,

    /// Result of the most recent run
    pub last_summary: Mutex<Option<RunSummary>>,

    /// Lines shown in the log pane
    pub log: Mutex<LogBook>,

    /// App data directory path
    pub data_dir: Mutex<Option<PathBuf>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_run: Mutex::new(None),
            last_summary: Mutex::new(None),
            log: Mutex::new(LogBook::new()),
            data_dir: Mutex::new(None),
        }
    }
}

impl AppState {
    /// Get data directory path
    pub fn get_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.lock().ok()?.clone()
    }

    /// Set data directory path
    pub fn set_data_dir(&self, path: PathBuf) -> Result<(), String> {
        let mut dir = self.data_dir.lock().map_err(|e| e.to_string())?;
        *dir = Some(path);
        Ok(())
    }

    /// Register a new run. Fails if another one is still going.
    pub fn begin_run(&self) -> Result<CancelFlag, String> {
        let mut active = self.active_run.lock().map_err(|e| e.to_string())?;
        if active.is_some() {
            return Err(DatasetError::Busy.to_string());
        }
        let flag = CancelFlag::new();
        *active = Some(flag.clone());
        Ok(flag)
    }

    /// Mark the active run as done and remember its summary
    pub fn finish_run(&self, summary: Option<RunSummary>) {
        if let Ok(mut active) = self.active_run.lock() {
            *active = None;
        }
        if let Some(summary) = summary {
            if let Ok(mut last) = self.last_summary.lock() {
                *last = Some(summary);
            }
        }
    }

    /// Signal cancellation. Returns false when nothing is running.
    pub fn cancel_run(&self) -> bool {
        match self.active_run.lock() {
            Ok(active) => match active.as_ref() {
                Some(flag) => {
                    flag.cancel();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active_run
            .lock()
            .map(|active| active.is_some())
            .unwrap_or(false)
    }

    pub fn status(&self) -> ProcessingStatus {
        ProcessingStatus {
            running: self.is_running(),
            last_summary: self.last_summary.lock().ok().and_then(|s| s.clone()),
        }
    }
}
