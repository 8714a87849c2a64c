use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the output dataset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub file_path: String,
    pub code: String,
}

/// Parameters for a single run, as submitted by the frontend
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRequest {
    pub root_dir: String,
    pub output_file: String,
    pub extension: String,
    #[serde(default)]
    pub overwrite: bool,
}

/// Progress event payload for frontend during processing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingProgress {
    pub current: usize,
    pub total: usize,
    pub filename: String,
    pub phase: String, // "scanning", "processing", "finished"
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// A single entry of the in-app log pane
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }
}

/// How the output file was opened
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Create,
    Append,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    Completed,
    Cancelled,
    NoFiles,
}

/// Result of a finished run, sent with the `dataset-finished` event
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub mode: OutputMode,
    pub output_file: String,
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Human readable completion message for the status line / dialog
    pub fn message(&self) -> String {
        match self.outcome {
            RunOutcome::NoFiles => {
                "No matching files were found in the selected directory.".to_string()
            }
            RunOutcome::Cancelled => format!(
                "Processing cancelled after {} of {} files.\nOutput file: {}",
                self.written + self.skipped,
                self.total,
                self.output_file
            ),
            RunOutcome::Completed => {
                let verb = match self.mode {
                    OutputMode::Create => "created",
                    OutputMode::Append => "appended",
                };
                format!(
                    "Dataset {} successfully.\nOutput file: {}",
                    verb, self.output_file
                )
            }
        }
    }
}

/// Snapshot returned by `get_status`
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    pub running: bool,
    pub last_summary: Option<RunSummary>,
}
