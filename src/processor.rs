//! A single dataset run: scan, read, write
//!
//! Runs synchronously on whatever thread calls it. Progress and log output go
//! through a `ProgressReporter` so the same code drives the Tauri worker and
//! the tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::dataset::{relative_path, DatasetWriter};
use crate::decoding::{read_source_file, DecodedText};
use crate::error::{DatasetError, Result};
use crate::models::{
    DatasetEntry, DatasetRequest, LogLevel, OutputMode, ProcessingProgress, RunOutcome,
    RunSummary,
};
use crate::scanner::{collect_source_files, normalize_extensions};

/// Receives everything a run wants to show the user
pub trait ProgressReporter {
    fn progress(&mut self, progress: ProcessingProgress);
    fn log(&mut self, level: LogLevel, message: String);
}

/// Shared cancellation switch between the UI and the worker
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl DatasetRequest {
    /// Check the form fields before anything touches the disk
    pub fn validate(&self) -> Result<()> {
        if self.root_dir.trim().is_empty() {
            return Err(DatasetError::Validation(
                "Please select a root directory.".to_string(),
            ));
        }
        if self.output_file.trim().is_empty() {
            return Err(DatasetError::Validation(
                "Please select an output file location.".to_string(),
            ));
        }
        normalize_extensions(&self.extension)?;

        let root = Path::new(self.root_dir.trim());
        if !root.is_dir() {
            return Err(DatasetError::Validation(format!(
                "Root directory does not exist or is not a folder: {}",
                root.display()
            )));
        }
        if Path::new(self.output_file.trim()).is_dir() {
            return Err(DatasetError::Validation(
                "Output location is a folder, please pick a file.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Execute one run to completion, cancellation or fatal error
pub fn run_dataset(
    request: &DatasetRequest,
    cancel: &CancelFlag,
    reporter: &mut impl ProgressReporter,
) -> Result<RunSummary> {
    let started = Instant::now();
    request.validate()?;

    let root = PathBuf::from(request.root_dir.trim());
    let output = PathBuf::from(request.output_file.trim());
    let extensions = normalize_extensions(&request.extension)?;

    reporter.progress(ProcessingProgress {
        current: 0,
        total: 0,
        filename: "Scanning for files...".to_string(),
        phase: "scanning".to_string(),
    });
    reporter.log(
        LogLevel::Info,
        format!(
            "Scanning {} for {} files",
            root.display(),
            extensions.join(", ")
        ),
    );

    let scan = collect_source_files(&root, &extensions, Some(&output))?;
    for error in &scan.errors {
        reporter.log(LogLevel::Warn, format!("Skipped unreadable entry: {}", error));
    }

    let total = scan.files.len();
    let mut summary = RunSummary {
        outcome: RunOutcome::Completed,
        mode: OutputMode::resolve(&output, request.overwrite),
        output_file: output.to_string_lossy().to_string(),
        total,
        written: 0,
        skipped: 0,
        elapsed_ms: 0,
    };

    if total == 0 {
        // Leave the output file alone when there is nothing to write
        summary.outcome = RunOutcome::NoFiles;
        summary.elapsed_ms = started.elapsed().as_millis() as u64;
        reporter.log(LogLevel::Warn, summary.message());
        return Ok(summary);
    }

    reporter.log(LogLevel::Info, format!("Found {} files to process", total));

    if cancel.is_cancelled() {
        // Cancelled before any file was read, so an overwrite must not truncate yet
        summary.outcome = RunOutcome::Cancelled;
        summary.elapsed_ms = started.elapsed().as_millis() as u64;
        reporter.log(LogLevel::Warn, "Cancelled by user".to_string());
        return Ok(summary);
    }

    let mut writer = DatasetWriter::open(&output, request.overwrite)?;
    summary.mode = writer.mode();
    if summary.mode == OutputMode::Append {
        reporter.log(
            LogLevel::Info,
            format!("Appending to existing file {}", output.display()),
        );
    }

    for (idx, file_path) in scan.files.iter().enumerate() {
        if cancel.is_cancelled() {
            summary.outcome = RunOutcome::Cancelled;
            reporter.log(LogLevel::Warn, "Cancelled by user".to_string());
            break;
        }

        let rel = relative_path(&root, file_path);

        match read_source_file(file_path) {
            Ok(decoded) => {
                if let Some((level, message)) = fallback_notice(&rel, &decoded) {
                    reporter.log(level, message);
                }

                writer.write_entry(&DatasetEntry {
                    file_path: rel.clone(),
                    code: decoded.text,
                })?;
                summary.written += 1;
            }
            Err(e) => {
                reporter.log(
                    LogLevel::Error,
                    format!("Error processing file {}: {}", file_path.display(), e),
                );
                summary.skipped += 1;
            }
        }

        reporter.progress(ProcessingProgress {
            current: idx + 1,
            total,
            filename: rel,
            phase: "processing".to_string(),
        });
    }

    writer.finish()?;

    summary.elapsed_ms = started.elapsed().as_millis() as u64;
    reporter.log(
        LogLevel::Info,
        format!(
            "{} written, {} skipped in {} ms",
            summary.written, summary.skipped, summary.elapsed_ms
        ),
    );
    if summary.outcome == RunOutcome::Completed {
        reporter.log(LogLevel::Info, summary.message().replace('\n', " "));
    }

    Ok(summary)
}

/// Log line for a file that needed encoding detection, `None` for plain UTF-8/BOM reads
fn fallback_notice(rel: &str, decoded: &DecodedText) -> Option<(LogLevel, String)> {
    if !decoded.fallback {
        return None;
    }
    let (level, suffix) = if decoded.confident {
        (LogLevel::Info, "")
    } else {
        (LogLevel::Warn, " (low confidence)")
    };
    Some((
        level,
        format!("{} is not UTF-8, decoded as {}{}", rel, decoded.encoding, suffix),
    ))
}
