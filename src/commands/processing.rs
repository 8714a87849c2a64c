use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::thread;
use tauri::{AppHandle, Emitter, Manager, State};

use crate::models::{DatasetRequest, LogLine, ProcessingProgress, ProcessingStatus, RunSummary};
use crate::scanner::{collect_source_files, normalize_extensions};
use crate::state::AppState;
use crate::worker::{relay_until_done, spawn_worker, RelaySink, POLL_INTERVAL};

/// Payload of the `dataset-finished` event
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FinishedPayload {
    pub success: bool,
    pub message: String,
    pub summary: Option<RunSummary>,
}

/// Forwards relay batches to the webview and the shared state
struct EventRelay {
    app: AppHandle,
}

impl RelaySink for EventRelay {
    fn on_logs(&self, lines: &[LogLine]) {
        if let Ok(mut log) = self.app.state::<AppState>().log.lock() {
            for line in lines {
                log.push(line.clone());
            }
        }
        let _ = self.app.emit("dataset-log", lines);
    }

    fn on_progress(&self, progress: &ProcessingProgress) {
        let _ = self.app.emit("dataset-progress", progress);
    }

    fn on_finished(&self, result: &Result<RunSummary, String>) {
        let state = self.app.state::<AppState>();
        state.finish_run(result.as_ref().ok().cloned());

        let payload = match result {
            Ok(summary) => FinishedPayload {
                success: true,
                message: summary.message(),
                summary: Some(summary.clone()),
            },
            Err(error) => FinishedPayload {
                success: false,
                message: error.clone(),
                summary: None,
            },
        };
        let _ = self.app.emit("dataset-finished", payload);
    }
}

/// Validate the form and start a run in the background.
///
/// Returns as soon as the worker is started; progress, log lines and the final
/// result arrive as `dataset-progress`, `dataset-log` and `dataset-finished` events.
#[tauri::command]
pub async fn start_processing(
    request: DatasetRequest,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<(), String> {
    request.validate().map_err(|e| e.to_string())?;

    let cancel = state.begin_run()?;
    if let Ok(mut log) = state.log.lock() {
        log.clear();
    }

    log::info!(
        "Starting dataset run: {} -> {} (overwrite: {})",
        request.root_dir,
        request.output_file,
        request.overwrite
    );

    let (tx, rx) = channel();

    // Relay goes first so a failed worker spawn still ends the run via disconnect
    let relay = EventRelay { app: app.clone() };
    if let Err(e) = thread::Builder::new()
        .name("dataset-relay".to_string())
        .spawn(move || {
            let _ = relay_until_done(rx, POLL_INTERVAL, &relay);
        })
    {
        state.finish_run(None);
        return Err(format!("Failed to start relay thread: {}", e));
    }

    spawn_worker(request, cancel, tx)
        .map(|_| ())
        .map_err(|e| format!("Failed to start worker thread: {}", e))
}

/// Ask the running worker to stop after the current file
#[tauri::command]
pub async fn cancel_processing(state: State<'_, AppState>) -> Result<bool, String> {
    let cancelled = state.cancel_run();
    if cancelled {
        log::info!("Cancellation requested");
    }
    Ok(cancelled)
}

/// Whether a run is active plus the last summary
#[tauri::command]
pub async fn get_status(state: State<'_, AppState>) -> Result<ProcessingStatus, String> {
    Ok(state.status())
}

/// Count matching files without reading them, for the form preview.
///
/// Uses the same exclusion as a run, so the output file is never counted.
#[tauri::command]
pub async fn count_source_files(
    root_dir: String,
    extension: String,
    output_file: Option<String>,
) -> Result<usize, String> {
    let extensions = normalize_extensions(&extension).map_err(|e| e.to_string())?;

    tauri::async_runtime::spawn_blocking(move || {
        let output = output_file
            .map(|p| PathBuf::from(p.trim()))
            .filter(|p| !p.as_os_str().is_empty());
        collect_source_files(Path::new(root_dir.trim()), &extensions, output.as_deref())
            .map(|scan| scan.files.len())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}
