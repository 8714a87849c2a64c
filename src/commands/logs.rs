use std::path::Path;
use tauri::State;

use crate::models::LogLine;
use crate::state::AppState;

/// Get every line currently in the log pane
#[tauri::command]
pub async fn get_log(state: State<'_, AppState>) -> Result<Vec<LogLine>, String> {
    let log = state.log.lock().map_err(|e| e.to_string())?;
    Ok(log.get_all())
}

/// Clear the log pane
#[tauri::command]
pub async fn clear_log(state: State<'_, AppState>) -> Result<(), String> {
    let mut log = state.log.lock().map_err(|e| e.to_string())?;
    log.clear();
    Ok(())
}

/// Save the log pane to a text file picked by the user
#[tauri::command]
pub async fn export_log(path: String, state: State<'_, AppState>) -> Result<usize, String> {
    if path.trim().is_empty() {
        return Err("Please choose where to save the log.".to_string());
    }

    let log = state.log.lock().map_err(|e| e.to_string())?;
    log.export(Path::new(path.trim()))
        .map_err(|e| e.to_string())?;

    log::info!("Exported {} log lines to {}", log.len(), path);
    Ok(log.len())
}
