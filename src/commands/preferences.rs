use tauri::State;

use crate::settings::{self, Settings};
use crate::state::AppState;

/// Load the last used form values
#[tauri::command]
pub async fn load_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    Ok(state
        .get_data_dir()
        .map(|dir| settings::load_settings(&dir))
        .unwrap_or_default())
}

/// Remember the form values for next launch
#[tauri::command]
pub async fn save_settings(settings: Settings, state: State<'_, AppState>) -> Result<(), String> {
    let dir = state
        .get_data_dir()
        .ok_or_else(|| "App data directory is not available".to_string())?;
    settings::save_settings(&dir, &settings).map_err(|e| e.to_string())
}
