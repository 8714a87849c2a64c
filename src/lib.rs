//! Source files to JSONL dataset builder
//!
//! Walks a folder for files with a given extension, decodes each one and
//! writes `{"file_path", "code"}` lines to a dataset file. The Tauri shell
//! runs that work on a background thread and streams progress to the UI.

use tauri::Manager;

pub mod commands;
pub mod dataset;
pub mod decoding;
pub mod error;
pub mod logbook;
pub mod models;
pub mod processor;
pub mod scanner;
pub mod settings;
pub mod state;
pub mod worker;

use commands::*;
use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::default().level(level).build())
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::default())
        .invoke_handler(tauri::generate_handler![
            start_processing,
            cancel_processing,
            get_status,
            count_source_files,
            get_log,
            clear_log,
            export_log,
            load_settings,
            save_settings
        ])
        .setup(|app| {
            match app.path().app_data_dir() {
                Ok(dir) => {
                    log::info!("App data directory: {}", dir.display());
                    app.state::<AppState>().set_data_dir(dir)?;
                }
                Err(e) => log::warn!("No app data directory, settings will not persist: {}", e),
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
