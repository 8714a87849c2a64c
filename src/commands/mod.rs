//! Tauri command handlers
//!
//! All Tauri commands exposed to the frontend are defined here.
//! Split into submodules by functionality.

mod logs;
mod preferences;
mod processing;

pub use logs::*;
pub use preferences::*;
pub use processing::*;
