use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::models::{LogLevel, LogLine};

/// Maximum number of log lines kept for the log pane
pub const MAX_LOG_LINES: usize = 5000;

/// Rolling log of the current run, backing the scrollable log pane
#[derive(Debug, Default)]
pub struct LogBook {
    lines: VecDeque<LogLine>,
}

impl LogBook {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(256),
        }
    }

    pub fn push(&mut self, line: LogLine) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_LOG_LINES {
            self.lines.pop_front();
        }
    }

    pub fn add(&mut self, level: LogLevel, message: impl Into<String>) {
        self.push(LogLine::new(level, message));
    }

    /// All lines, oldest first
    pub fn get_all(&self) -> Vec<LogLine> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Plain-text rendering used for export
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!(
                "[{}] {} {}\n",
                line.timestamp.format("%Y-%m-%d %H:%M:%S"),
                line.level.as_str(),
                line.message
            ));
        }
        out
    }

    /// Write the log to a text file, creating parent folders as needed
    pub fn export(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }
        fs::write(path, self.render()).map_err(|e| DatasetError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut book = LogBook::new();
        book.add(LogLevel::Info, "first");
        book.add(LogLevel::Error, "second");

        let lines = book.get_all();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].message, "first");
        assert_eq!(lines[1].level, LogLevel::Error);
    }

    #[test]
    fn test_max_lines() {
        let mut book = LogBook::new();
        for i in 0..MAX_LOG_LINES + 10 {
            book.add(LogLevel::Info, format!("line {}", i));
        }

        assert_eq!(book.len(), MAX_LOG_LINES);
        assert_eq!(book.get_all()[0].message, "line 10");
    }

    #[test]
    fn test_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/run.txt");
        let mut book = LogBook::new();
        book.add(LogLevel::Info, "Found 2 files to process");
        book.add(LogLevel::Warn, "Cancelled by user");

        book.export(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] INFO Found 2 files to process"));
        assert!(lines[1].ends_with("] WARN Cancelled by user"));
    }
}
