//! JSONL dataset output
//!
//! One `DatasetEntry` per line, written through a buffered file handle that is
//! either truncated or appended to depending on the overwrite toggle.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{DatasetError, Result};
use crate::models::{DatasetEntry, OutputMode};

impl OutputMode {
    /// Append only when the file is already there and overwrite is off
    pub fn resolve(path: &Path, overwrite: bool) -> Self {
        if path.exists() && !overwrite {
            OutputMode::Append
        } else {
            OutputMode::Create
        }
    }
}

pub struct DatasetWriter {
    path: PathBuf,
    mode: OutputMode,
    out: BufWriter<File>,
    written: usize,
}

impl DatasetWriter {
    pub fn open(path: &Path, overwrite: bool) -> Result<Self> {
        let mode = OutputMode::resolve(path, overwrite);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }

        let file = match mode {
            OutputMode::Append => OpenOptions::new().append(true).open(path),
            OutputMode::Create => File::create(path),
        }
        .map_err(|e| DatasetError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            mode,
            out: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn write_entry(&mut self, entry: &DatasetEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.out, "{}", json).map_err(|e| DatasetError::io(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Flush buffered lines and return how many entries this writer produced
    pub fn finish(mut self) -> Result<usize> {
        self.out
            .flush()
            .map_err(|e| DatasetError::io(&self.path, e))?;
        Ok(self.written)
    }
}

/// Path of `file` relative to `root`, always with `/` separators
pub fn relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, code: &str) -> DatasetEntry {
        DatasetEntry {
            file_path: path.to_string(),
            code: code.to_string(),
        }
    }

    fn read_lines(path: &Path) -> Vec<DatasetEntry> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_create_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.jsonl");

        let mut writer = DatasetWriter::open(&out, false).unwrap();
        assert_eq!(writer.mode(), OutputMode::Create);
        writer.write_entry(&entry("a.py", "x = 1\n")).unwrap();
        assert_eq!(writer.finish().unwrap(), 1);

        let mut writer = DatasetWriter::open(&out, false).unwrap();
        assert_eq!(writer.mode(), OutputMode::Append);
        writer.write_entry(&entry("b.py", "y = \"2\"\n")).unwrap();
        writer.finish().unwrap();

        let lines = read_lines(&out);
        assert_eq!(lines, vec![entry("a.py", "x = 1\n"), entry("b.py", "y = \"2\"\n")]);
    }

    #[test]
    fn test_overwrite_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.jsonl");
        fs::write(&out, "old line\n").unwrap();

        let mut writer = DatasetWriter::open(&out, true).unwrap();
        assert_eq!(writer.mode(), OutputMode::Create);
        writer.write_entry(&entry("a.py", "")).unwrap();
        writer.finish().unwrap();

        assert_eq!(read_lines(&out), vec![entry("a.py", "")]);
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/deeper/data.jsonl");
        DatasetWriter::open(&out, false).unwrap().finish().unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_multiline_code_stays_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.jsonl");
        let mut writer = DatasetWriter::open(&out, false).unwrap();
        writer
            .write_entry(&entry("m.py", "def f():\n\treturn 1\n"))
            .unwrap();
        writer.finish().unwrap();

        let raw = fs::read_to_string(&out).unwrap();
        assert_eq!(raw.lines().count(), 1);
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/pkg/mod.py")), "pkg/mod.py");
        assert_eq!(relative_path(root, Path::new("/repo/top.py")), "top.py");
    }
}
