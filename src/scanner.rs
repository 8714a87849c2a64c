//! Source file discovery
//!
//! Walks a root folder depth-first and keeps every regular file whose name
//! ends with one of the requested extensions.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DatasetError, Result};

/// Files found by a scan plus the entries that could not be read
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Turn user input like `py`, `.py`, `*.py` or `py, pyi` into `.`-prefixed suffixes
pub fn normalize_extensions(raw: &str) -> Result<Vec<String>> {
    let mut extensions: Vec<String> = Vec::new();

    for part in raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        let trimmed = part.trim().trim_start_matches('*').trim_start_matches('.');
        if trimmed.is_empty() {
            continue;
        }
        let ext = format!(".{}", trimmed);
        if !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }

    if extensions.is_empty() {
        return Err(DatasetError::Validation(
            "Please enter a file extension (for example: py).".to_string(),
        ));
    }

    Ok(extensions)
}

/// Suffix match against the file name. Case-sensitive, so `.py` does not pick up `.PY`.
pub fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| file_name.ends_with(ext.as_str()))
}

/// Collect matching files under `root` in a stable, name-sorted order.
///
/// `exclude` is skipped even if it matches; it is used for the output file so a
/// run never feeds its own dataset back into itself.
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    exclude: Option<&Path>,
) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(DatasetError::Validation(format!(
            "Root directory does not exist or is not a folder: {}",
            root.display()
        )));
    }

    let excluded = exclude.and_then(|p| p.canonicalize().ok());
    let mut result = ScanResult::default();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable subfolders are skipped, the rest of the walk continues
                result.errors.push(DatasetError::from(e).to_string());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !matches_extension(&file_name, extensions) {
            continue;
        }

        if let Some(excluded) = &excluded {
            if entry.file_name() == excluded.file_name().unwrap_or_default()
                && entry.path().canonicalize().ok().as_ref() == Some(excluded)
            {
                continue;
            }
        }

        result.files.push(entry.into_path());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn test_normalize_extensions() {
        assert_eq!(normalize_extensions("py").unwrap(), vec![".py"]);
        assert_eq!(normalize_extensions("*.rs").unwrap(), vec![".rs"]);
        assert_eq!(
            normalize_extensions(".py, pyi py").unwrap(),
            vec![".py", ".pyi"]
        );
        assert!(normalize_extensions("  , ").is_err());
    }

    #[test]
    fn test_matches_extension() {
        let exts = vec![".py".to_string(), ".tar.gz".to_string()];
        assert!(matches_extension("main.py", &exts));
        assert!(matches_extension("dump.tar.gz", &exts));
        assert!(!matches_extension("main.pyc", &exts));
        assert!(!matches_extension("MAIN.PY", &exts));
        assert!(matches_extension(".py", &exts));

        let dotfiles = normalize_extensions("env").unwrap();
        assert!(matches_extension(".env", &dotfiles));
    }

    #[test]
    fn test_collect_walks_recursively_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.py"));
        touch(&root.join("a.py"));
        touch(&root.join("pkg/sub/c.py"));
        touch(&root.join("pkg/readme.md"));

        let exts = normalize_extensions("py").unwrap();
        let result = collect_source_files(root, &exts, None).unwrap();
        let names: Vec<String> = result
            .files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a.py", "b.py", "pkg/sub/c.py"]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_collect_skips_excluded_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("data.jsonl"));
        touch(&root.join("other.jsonl"));

        let exts = normalize_extensions("jsonl").unwrap();
        let output = root.join("data.jsonl");
        let result = collect_source_files(root, &exts, Some(&output)).unwrap();

        assert_eq!(result.files, vec![root.join("other.jsonl")]);
    }

    #[test]
    fn test_collect_missing_root() {
        let exts = normalize_extensions("py").unwrap();
        let result = collect_source_files(Path::new("/nonexistent/folder"), &exts, None);
        assert!(matches!(result, Err(DatasetError::Validation(_))));
    }
}
