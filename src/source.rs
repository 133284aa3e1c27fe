// src/source.rs
// =============================================================================
// Where the catalog lines come from.
//
// - read_lines: reads a file and returns its trimmed, non-empty lines
// - default_input_path: finds README.md when no --file is given
// =============================================================================

use crate::error::{CheckerError, Result};
use std::path::{Path, PathBuf};

// Reads a file into trimmed lines, dropping blank ones
//
// This is the shape the parser expects.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// The README.md in the parent of the working directory, if there is one
//
// The checker usually lives in a tools/ folder of the catalog repo.
pub fn default_input_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    readme_next_to(&cwd)
}

fn readme_next_to(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.parent()?.join("README.md");
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_lines_trims_and_filters() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "### Animals\n\n   | H |  \n\t\n|---|\n").unwrap();

        let lines = read_lines(file.path()).unwrap();

        assert_eq!(lines, vec!["### Animals", "| H |", "|---|"]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_lines(&dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, CheckerError::ReadInput { .. }));
    }

    #[test]
    fn test_readme_next_to() {
        let root = TempDir::new().unwrap();
        let tools = root.path().join("tools");
        std::fs::create_dir(&tools).unwrap();

        assert_eq!(readme_next_to(&tools), None);

        std::fs::write(root.path().join("README.md"), "# APIs").unwrap();
        assert_eq!(readme_next_to(&tools), Some(root.path().join("README.md")));
    }
}
