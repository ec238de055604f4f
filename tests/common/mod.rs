#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the path a file named `name` would have in this workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Splits one rendered table line into trimmed cells. Columns are separated
/// by runs of two or more spaces; single spaces stay inside a cell.
pub fn parse_table_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut space_run = 0usize;

    for ch in line.chars() {
        if ch == ' ' {
            space_run += 1;
            continue;
        }

        if space_run >= 2 {
            if !current.trim().is_empty() {
                cells.push(current.trim().to_string());
            }
            current.clear();
        } else if space_run == 1 && !current.is_empty() {
            current.push(' ');
        }

        space_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}
