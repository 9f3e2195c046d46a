use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// ListFixture keeps list files for a test in a throw-away directory
#[derive(Debug)]
pub struct ListFixture {
    dir: TempDir,
}

impl ListFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// writes the given lines, newline terminated, and returns the file path
    pub fn write_list(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.path(name);
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }
}
