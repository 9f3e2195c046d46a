use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader, Lines},
};

use crate::{error::ListError, input::Input};

/// FileInput reads a list from a file
pub struct FileInput {
    /// path on the file system
    path: PathBuf,
    /// the line reader, opened on first use
    handle: Option<Lines<BufReader<File>>>,
}

impl FileInput {
    /// Creates new file input
    ///
    /// * `path`: path on the file system
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            handle: None,
        }
    }

    /// opens the file and wraps it into a line reader
    async fn init_handle(&mut self) -> Result<(), ListError> {
        let f = File::open(&self.path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ListError::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                ListError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        self.handle = Some(BufReader::new(f).lines());
        Ok(())
    }
}

#[async_trait]
impl Input for FileInput {
    async fn line(&mut self) -> Result<Option<String>, ListError> {
        if self.handle.is_none() {
            self.init_handle().await?;
        }
        let Some(handle) = self.handle.as_mut() else {
            return Ok(None);
        };
        handle.next_line().await.map_err(|source| ListError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read_lines;

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = FileInput::new(&dir.path().join("missing.list"));
        let err = input.line().await.unwrap_err();
        assert!(matches!(err, ListError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_reads_file_line_wise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.list");
        std::fs::write(&path, "# Ads\nads.example.com\n").unwrap();
        let mut input = FileInput::new(&path);
        let lines = read_lines(&mut input).await.unwrap();
        assert_eq!(lines, vec!["# Ads", "ads.example.com"]);
    }
}
