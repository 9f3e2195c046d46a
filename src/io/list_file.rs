use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{
    error::ListError,
    input::{file::FileInput, read_lines},
};

/// ListFile bundles the file system operations performed on a single list or
/// output file
#[derive(Debug, Clone)]
pub struct ListFile {
    path: PathBuf,
}

impl ListFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// reads all lines of the file
    pub async fn read(&self) -> Result<Vec<String>, ListError> {
        let mut input = FileInput::new(&self.path);
        read_lines(&mut input).await
    }

    /// returns the current contents or None if the file does not exist yet
    pub async fn contents(&self) -> Option<String> {
        fs::read_to_string(&self.path).await.ok()
    }

    /// Replaces the file contents. The data goes to a sibling temp file first which
    /// is then renamed over the target, so readers never observe a partial file.
    /// An existing target keeps its permissions.
    ///
    /// * `contents`: the complete new file contents
    pub async fn write_atomic(&self, contents: &str) -> Result<(), ListError> {
        let tmp_path = self.sibling(".tmp");
        let result: std::io::Result<()> = async {
            fs::write(&tmp_path, contents).await?;
            if let Ok(metadata) = fs::metadata(&self.path).await {
                fs::set_permissions(&tmp_path, metadata.permissions()).await?;
            }
            fs::rename(&tmp_path, &self.path).await
        }
        .await;
        if let Err(source) = result {
            // the temp file may not exist if the write itself failed
            fs::remove_file(&tmp_path).await.ok();
            return Err(ListError::Write {
                path: self.path.clone(),
                source,
            });
        }
        debug!("wrote {}", self.path.display());
        Ok(())
    }

    /// Copies the current file to `<name>.bak` and returns the backup path
    pub async fn backup(&self) -> Result<PathBuf, ListError> {
        let backup_path = self.sibling(".bak");
        fs::copy(&self.path, &backup_path)
            .await
            .map_err(|source| ListError::Write {
                path: backup_path.clone(),
                source,
            })?;
        Ok(backup_path)
    }

    /// creates the parent directories of the file
    pub async fn create_parent_dir(&self) -> Result<(), ListError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|source| ListError::Write {
                    path: self.path.clone(),
                    source,
                }),
            _ => Ok(()),
        }
    }

    /// path next to the file with the suffix appended to the file name
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
