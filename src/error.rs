use std::path::PathBuf;

use thiserror::Error;

/// ListError covers every failure a pipeline step can end with
#[derive(Debug, Error)]
pub enum ListError {
    /// the list file to read does not exist
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// entries failed validation while strict mode was active
    #[error("strict mode: {count} invalid entries in {}", .path.display())]
    Validation { path: PathBuf, count: usize },

    /// a line does not fit the entry-or-comment grammar
    #[error("{}:{line}: {reason}: {text}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
        reason: String,
    },

    /// the list file exists but could not be read
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// the result could not be written to its destination
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ListError {
    /// process exit status reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ListError::FileNotFound { .. } => 2,
            ListError::Validation { .. } => 3,
            ListError::Parse { .. } => 4,
            ListError::Write { .. } => 5,
            ListError::Read { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = ListError::Validation {
            path: PathBuf::from("a.list"),
            count: 3,
        };
        assert_eq!(err.to_string(), "strict mode: 3 invalid entries in a.list");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_parse_error_points_at_line() {
        let err = ListError::Parse {
            path: PathBuf::from("rules/proxy.list"),
            line: 7,
            text: "not a domain".to_string(),
            reason: "whitespace inside entry".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rules/proxy.list:7: whitespace inside entry: not a domain"
        );
        assert_eq!(err.exit_code(), 4);
    }
}
