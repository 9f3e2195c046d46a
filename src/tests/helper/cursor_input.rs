use async_trait::async_trait;
use std::io::{BufRead, BufReader, Cursor, Lines};

use crate::{error::ListError, input::Input};

/// CursorInput implements the Input trait on top of an in-memory string
#[derive(Debug)]
pub struct CursorInput {
    lines: Lines<BufReader<Cursor<String>>>,
}

impl CursorInput {
    pub fn new(input_data: &str) -> Self {
        let cursor = Cursor::new(input_data.to_owned());
        CursorInput {
            lines: BufReader::new(cursor).lines(),
        }
    }
}

#[async_trait]
impl Input for CursorInput {
    async fn line(&mut self) -> Result<Option<String>, ListError> {
        self.lines
            .next()
            .transpose()
            .map_err(|source| ListError::Read {
                path: "<cursor>".into(),
                source,
            })
    }
}
