use std::io::{self, ErrorKind};

use crate::document::Document;

/// grouped translates the document into a YAML mapping of group name to entries
pub fn yaml(document: &Document) -> io::Result<String> {
    serde_yaml::to_string(document).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
}

/// json translates the document into a pretty-printed JSON object
pub fn json(document: &Document) -> io::Result<String> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}
