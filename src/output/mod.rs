use std::io;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{document::Document, entry::Line};

mod grouped;
mod payload;

/// OutputType represents a result format for the converted lists
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// YAML mapping from group name to its entries
    #[default]
    Grouped,
    /// the grouped mapping as JSON
    Json,
    /// Clash rule provider with a flat `payload` sequence
    Payload,
}

impl OutputType {
    /// Renders the parsed list in this format
    ///
    /// * `lines`: the parsed list, comments and blank lines included
    pub fn render(&self, lines: &[Line]) -> io::Result<String> {
        match self {
            OutputType::Grouped => grouped::yaml(&Document::from_lines(lines)),
            OutputType::Json => grouped::json(&Document::from_lines(lines)),
            OutputType::Payload => payload::payload(lines),
        }
    }
}
