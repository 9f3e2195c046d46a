use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{normalize::DedupScope, output::OutputType};

/// RuleList contains the information needed to build a single list
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleList {
    /// the hand-maintained list, normalized in place
    pub source: PathBuf,
    /// where the converted document is written to
    pub output: PathBuf,
    #[serde(default)]
    pub format: OutputType,
    /// remove duplicate entries while normalizing
    #[serde(default = "default_dedup")]
    pub dedup: bool,
    #[serde(default)]
    pub dedup_scope: DedupScope,
    /// abort the build when the list contains invalid entries
    #[serde(default)]
    pub strict: bool,
}

fn default_dedup() -> bool {
    true
}
