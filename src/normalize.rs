use std::collections::{BTreeMap, HashSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    entry::{Line, LineKind, Malformed},
    validate::validate_entry,
};

/// DedupScope defines the range within which duplicate entries are detected
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DedupScope {
    /// an entry may appear once in the whole list
    #[default]
    List,
    /// an entry may appear once per comment-delimited group
    Group,
}

/// NormalizeOptions controls which transformations the normalizer applies
#[derive(Debug, Default, Clone)]
pub struct NormalizeOptions {
    pub dedup: bool,
    pub scope: DedupScope,
    /// retain entries that fail validation instead of dropping them
    pub keep_invalid: bool,
    pub strip_blank: bool,
    pub strip_comments: bool,
}

/// Issue is a line that was rejected by parsing or validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub line: usize,
    pub text: String,
    pub reason: String,
}

impl From<Malformed> for Issue {
    fn from(m: Malformed) -> Self {
        Self {
            line: m.number,
            text: m.raw.trim().to_string(),
            reason: m.reason,
        }
    }
}

/// Normalized is the outcome of a normalization pass
#[derive(Debug, Default)]
pub struct Normalized {
    pub lines: Vec<Line>,
    /// removed duplicates counted by dedup key
    pub duplicates: BTreeMap<String, usize>,
    pub invalid: Vec<Issue>,
}

impl Normalized {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.values().sum()
    }
}

/// Deduplicates and validates a parsed list. The relative order of all retained
/// lines is the order of the input.
///
/// Group scope needs the comment headers to survive, otherwise a second pass
/// would see one group and remove what the first pass kept. When comments are
/// stripped the whole list is one scope.
///
/// * `input`: parse results in file order
/// * `options`: the transformations to apply
pub fn normalize(
    input: impl IntoIterator<Item = Result<Line, Malformed>>,
    options: &NormalizeOptions,
) -> Normalized {
    let mut result = Normalized::default();
    let mut seen: HashSet<String> = HashSet::new();
    let group_scope = options.scope == DedupScope::Group && !options.strip_comments;
    if options.scope == DedupScope::Group && !group_scope {
        debug!("comments are stripped, deduplicating over the whole list");
    }

    for item in input {
        let line = match item {
            Ok(line) => line,
            Err(malformed) => {
                // unparseable lines never survive, the converter would reject them
                result.invalid.push(malformed.into());
                continue;
            }
        };
        match &line.kind {
            LineKind::Blank => {
                if options.strip_blank {
                    continue;
                }
            }
            LineKind::Comment(_) => {
                if group_scope {
                    seen.clear();
                }
                if options.strip_comments {
                    continue;
                }
            }
            LineKind::Entry(entry) => {
                if let Err(reason) = validate_entry(entry) {
                    result.invalid.push(Issue {
                        line: line.number,
                        text: line.raw.trim().to_string(),
                        reason: reason.to_string(),
                    });
                    if !options.keep_invalid {
                        continue;
                    }
                }
                if options.dedup {
                    let key = entry.key();
                    if seen.contains(&key) {
                        *result.duplicates.entry(key).or_insert(0) += 1;
                        continue;
                    }
                    seen.insert(key);
                }
            }
        }
        result.lines.push(line);
    }
    result
}
