use std::collections::BTreeMap;

use crate::entry::{Line, LineKind};

/// Statistics summarizes the composition of a list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comments: usize,
    pub entries: usize,
    /// lines that could not be parsed at all
    pub malformed: usize,
    /// entry counts keyed by rule type, bare patterns under `PATTERN`
    pub by_type: BTreeMap<String, usize>,
}

impl Statistics {
    /// counts parsed lines
    ///
    /// * `lines`: the lines to inspect
    /// * `malformed`: number of lines which failed to parse and are not part of `lines`
    pub fn collect<'a>(lines: impl IntoIterator<Item = &'a Line>, malformed: usize) -> Self {
        let mut stats = Statistics {
            malformed,
            total_lines: malformed,
            ..Default::default()
        };
        for line in lines {
            stats.total_lines += 1;
            match &line.kind {
                LineKind::Blank => stats.blank_lines += 1,
                LineKind::Comment(_) => stats.comments += 1,
                LineKind::Entry(entry) => {
                    stats.entries += 1;
                    *stats
                        .by_type
                        .entry(entry.type_label().to_string())
                        .or_insert(0) += 1;
                }
            }
        }
        stats
    }
}
