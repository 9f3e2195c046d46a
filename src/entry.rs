use std::str::FromStr;

use crate::validate::RuleType;

/// lines starting with this character are comments and double as group headers
pub const COMMENT_MARKER: char = '#';

/// separates rule type, value and options of a Clash rule
const FIELD_SEPARATOR: char = ',';

/// Entry is a single domain pattern or rule as found on a list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// upper-cased rule type, None for bare domain patterns
    pub rule_type: Option<String>,
    /// the pattern itself or the rule's value
    pub value: String,
    /// trailing rule options such as `no-resolve`
    pub options: Vec<String>,
}

impl Entry {
    /// Parses the trimmed text of an entry line
    ///
    /// * `text`: the line content without surrounding whitespace
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.chars().any(char::is_control) {
            return Err("control character in entry".to_string());
        }
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.iter().any(|f| f.contains(char::is_whitespace)) {
            return Err("whitespace inside entry".to_string());
        }
        let entry = match fields.as_slice() {
            [pattern] => Entry {
                rule_type: None,
                value: pattern.to_lowercase(),
                options: vec![],
            },
            [rule_type, value, options @ ..] => {
                let rule_type = rule_type.to_ascii_uppercase();
                let is_domain = RuleType::from_str(&rule_type)
                    .map(|t| t.is_domain())
                    .unwrap_or(false);
                Entry {
                    rule_type: Some(rule_type),
                    value: if is_domain {
                        value.to_lowercase()
                    } else {
                        value.to_string()
                    },
                    options: options.iter().map(|o| o.to_string()).collect(),
                }
            }
            [] => return Err("empty entry".to_string()),
        };
        Ok(entry)
    }

    /// the form the entry is written back in
    pub fn canonical(&self) -> String {
        match &self.rule_type {
            None => self.value.clone(),
            Some(rule_type) => {
                let mut fields = vec![rule_type.as_str(), self.value.as_str()];
                fields.extend(self.options.iter().map(String::as_str));
                fields.join(",")
            }
        }
    }

    /// entries with equal keys are duplicates of each other
    pub fn key(&self) -> String {
        self.canonical().to_lowercase()
    }

    /// label used when counting entries by kind
    pub fn type_label(&self) -> &str {
        self.rule_type.as_deref().unwrap_or("PATTERN")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// comment text with the markers and surrounding whitespace removed
    Comment(String),
    Entry(Entry),
}

/// Line is one physical line of a list file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the source file
    pub number: usize,
    pub raw: String,
    pub kind: LineKind,
}

/// Malformed describes a line that fits neither the entry nor the comment grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    pub number: usize,
    pub raw: String,
    pub reason: String,
}

impl Line {
    pub fn parse(number: usize, raw: &str) -> Result<Self, Malformed> {
        let trimmed = raw.trim();
        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with(COMMENT_MARKER) {
            LineKind::Comment(trimmed.trim_start_matches(COMMENT_MARKER).trim().to_string())
        } else {
            let entry = Entry::parse(trimmed).map_err(|reason| Malformed {
                number,
                raw: raw.to_string(),
                reason,
            })?;
            LineKind::Entry(entry)
        };
        Ok(Self {
            number,
            raw: raw.to_string(),
            kind,
        })
    }

    /// the normalized text of this line
    pub fn render(&self) -> String {
        match &self.kind {
            LineKind::Blank => String::new(),
            LineKind::Comment(_) => self.raw.trim().to_string(),
            LineKind::Entry(entry) => entry.canonical(),
        }
    }

    pub fn entry(&self) -> Option<&Entry> {
        match &self.kind {
            LineKind::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// parses raw lines, numbering them from one
pub fn parse_lines(raw: &[String]) -> Vec<Result<Line, Malformed>> {
    raw.iter()
        .enumerate()
        .map(|(idx, l)| Line::parse(idx + 1, l))
        .collect()
}

/// joins lines into file contents with a trailing newline
pub fn render_lines(lines: &[Line]) -> String {
    let mut text = lines
        .iter()
        .map(Line::render)
        .collect::<Vec<String>>()
        .join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    text
}
