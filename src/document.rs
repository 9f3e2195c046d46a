use std::collections::{HashMap, HashSet};

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::entry::{Line, LineKind};

/// group receiving the entries that precede the first header, a `# default`
/// header continues it like any other repeated header
pub const DEFAULT_GROUP: &str = "default";

/// Group is a named section of the structured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<String>,
}

/// Document is the structured form of a list: entries grouped under the comment
/// headers they follow, groups and entries in order of first appearance
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    pub groups: Vec<Group>,
}

impl Document {
    /// Builds the document from parsed list lines.
    ///
    /// The first non-empty comment of a run of comment lines names the group for
    /// the entries below it. Later comments in the same run are annotations.
    /// Blank lines and entries end a run but not the group.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<(usize, String)> = HashSet::new();
        let mut current = DEFAULT_GROUP.to_string();
        let mut in_comment_run = false;

        for line in lines {
            match &line.kind {
                LineKind::Comment(text) if text.is_empty() => {}
                LineKind::Comment(text) => {
                    if !in_comment_run {
                        current = text.clone();
                    }
                    in_comment_run = true;
                }
                LineKind::Blank => in_comment_run = false,
                LineKind::Entry(entry) => {
                    in_comment_run = false;
                    let idx = *index.entry(current.clone()).or_insert_with(|| {
                        groups.push(Group {
                            name: current.clone(),
                            entries: vec![],
                        });
                        groups.len() - 1
                    });
                    if !seen.insert((idx, entry.key())) {
                        debug!("skipping repeated entry {} in group {}", entry.canonical(), current);
                        continue;
                    }
                    groups[idx].entries.push(entry.canonical());
                }
            }
        }
        Self { groups }
    }

    #[cfg(test)]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// number of entries over all groups
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in self.groups.iter() {
            map.serialize_entry(&group.name, &group.entries)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_lines;

    fn document(raw: &[&str]) -> Document {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        let lines: Vec<Line> = parse_lines(&raw).into_iter().map(Result::unwrap).collect();
        Document::from_lines(&lines)
    }

    #[test]
    fn test_groups_follow_headers() {
        let doc = document(&["# Ads", "ads.example.com", "# Trackers", "tracker.example.org"]);
        assert_eq!(
            doc.groups,
            vec![
                Group {
                    name: "Ads".to_string(),
                    entries: vec!["ads.example.com".to_string()]
                },
                Group {
                    name: "Trackers".to_string(),
                    entries: vec!["tracker.example.org".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_entries_without_header_go_to_default_group() {
        let doc = document(&["first.example.com", "", "# Ads", "ads.example.com"]);
        assert_eq!(doc.groups[0].name, DEFAULT_GROUP);
        assert_eq!(doc.groups[0].entries, vec!["first.example.com"]);
        assert_eq!(doc.groups[1].name, "Ads");
    }

    #[test]
    fn test_default_header_continues_default_group() {
        let doc = document(&["x.example.com", "# Ads", "a.example.com", "# default", "y.example.com"]);
        assert_eq!(doc.groups.len(), 2);
        assert_eq!(doc.groups[0].name, DEFAULT_GROUP);
        assert_eq!(doc.groups[0].entries, vec!["x.example.com", "y.example.com"]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_annotation_comments_and_blank_lines() {
        let doc = document(&[
            "# Streaming",
            "# updated weekly",
            "#",
            "video.example.com",
            "",
            "cdn.example.com",
        ]);
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(
            doc.group("Streaming").unwrap().entries,
            vec!["video.example.com", "cdn.example.com"]
        );
    }

    #[test]
    fn test_repeated_header_continues_group() {
        let doc = document(&[
            "# Ads",
            "a.example.com",
            "# Trackers",
            "t.example.com",
            "# Ads",
            "b.example.com",
            "A.example.com",
        ]);
        assert_eq!(doc.groups.len(), 2);
        assert_eq!(
            doc.group("Ads").unwrap().entries,
            vec!["a.example.com", "b.example.com"]
        );
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_empty_groups_are_omitted() {
        let doc = document(&["# Nothing here", "", "# Ads", "ads.example.com"]);
        assert_eq!(doc.groups.len(), 1);
        assert!(doc.group("Nothing here").is_none());
        assert!(document(&["# only a header"]).is_empty());
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let doc = document(&["# Zeta", "z.example.com", "# Alpha", "a.example.com"]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"Zeta":["z.example.com"],"Alpha":["a.example.com"]}"#);
    }
}
