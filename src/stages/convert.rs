use std::path::Path;

use crate::{
    document::Document,
    entry::{parse_lines, Line},
    error::ListError,
    io::list_file::ListFile,
    output::OutputType,
    pipeline::{Pipeline, StageConvert},
    report::print_success,
    validate::validate_entry,
};

/// ConvertOutcome summarizes a finished conversion
#[derive(Debug, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub groups: usize,
    pub entries: usize,
}

/// Converts a normalized list into the requested output format
///
/// * `input`: the list to read
/// * `output`: the document to write, parent directories are created as needed
/// * `format`: the output format
pub async fn convert_file(
    input: &Path,
    output: &Path,
    format: OutputType,
) -> Result<ConvertOutcome, ListError> {
    let raw = ListFile::new(input).read().await?;
    let lines: Vec<Line> = parse_lines(&raw)
        .into_iter()
        .collect::<Result<_, _>>()
        .map_err(|m| ListError::Parse {
            path: input.to_path_buf(),
            line: m.number,
            text: m.raw.trim().to_string(),
            reason: m.reason,
        })?;

    for line in lines.iter() {
        if let Some(entry) = line.entry() {
            if let Err(reason) = validate_entry(entry) {
                warn!(
                    "{}:{}: converting invalid entry ({}): {}",
                    input.display(),
                    line.number,
                    reason,
                    entry.canonical()
                );
            }
        }
    }

    let text = format.render(&lines).map_err(|source| ListError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    let target = ListFile::new(output);
    target.create_parent_dir().await?;
    target.write_atomic(&text).await?;

    let document = Document::from_lines(&lines);
    if document.is_empty() {
        warn!("{} contains no entries", input.display());
    }
    print_success(&format!(
        "Successfully converted {} to {}",
        input.display(),
        output.display()
    ));
    Ok(ConvertOutcome {
        groups: document.groups.len(),
        entries: document.len(),
    })
}

/// This stage turns the normalized list into the configured output document
impl Pipeline<'_, StageConvert> {
    pub async fn run(self) -> Result<ConvertOutcome, ListError> {
        convert_file(&self.list.source, &self.list.output, self.list.format).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::tests::helper::list_fixture::ListFixture;

    #[tokio::test]
    async fn test_convert_grouped() {
        let fixture = ListFixture::new();
        let input = fixture.write_list(
            "ads.list",
            &["# Ads", "ads.example.com", "# Trackers", "tracker.example.org"],
        );
        let output = fixture.path("ads.yaml");
        let outcome = convert_file(&input, &output, OutputType::Grouped)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ConvertOutcome {
                groups: 2,
                entries: 2
            }
        );
        assert_eq!(
            fixture.read(&output),
            "Ads:\n- ads.example.com\nTrackers:\n- tracker.example.org\n"
        );
    }

    #[tokio::test]
    async fn test_convert_is_deterministic() {
        let fixture = ListFixture::new();
        let input = fixture.write_list(
            "mixed.list",
            &[
                "default.example.com",
                "# Streaming",
                "# refreshed by hand",
                "DOMAIN-SUFFIX,video.example.com",
                "",
                "IP-CIDR,10.0.0.0/8,no-resolve",
                "# Ads",
                "ads.example.com",
            ],
        );
        for format in [OutputType::Grouped, OutputType::Json, OutputType::Payload] {
            let first = fixture.path("first.out");
            let second = fixture.path("second.out");
            convert_file(&input, &first, format).await.unwrap();
            convert_file(&input, &second, format).await.unwrap();
            assert_eq!(fixture.read(&first), fixture.read(&second), "{format:?}");
        }
    }

    #[tokio::test]
    async fn test_every_entry_appears_once() {
        let fixture = ListFixture::new();
        let entries = [
            "a.example.com",
            "b.example.com",
            "DOMAIN,c.example.com",
            "DOMAIN-KEYWORD,tracker",
        ];
        let input = fixture.write_list(
            "all.list",
            &["# One", entries[0], entries[1], "# Two", entries[2], "", entries[3]],
        );
        let output = fixture.path("all.json");
        convert_file(&input, &output, OutputType::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&fixture.read(&output)).unwrap();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for (_, group) in value.as_object().unwrap() {
            for entry in group.as_array().unwrap() {
                *counts.entry(entry.as_str().unwrap().to_string()).or_insert(0) += 1;
            }
        }
        assert_eq!(counts.len(), entries.len());
        assert!(entries.iter().all(|e| counts.get(*e) == Some(&1)));
    }

    #[tokio::test]
    async fn test_parse_error_names_line() {
        let fixture = ListFixture::new();
        let input = fixture.write_list("bad.list", &["# Ads", "ads.example.com", "not a domain!!"]);
        let output = fixture.path("bad.yaml");
        let err = convert_file(&input, &output, OutputType::Grouped)
            .await
            .unwrap_err();
        match err {
            ListError::Parse { line, text, .. } => {
                assert_eq!(line, 3);
                assert_eq!(text, "not a domain!!");
            }
            e => panic!("unexpected error {e:?}"),
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_list_without_entries_converts_to_empty_document() {
        let fixture = ListFixture::new();
        let input = fixture.write_list("empty.list", &["# Ads", "", "# nothing yet"]);
        let output = fixture.path("empty.json");
        let outcome = convert_file(&input, &output, OutputType::Json).await.unwrap();
        assert_eq!(outcome, ConvertOutcome { groups: 0, entries: 0 });
        assert_eq!(fixture.read(&output), "{}\n");
    }

    #[tokio::test]
    async fn test_missing_input() {
        let fixture = ListFixture::new();
        let err = convert_file(
            &fixture.path("missing.list"),
            &fixture.path("out.yaml"),
            OutputType::Grouped,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ListError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unwritable_output() {
        let fixture = ListFixture::new();
        let input = fixture.write_list("ads.list", &["ads.example.com"]);
        let err = convert_file(&input, &input.join("ads.yaml"), OutputType::Payload)
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::Write { .. }));
    }
}
