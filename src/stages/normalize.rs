use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use crate::{
    entry::{parse_lines, render_lines},
    error::ListError,
    io::list_file::ListFile,
    normalize::{normalize, NormalizeOptions},
    pipeline::{Pipeline, StageConvert, StageNormalize},
    report::{print_duplicates, print_statistics, print_success, report_issues},
    rule_list::RuleList,
    stats::Statistics,
};

/// Destination tells the normalizer where the result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// validation-only run, nothing is written
    Report,
    /// overwrite the source list, optionally keeping a `.bak` copy
    InPlace { backup: bool },
    /// write the result to another file
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub options: NormalizeOptions,
    pub destination: Destination,
    /// abort instead of dropping invalid entries
    pub strict: bool,
    pub verbose: bool,
}

/// NormalizeOutcome summarizes a finished normalization
#[derive(Debug)]
pub struct NormalizeOutcome {
    pub before: Statistics,
    pub after: Statistics,
    pub duplicates: usize,
    pub invalid: usize,
    /// the file that was written, None when nothing changed or nothing was requested
    pub written: Option<PathBuf>,
}

/// Normalizes a list file and writes the result to the configured destination
///
/// * `path`: the list to read
/// * `settings`: transformations and destination
pub async fn normalize_file(
    path: &Path,
    settings: &NormalizeSettings,
) -> Result<NormalizeOutcome, ListError> {
    let source = ListFile::new(path);
    if settings.verbose {
        info!("Loading rules from {}", path.display());
    }
    let raw = source.read().await?;
    let parsed = parse_lines(&raw);
    let malformed = parsed.iter().filter(|l| l.is_err()).count();
    let before = Statistics::collect(parsed.iter().filter_map(|l| l.as_ref().ok()), malformed);
    if settings.verbose {
        print_statistics(&before, "Before Processing");
    }

    let normalized = normalize(parsed, &settings.options);
    report_issues(path, &normalized.invalid);
    if settings.strict && !normalized.invalid.is_empty() {
        return Err(ListError::Validation {
            path: path.to_path_buf(),
            count: normalized.invalid.len(),
        });
    }
    if settings.options.dedup {
        print_duplicates(&normalized.duplicates, settings.verbose);
    }
    let after = Statistics::collect(&normalized.lines, 0);
    if settings.verbose {
        print_statistics(&after, "After Processing");
    }

    let text = render_lines(&normalized.lines);
    let written = match &settings.destination {
        Destination::Report => {
            info!("Validation only, {} left untouched", path.display());
            None
        }
        Destination::InPlace { backup } => {
            if source.contents().await.as_deref() == Some(text.as_str()) {
                info!("Unchanged: {}", path.display());
                None
            } else {
                if *backup {
                    let backup_path = source.backup().await?;
                    info!("Backup created: {}", backup_path.display());
                }
                source.write_atomic(&text).await?;
                Some(path.to_path_buf())
            }
        }
        Destination::File(out_path) => {
            let target = ListFile::new(out_path);
            if target.contents().await.as_deref() == Some(text.as_str()) {
                info!("Unchanged: {}", out_path.display());
                None
            } else {
                target.create_parent_dir().await?;
                target.write_atomic(&text).await?;
                Some(out_path.clone())
            }
        }
    };

    match &written {
        Some(out_path) => print_success(&format!(
            "Successfully processed {} -> {}",
            path.display(),
            out_path.display()
        )),
        None => print_success(&format!(
            "{}: {} entries are valid",
            path.display(),
            after.entries
        )),
    }

    Ok(NormalizeOutcome {
        before,
        after,
        duplicates: normalized.duplicate_count(),
        invalid: normalized.invalid.len(),
        written,
    })
}

/// This stage deduplicates and validates the list in place
impl<'config> Pipeline<'config, StageNormalize> {
    pub fn new(list: &'config RuleList) -> Self {
        Self {
            stage: PhantomData,
            list,
        }
    }

    /// runs the normalize stage and returns the pipeline for the convert stage
    pub async fn run(self) -> Result<Pipeline<'config, StageConvert>, ListError> {
        let settings = NormalizeSettings {
            options: NormalizeOptions {
                dedup: self.list.dedup,
                scope: self.list.dedup_scope,
                ..Default::default()
            },
            destination: Destination::InPlace { backup: true },
            strict: self.list.strict,
            verbose: true,
        };
        normalize_file(&self.list.source, &settings).await?;
        Ok(Pipeline {
            stage: PhantomData,
            list: self.list,
        })
    }
}
