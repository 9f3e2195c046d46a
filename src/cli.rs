use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    config::DEFAULT_CONF_FILE_NAME,
    log_level::LogLevel,
    normalize::{DedupScope, NormalizeOptions},
    output::OutputType,
    stages::normalize::{Destination, NormalizeSettings},
};

#[derive(Debug, Parser)]
#[command(name = "ruleset", version)]
#[command(about = "Deduplicate, validate and convert domain rule lists.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// minimum severity of log messages
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deduplicate and validate a .list file
    Preprocess(PreprocessArgs),
    /// Convert a .list file into a structured document
    Convert(ConvertArgs),
    /// Preprocess and convert every list named in the build configuration
    Build {
        /// build configuration file
        #[arg(long, default_value = DEFAULT_CONF_FILE_NAME)]
        config: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct PreprocessArgs {
    /// path to the input .list file
    pub input: PathBuf,
    /// write the result to this file instead of validating only
    #[arg(short, long, conflicts_with = "inplace")]
    pub output: Option<PathBuf>,
    /// remove duplicate entries
    #[arg(short, long)]
    pub dedup: bool,
    /// range within which entries count as duplicates
    #[arg(long, value_enum, default_value_t = DedupScope::List)]
    pub scope: DedupScope,
    /// overwrite the input file with the result
    #[arg(long)]
    pub inplace: bool,
    /// skip the .bak copy made before an in-place rewrite
    #[arg(long, requires = "inplace")]
    pub no_backup: bool,
    /// fail when any entry is invalid
    #[arg(long)]
    pub strict: bool,
    /// keep invalid entries in the output
    #[arg(long, conflicts_with = "strict")]
    pub keep_invalid: bool,
    /// drop blank lines
    #[arg(long)]
    pub strip_blank: bool,
    /// drop comment lines
    #[arg(long)]
    pub strip_comments: bool,
    /// print statistics and every removed duplicate
    #[arg(long)]
    pub verbose: bool,
}

impl PreprocessArgs {
    pub fn settings(&self) -> NormalizeSettings {
        let destination = match (&self.output, self.inplace) {
            (Some(out), _) => Destination::File(out.clone()),
            (None, true) => Destination::InPlace {
                backup: !self.no_backup,
            },
            (None, false) => Destination::Report,
        };
        NormalizeSettings {
            options: NormalizeOptions {
                dedup: self.dedup,
                scope: self.scope,
                keep_invalid: self.keep_invalid,
                strip_blank: self.strip_blank,
                strip_comments: self.strip_comments,
            },
            destination,
            strict: self.strict,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// path to the input .list file
    pub input: PathBuf,
    /// path to the output file
    pub output: PathBuf,
    /// output format
    #[arg(short, long, value_enum, default_value_t = OutputType::Grouped)]
    pub format: OutputType,
}
