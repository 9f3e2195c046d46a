#[macro_use]
extern crate log;

mod cli;
mod config;
mod document;
mod entry;
mod error;
mod input;
mod io;
mod log_level;
mod normalize;
mod output;
mod pipeline;
mod report;
mod rule_list;
mod stages;
mod stats;
mod validate;

#[cfg(test)]
mod tests;

use clap::Parser;
use colored::Colorize;

use crate::{
    cli::{Cli, Commands},
    config::Config,
    error::ListError,
    stages::{convert::convert_file, normalize::normalize_file},
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    log_level::init(cli.log_level);
    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        let code = e
            .downcast_ref::<ListError>()
            .map(ListError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Preprocess(args) => {
            let outcome = normalize_file(&args.input, &args.settings()).await?;
            info!(
                "{}: {} -> {} entries, {} duplicate(s) removed, {} invalid",
                args.input.display(),
                outcome.before.entries,
                outcome.after.entries,
                outcome.duplicates,
                outcome.invalid
            );
            if let Some(written) = outcome.written {
                debug!("result written to {}", written.display());
            }
        }
        Commands::Convert(args) => {
            let outcome = convert_file(&args.input, &args.output, args.format).await?;
            info!(
                "{}: {} entries in {} group(s)",
                args.output.display(),
                outcome.entries,
                outcome.groups
            );
        }
        Commands::Build { config } => {
            let config = Config::load(&config)?;
            pipeline::build(&config).await?;
        }
    }
    Ok(())
}
