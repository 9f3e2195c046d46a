use std::marker::PhantomData;

use crate::{config::Config, error::ListError, rule_list::RuleList};

/// first stage: deduplicate and validate the list in place
#[derive(Debug)]
pub struct StageNormalize;

/// second stage: turn the normalized list into the output document
#[derive(Debug)]
pub struct StageConvert;

/// The Pipeline carries a single list through the build stages. Running a stage
/// consumes it and hands out the next one, so a list is only converted after it
/// was normalized successfully. The stages share nothing but the list file.
#[derive(Debug)]
pub struct Pipeline<'config, Stage> {
    pub(crate) stage: PhantomData<Stage>,
    pub(crate) list: &'config RuleList,
}

/// builds all configured lists in order and stops at the first failing step
pub async fn build(config: &Config) -> Result<(), ListError> {
    for list in config.lists.iter() {
        info!("Building {}", list.source.display());
        let outcome = Pipeline::new(list).run().await?.run().await?;
        debug!(
            "{}: {} entries in {} group(s)",
            list.output.display(),
            outcome.entries,
            outcome.groups
        );
    }
    Ok(())
}
