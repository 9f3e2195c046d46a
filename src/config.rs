use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::rule_list::RuleList;

pub const DEFAULT_CONF_FILE_NAME: &str = "ruleset.json";

/// Config contains all lists the build command processes, in processing order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub lists: Vec<RuleList>,
}

impl Config {
    /// Populates the Config struct from a json file
    ///
    /// * `path`: file system path to the configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("error reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid json in {}", path.display()))?;
        if config.lists.is_empty() {
            return Err(anyhow::anyhow!(
                "config file {} lists nothing to build",
                path.display()
            ));
        }
        debug!("loaded {} list(s) from {}", config.lists.len(), path.display());
        Ok(config)
    }
}
