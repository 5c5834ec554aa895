use anyhow::{anyhow, bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::views::{EXPENSES_PAGE_SIZE, GOALS_PAGE_SIZE, INCOMES_PAGE_SIZE};

pub const DEFAULT_CONFIG_PATH: &str = "finance_tracker.yaml";
pub const API_URL_ENV: &str = "FINANCE_TRACKER_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub page_sizes: PageSizes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8800/api".to_string(),
            session_file: PathBuf::from("finance_tracker_session.json"),
            page_sizes: PageSizes::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSizes {
    pub expenses: usize,
    pub incomes: usize,
    pub goals: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            expenses: EXPENSES_PAGE_SIZE,
            incomes: INCOMES_PAGE_SIZE,
            goals: GOALS_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from [DEFAULT_CONFIG_PATH] if that exists,
    /// or falls back to the defaults. The API URL can be overridden from the environment.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path).await?,
            None if tokio::fs::try_exists(DEFAULT_CONFIG_PATH).await? => {
                Self::read(Path::new(DEFAULT_CONFIG_PATH)).await?
            }
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            log::info!("Using API URL from {API_URL_ENV}");
            config.api_base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    async fn read(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Error in config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .with_context(|| anyhow!("Invalid api_base_url: {}", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api_base_url must be an http or https URL, got {}", self.api_base_url);
        }
        ensure!(
            self.page_sizes.expenses > 0 && self.page_sizes.incomes > 0 && self.page_sizes.goals > 0,
            "Page sizes must be at least 1"
        );
        ensure!(
            self.session_file.file_name().is_some(),
            "session_file must be a file path"
        );
        Ok(())
    }
}
