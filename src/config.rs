use crate::api::constants::{self, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub submission: SubmissionSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CatalogSettings {
    pub path: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("survey-portal")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".survey-portal")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self {
                source_path: Some(config_path.to_path_buf()),
                ..Self::default()
            });
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.source_path = Some(config_path.to_path_buf());

        debug!(
            "Loaded config (endpoint configured: {}, catalog: {:?})",
            config.submission.endpoint.is_some(),
            config.catalog.path
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = match &self.source_path {
            Some(path) => path.clone(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", config_path);

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
                info!("Created config directory: {:?}", config_dir);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_endpoint(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !constants::is_valid_endpoint(&url) {
            anyhow::bail!("'{}' is not an absolute http(s) URL", url);
        }

        info!("Setting submission endpoint");
        self.submission.endpoint = Some(url);
        self.save()
    }

    pub fn clear_endpoint(&mut self) -> Result<()> {
        if self.submission.endpoint.take().is_none() {
            warn!("Cleared endpoint that was not set");
        }
        self.save()
    }

    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        info!("Updating submission timeout to: {}s", secs);
        self.submission.timeout_secs = secs;
        self.save()
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            anyhow::bail!("Catalog file not found: {:?}", path);
        }
        info!("Setting catalog path to: {:?}", path);
        self.catalog.path = Some(path);
        self.save()
    }

    pub fn clear_catalog_path(&mut self) -> Result<()> {
        self.catalog.path = None;
        self.save()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.submission.timeout_secs.max(1))
    }

    /// Pick the endpoint: command-line override, then the environment, then
    /// the config file. Blank values count as unset.
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> Option<String> {
        let from_env = std::env::var(constants::ENDPOINT_ENV_VAR).ok();
        self.resolve_endpoint_with(cli_override, from_env.as_deref())
    }

    pub fn resolve_endpoint_with(&self, cli_override: Option<&str>, from_env: Option<&str>) -> Option<String> {
        [cli_override, from_env, self.submission.endpoint.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map(str::to_string)
    }

    /// Pick the catalog file: command-line override, then the config file
    pub fn resolve_catalog_path(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.catalog.path.clone())
    }
}
