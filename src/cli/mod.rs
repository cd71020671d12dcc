pub mod app;
pub mod commands;

pub use app::Cli;

use crate::api::SubmissionClient;
use crate::config::Config;
use crate::portal::SurveyPortal;
use crate::survey::{Catalog, SurveyModel};
use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, resolved once from flags, environment and config
pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub endpoint: Option<String>,
}

impl AppContext {
    pub fn new(config: Config, catalog_override: Option<&Path>, endpoint_override: Option<&str>) -> Result<Self> {
        let catalog = match config.resolve_catalog_path(catalog_override) {
            Some(path) => Catalog::load(&path)?,
            None => {
                info!("Using built-in catalog");
                Catalog::builtin()?
            }
        };
        let endpoint = config.resolve_endpoint(endpoint_override);

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            endpoint,
        })
    }

    pub fn model(&self) -> SurveyModel {
        SurveyModel::new(Arc::clone(&self.catalog))
    }

    pub fn portal(&self) -> Result<SurveyPortal<SubmissionClient>> {
        let client = SubmissionClient::new(self.config.timeout())?;
        Ok(SurveyPortal::new(self.model(), self.endpoint.clone(), client))
    }
}
