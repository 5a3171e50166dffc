mod capabilities;
mod catalog;
mod profile;
mod sessions;

use crate::command::domain::{CommandAction, CommandOutcome};
use crate::config::DashboardConfig;
use anyhow::Result;
use serde_json::Value;

pub struct Services {
    config: DashboardConfig,
    capabilities: capabilities::CapabilitiesService,
    catalog: catalog::CatalogService,
    profile: profile::ProfileService,
    sessions: sessions::SessionService,
}

impl Services {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            capabilities: capabilities::CapabilitiesService,
            catalog: catalog::CatalogService,
            profile: profile::ProfileService,
            sessions: sessions::SessionService,
        }
    }

    pub fn config_path(&self) -> Option<String> {
        self.config
            .config_path
            .as_ref()
            .map(|path| path.display().to_string())
    }

    pub async fn route(&self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        let config = &self.config;
        match action {
            CommandAction::Products => self.catalog.products(payload, config).await,
            CommandAction::Overview => self.catalog.overview(payload, config).await,
            CommandAction::Sessions => self.sessions.list(payload, config).await,
            CommandAction::LoadMore => self.sessions.load_more(payload, config).await,
            CommandAction::Profile => self.profile.run(payload, config).await,
            CommandAction::Capabilities => self.capabilities.run(payload, config).await,
        }
    }
}
