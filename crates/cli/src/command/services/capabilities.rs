use crate::command::domain::{CommandAction, CommandOutcome};
use crate::config::DashboardConfig;
use anyhow::Result;
use dashboard_protocol::{
    schemas, Capabilities, CapabilitiesServer, CAPABILITIES_SCHEMA_VERSION,
};
use serde_json::Value;

pub(crate) struct CapabilitiesService;

impl CapabilitiesService {
    pub async fn run(&self, _payload: Value, config: &DashboardConfig) -> Result<CommandOutcome> {
        let output = Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "dashboard-cli".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            actions: CommandAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
            default_page_size: config.page_size,
            schemas: schemas()?,
        };
        CommandOutcome::from_value(output)
    }
}
