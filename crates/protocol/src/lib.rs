use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod criteria;
pub mod records;

pub use criteria::{ProductCriteria, SessionCriteria};
pub use records::{
    Category, OnlineStatus, Product, RecordId, ReviewStats, SalesSource, SentimentCounts, Session,
    SessionUser, Topic, UserProfile,
};

pub const CAPABILITIES_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesServer {
    pub name: String,
    pub version: String,
}

/// Self-description returned by the `capabilities` action.
#[derive(Debug, Serialize, Clone)]
pub struct Capabilities {
    pub schema_version: u32,
    pub server: CapabilitiesServer,
    pub actions: Vec<String>,
    pub default_page_size: usize,
    pub schemas: serde_json::Value,
}

/// JSON Schemas of the criteria and record shapes, keyed by type name.
pub fn schemas() -> Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert(
        "ProductCriteria".to_string(),
        serde_json::to_value(schemars::schema_for!(ProductCriteria))?,
    );
    map.insert(
        "SessionCriteria".to_string(),
        serde_json::to_value(schemars::schema_for!(SessionCriteria))?,
    );
    map.insert(
        "Product".to_string(),
        serde_json::to_value(schemars::schema_for!(Product))?,
    );
    map.insert(
        "Session".to_string(),
        serde_json::to_value(schemars::schema_for!(Session))?,
    );
    map.insert(
        "UserProfile".to_string(),
        serde_json::to_value(schemars::schema_for!(UserProfile))?,
    );
    Ok(serde_json::Value::Object(map))
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
