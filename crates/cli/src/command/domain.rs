use anyhow::{Context as AnyhowContext, Result};
use dashboard_protocol::{ErrorEnvelope, RecordId};
use dashboard_search::{ProductCard, ProductFacets, SessionFacets, SessionRow};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Products,
    Sessions,
    LoadMore,
    Overview,
    Profile,
    Capabilities,
}

impl CommandAction {
    pub const ALL: [CommandAction; 6] = [
        CommandAction::Products,
        CommandAction::Sessions,
        CommandAction::LoadMore,
        CommandAction::Overview,
        CommandAction::Profile,
        CommandAction::Capabilities,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Products => "products",
            CommandAction::Sessions => "sessions",
            CommandAction::LoadMore => "load_more",
            CommandAction::Overview => "overview",
            CommandAction::Profile => "profile",
            CommandAction::Capabilities => "capabilities",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Dataset file the response was computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug)]
pub struct CommandOutcome {
    pub data: Value,
    pub meta: ResponseMeta,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            meta: ResponseMeta::default(),
        })
    }

    pub fn with_source(mut self, source: &std::path::Path) -> Self {
        self.meta.source = Some(source.display().to_string());
        self
    }
}

pub fn parse_payload<T: DeserializeOwned>(action: CommandAction, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .with_context(|| format!("Invalid payload for action {}", action.as_str()))
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SessionsPayload {
    #[serde(flatten)]
    pub criteria: dashboard_protocol::SessionCriteria,
    /// RFC 3339 reference time for the date window; defaults to the current time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LoadMorePayload {
    #[serde(default)]
    pub shown: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Resume after this record instead of counting `shown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<RecordId>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ProfilePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

#[derive(Debug, Serialize)]
pub struct ProductsOutput {
    pub total: usize,
    pub matched: usize,
    pub rejected: usize,
    pub items: Vec<ProductCard>,
    pub facets: ProductFacets,
}

#[derive(Debug, Serialize)]
pub struct SessionsOutput {
    pub total: usize,
    pub matched: usize,
    pub rejected: usize,
    /// Lower bound of the date window, RFC 3339.
    pub cutoff: Option<String>,
    pub items: Vec<SessionRow>,
    pub facets: SessionFacets,
}

#[derive(Debug, Serialize)]
pub struct LoadMoreOutput {
    pub items: Vec<SessionRow>,
    pub next_shown: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassification {
    pub code: String,
    pub hint: Option<String>,
}

pub fn classify_error(message: &str) -> ErrorClassification {
    let (code, hint) = if message.contains("Invalid payload")
        || message.contains("Invalid now timestamp")
    {
        (
            "invalid_request",
            Some("Check the payload fields for this action (see action=capabilities)."),
        )
    } else if message.contains("No user id") {
        (
            "invalid_request",
            Some("Pass payload.user_id or set DASHBOARD_USER_ID / current_user_id."),
        )
    } else if message.contains("is no longer in the collection") {
        (
            "invalid_request",
            Some("The cursor record vanished; restart paging with shown=0."),
        )
    } else if message.contains("Failed to read dataset")
        || message.contains("Failed to parse dataset")
        || message.contains("Invalid dataset")
    {
        (
            "data_error",
            Some("Check --data-dir / DASHBOARD_DATA_DIR and that the file holds a JSON array."),
        )
    } else if message.contains("not found") {
        ("not_found", None)
    } else if message.to_lowercase().contains("config") {
        (
            "config_error",
            Some("Verify dashboard.toml or the file passed via --config."),
        )
    } else {
        ("internal", None)
    };

    ErrorClassification {
        code: code.to_string(),
        hint: hint.map(str::to_string),
    }
}
