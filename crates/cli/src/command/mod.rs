pub mod domain;
mod services;

#[allow(unused_imports)]
pub use domain::{
    classify_error, CommandAction, CommandRequest, CommandResponse, CommandStatus,
    LoadMorePayload, ProfilePayload, ResponseMeta, SessionsPayload,
};

use crate::config::DashboardConfig;
use dashboard_protocol::ErrorEnvelope;
use services::Services;
use std::time::Instant;

pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            services: Services::new(config),
        }
    }

    pub async fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;
        log::debug!("Executing action {}", action.as_str());

        match self.services.route(action, payload).await {
            Ok(mut outcome) => {
                outcome.meta.duration_ms = outcome
                    .meta
                    .duration_ms
                    .or_else(|| Some(started.elapsed().as_millis() as u64));
                outcome.meta.config_path = self.services.config_path();
                CommandResponse {
                    status: CommandStatus::Ok,
                    message: None,
                    error: None,
                    data: outcome.data,
                    meta: outcome.meta,
                }
            }
            Err(err) => {
                log::debug!("Action {} failed: {err:#}", action.as_str());
                error_response(err, started.elapsed().as_millis() as u64)
            }
        }
    }
}

fn error_response(err: anyhow::Error, duration_ms: u64) -> CommandResponse {
    let message = format!("{err:#}");
    let classification = classify_error(&message);
    let error = ErrorEnvelope {
        code: classification.code,
        message: message.clone(),
        hint: classification.hint,
    };
    CommandResponse {
        status: CommandStatus::Error,
        message: Some(message),
        error: Some(error),
        data: serde_json::Value::Null,
        meta: ResponseMeta {
            duration_ms: Some(duration_ms),
            ..Default::default()
        },
    }
}

pub async fn execute(request: CommandRequest, config: DashboardConfig) -> CommandResponse {
    CommandHandler::new(config).execute(request).await
}
