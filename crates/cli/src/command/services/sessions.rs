use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, LoadMoreOutput, LoadMorePayload,
    SessionsOutput, SessionsPayload,
};
use crate::config::DashboardConfig;
use crate::data::load_collection;
use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use dashboard_protocol::Session;
use dashboard_search::{
    cursor_offset, filter_sessions, load_next, parse_timestamp, SessionFacets, SessionFilter,
    SessionRow, WindowCursor,
};
use serde_json::Value;

pub(crate) struct SessionService;

impl SessionService {
    pub async fn list(&self, payload: Value, config: &DashboardConfig) -> Result<CommandOutcome> {
        let payload: SessionsPayload = parse_payload(CommandAction::Sessions, payload)?;
        let now = reference_time(payload.now.as_deref())?;
        let decoded = load_collection::<Session>(&config.sessions_path).await?;
        let matched = filter_sessions(&decoded.records, &payload.criteria, now);
        let cutoff = SessionFilter::compile(&payload.criteria, now)
            .cutoff()
            .map(|cutoff| cutoff.to_rfc3339_opts(SecondsFormat::Secs, true));

        let output = SessionsOutput {
            total: decoded.records.len(),
            matched: matched.len(),
            rejected: decoded.rejected,
            cutoff,
            items: matched
                .iter()
                .map(|session| SessionRow::from_session(session))
                .collect(),
            facets: SessionFacets::from_sessions(&decoded.records),
        };
        Ok(CommandOutcome::from_value(output)?.with_source(&config.sessions_path))
    }

    /// Next page of the unfiltered session list for the home view.
    pub async fn load_more(
        &self,
        payload: Value,
        config: &DashboardConfig,
    ) -> Result<CommandOutcome> {
        let payload: LoadMorePayload = parse_payload(CommandAction::LoadMore, payload)?;
        let decoded = load_collection::<Session>(&config.sessions_path).await?;
        let records = &decoded.records;

        let cursor = match payload.after_id {
            Some(id) => WindowCursor::AfterId(id),
            None => WindowCursor::Shown(payload.shown),
        };
        let start = cursor_offset(records, &cursor)?;
        let page_size = payload.page_size.unwrap_or(config.page_size);
        let page = load_next(records, start, page_size);
        let next_shown = start + page.len();

        let output = LoadMoreOutput {
            items: page.iter().map(SessionRow::from_session).collect(),
            next_shown,
            has_more: next_shown < records.len(),
        };
        Ok(CommandOutcome::from_value(output)?.with_source(&config.sessions_path))
    }
}

fn reference_time(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| anyhow!("Invalid now timestamp {raw:?}"))
        }
        None => Ok(Utc::now()),
    }
}
