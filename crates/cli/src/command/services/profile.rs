use crate::command::domain::{parse_payload, CommandAction, CommandOutcome, ProfilePayload};
use crate::config::DashboardConfig;
use crate::data::load_collection;
use anyhow::{anyhow, Result};
use dashboard_protocol::UserProfile;
use dashboard_search::find_user;
use serde_json::Value;

pub(crate) struct ProfileService;

impl ProfileService {
    pub async fn run(&self, payload: Value, config: &DashboardConfig) -> Result<CommandOutcome> {
        let payload: ProfilePayload = parse_payload(CommandAction::Profile, payload)?;
        let user_id = payload
            .user_id
            .or_else(|| config.current_user_id.clone())
            .ok_or_else(|| anyhow!("No user id given and no current user configured"))?;

        let decoded = load_collection::<UserProfile>(&config.users_path).await?;
        let user = find_user(&decoded.records, &user_id)
            .ok_or_else(|| anyhow!("User {user_id} not found"))?;
        Ok(CommandOutcome::from_value(user)?.with_source(&config.users_path))
    }
}
