use crate::commands::admin_cmds::spawn_background_generation;
use crate::commands::{require_active_campaign, AppState};
use crate::services::survey::{self, AnswerInput, SurveyProgress};
use crate::types::errors::CommandResult;

pub async fn submit_answer_cmd(state: &AppState, user_id: &str, input: AnswerInput) -> CommandResult<()> {
    let campaign = require_active_campaign(&state.pool).await?;
    Ok(survey::submit_answer(&state.pool, user_id, &campaign.id, &input).await?)
}

pub async fn survey_progress_cmd(state: &AppState, user_id: &str) -> CommandResult<SurveyProgress> {
    let campaign = require_active_campaign(&state.pool).await?;
    Ok(survey::survey_progress(&state.pool, user_id, &campaign.id).await?)
}

/// Complete the survey; optionally kicks off a detached regeneration.
pub async fn complete_survey_cmd(state: &AppState, user_id: &str) -> CommandResult<()> {
    let campaign = require_active_campaign(&state.pool).await?;
    survey::complete_survey(&state.pool, user_id, &campaign.id).await?;

    if state.app_config.match_on_survey_complete {
        log::info!("Survey completed by {user_id}; regenerating matches in the background");
        spawn_background_generation(state);
    }
    Ok(())
}
