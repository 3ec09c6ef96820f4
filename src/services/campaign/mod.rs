//! Campaign lifecycle: phase resolution from the schedule and the
//! per-phase action permission table.

use crate::database::models::CampaignRow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignPhase {
    PreLaunch,
    SurveyOpen,
    SurveyClosed,
    ProfileUpdate,
    ResultsReleased,
}

impl CampaignPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignPhase::PreLaunch => "pre_launch",
            CampaignPhase::SurveyOpen => "survey_open",
            CampaignPhase::SurveyClosed => "survey_closed",
            CampaignPhase::ProfileUpdate => "profile_update",
            CampaignPhase::ResultsReleased => "results_released",
        }
    }
}

impl fmt::Display for CampaignPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing actions gated by campaign phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignAction {
    ViewLanding,
    SignUp,
    TakeSurvey,
    EditSurvey,
    SubmitCrushList,
    EditProfile,
    ViewMatches,
    SendMessages,
}

impl FromStr for CampaignAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_landing" => Ok(CampaignAction::ViewLanding),
            "sign_up" => Ok(CampaignAction::SignUp),
            "take_survey" => Ok(CampaignAction::TakeSurvey),
            "edit_survey" => Ok(CampaignAction::EditSurvey),
            "submit_crush_list" => Ok(CampaignAction::SubmitCrushList),
            "edit_profile" => Ok(CampaignAction::EditProfile),
            "view_matches" => Ok(CampaignAction::ViewMatches),
            "send_messages" => Ok(CampaignAction::SendMessages),
            _ => Err(format!("Unknown campaign action: {s}")),
        }
    }
}

/// Phase boundaries are half-open: a phase starts exactly at its date.
pub fn campaign_phase(campaign: &CampaignRow, now: DateTime<Utc>) -> CampaignPhase {
    if now < campaign.survey_open_date {
        CampaignPhase::PreLaunch
    } else if now < campaign.survey_close_date {
        CampaignPhase::SurveyOpen
    } else if now < campaign.profile_update_start_date {
        CampaignPhase::SurveyClosed
    } else if now < campaign.profile_update_end_date {
        CampaignPhase::ProfileUpdate
    } else {
        CampaignPhase::ResultsReleased
    }
}

pub fn action_allowed(phase: CampaignPhase, action: CampaignAction) -> bool {
    use CampaignAction::*;
    use CampaignPhase::*;

    match action {
        ViewLanding => true,
        SignUp | TakeSurvey | EditSurvey | SubmitCrushList => phase == SurveyOpen,
        EditProfile => matches!(phase, SurveyOpen | ProfileUpdate),
        ViewMatches | SendMessages => matches!(phase, ProfileUpdate | ResultsReleased),
    }
}

/// Countdown to the next milestone of `phase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRemaining {
    pub millis: i64,
    pub label: &'static str,
}

pub fn time_remaining(
    campaign: &CampaignRow,
    phase: CampaignPhase,
    now: DateTime<Utc>,
) -> TimeRemaining {
    let (target, label) = match phase {
        CampaignPhase::PreLaunch => (campaign.survey_open_date, "Until survey opens"),
        CampaignPhase::SurveyOpen => (campaign.survey_close_date, "Until survey closes"),
        CampaignPhase::SurveyClosed => {
            (campaign.profile_update_start_date, "Until profile update period")
        }
        CampaignPhase::ProfileUpdate => (campaign.results_release_date, "Until results reveal"),
        CampaignPhase::ResultsReleased => (campaign.results_release_date, "Results revealed!"),
    };

    TimeRemaining {
        millis: (target - now).num_milliseconds().max(0),
        label,
    }
}

#[cfg(test)]
#[path = "tests/campaign_tests.rs"]
mod tests;
