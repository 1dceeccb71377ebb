use crate::params::SurveyParams;
use crate::types::CampaignEvent;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_params(json: &str) -> Result<SurveyParams, ParseError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_event(json: &str) -> Result<CampaignEvent, ParseError> {
    Ok(serde_json::from_str(json)?)
}
