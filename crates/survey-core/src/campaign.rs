//! Campaign documents and the builder that fills them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use survey_compiler::delay::{DelayScheduler, DelayedBroadcastScheduler};
use survey_compiler::trigger_ids::RandomTriggerIds;
use survey_compiler::{CampaignSink, SchedulingMode};
use survey_ir::parse::parse_params;
use survey_ir::types::CampaignEvent;
use survey_ir::SurveyParams;

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Parameter parse error: {0}")]
    Parse(#[from] survey_ir::parse::ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Settings for a campaign document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Let the simulator fill unspecified intervention fields with defaults.
    pub use_defaults: bool,
    /// Seed for synthetic trigger identifiers. None draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            seed: None,
        }
    }
}

/// The simulator's campaign file: an ordered list of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "Events")]
    events: Vec<CampaignEvent>,
    #[serde(rename = "Use_Defaults", with = "survey_ir::serde_int_bool")]
    use_defaults: bool,
}

impl Campaign {
    pub fn new(use_defaults: bool) -> Self {
        Self {
            events: Vec::new(),
            use_defaults,
        }
    }

    pub fn events(&self) -> &[CampaignEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn use_defaults(&self) -> bool {
        self.use_defaults
    }

    pub fn to_json(&self) -> Result<String, CampaignError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CampaignError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CampaignError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CampaignSink for Campaign {
    fn add_event(&mut self, event: CampaignEvent) {
        debug!(event_name = %event.event_name, index = self.events.len(), "campaign event added");
        self.events.push(event);
    }
}

/// Accumulates surveys into one campaign using the production
/// collaborators: rebroadcast chains via [`DelayedBroadcastScheduler`]
/// (unless replaced) and ChaCha8 trigger identifiers.
pub struct CampaignBuilder {
    campaign: Campaign,
    scheduler: Box<dyn DelayScheduler>,
    ids: RandomTriggerIds,
}

impl CampaignBuilder {
    pub fn new(config: CampaignConfig) -> Self {
        let ids = match config.seed {
            Some(seed) => RandomTriggerIds::seeded(seed),
            None => RandomTriggerIds::from_entropy(),
        };
        Self {
            campaign: Campaign::new(config.use_defaults),
            scheduler: Box::new(DelayedBroadcastScheduler),
            ids,
        }
    }

    /// Replace the collaborator that schedules delayed rebroadcasts.
    pub fn with_scheduler(mut self, scheduler: impl DelayScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    pub fn add_diagnostic_survey(&mut self, params: &SurveyParams) -> SchedulingMode {
        survey_compiler::add_diagnostic_survey(
            &mut self.campaign,
            params,
            self.scheduler.as_mut(),
            &mut self.ids,
        )
    }

    /// Parse survey parameters from JSON and add the survey.
    ///
    /// Nothing is added when parsing fails.
    pub fn add_diagnostic_survey_json(
        &mut self,
        params_json: &str,
    ) -> Result<SchedulingMode, CampaignError> {
        let params = parse_params(params_json)?;
        Ok(self.add_diagnostic_survey(&params))
    }

    /// Append an event built elsewhere.
    pub fn add_event(&mut self, event: CampaignEvent) {
        self.campaign.add_event(event);
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn finish(self) -> Campaign {
        self.campaign
    }
}

impl Default for CampaignBuilder {
    fn default() -> Self {
        Self::new(CampaignConfig::default())
    }
}
