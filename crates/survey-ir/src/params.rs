//! Input parameters of a diagnostic survey.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::signals::{
    DEFAULT_DETECTION_THRESHOLD, DEFAULT_DIAGNOSTIC_TYPE, DEFAULT_EVENT_NAME, RECEIVED_TEST,
    UNBOUNDED_DURATION,
};
use crate::types::{Fragment, NodeSet, PropertyRestriction, TargetDemographic};

/// Everything needed to describe one recurring diagnostic survey.
///
/// Missing fields in JSON input fall back to [`SurveyParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyParams {
    /// Probability an eligible individual receives the diagnostic. Written
    /// to the simulator exactly as given.
    pub coverage: Number,
    pub repetitions: u32,
    /// Timesteps between repetitions.
    pub tsteps_btwn: u32,
    pub target: TargetDemographic,
    pub start_day: u32,
    pub diagnostic_type: String,
    /// Sensitivity of the diagnostic in parasites per microliter.
    pub diagnostic_threshold: Number,
    pub event_name: String,
    pub node_cfg: NodeSet,
    /// Interventions given to individuals who test positive, passed
    /// through unchanged whatever their class.
    pub positive_diagnosis_configs: Vec<Fragment>,
    /// Event broadcast by everyone who receives the diagnostic.
    pub received_test_event: String,
    #[serde(rename = "IP_restrictions")]
    pub ip_restrictions: Vec<PropertyRestriction>,
    #[serde(rename = "NP_restrictions")]
    pub np_restrictions: Vec<PropertyRestriction>,
    /// Restricts who acts on a positive result.
    #[serde(rename = "pos_diag_IP_restrictions")]
    pub pos_diag_ip_restrictions: Vec<PropertyRestriction>,
    /// Events that start the survey instead of a fixed schedule.
    pub trigger_condition_list: Vec<String>,
    /// How long triggered surveys keep listening; `-1` is forever.
    pub listening_duration: i32,
    /// Timesteps between hearing a trigger and running the survey.
    pub triggered_campaign_delay: u32,
}

impl Default for SurveyParams {
    fn default() -> Self {
        Self {
            coverage: Number::from(1),
            repetitions: 1,
            tsteps_btwn: 365,
            target: TargetDemographic::default(),
            start_day: 0,
            diagnostic_type: DEFAULT_DIAGNOSTIC_TYPE.to_string(),
            diagnostic_threshold: Number::from(DEFAULT_DETECTION_THRESHOLD),
            event_name: DEFAULT_EVENT_NAME.to_string(),
            node_cfg: NodeSet::NodeSetAll,
            positive_diagnosis_configs: Vec::new(),
            received_test_event: RECEIVED_TEST.to_string(),
            ip_restrictions: Vec::new(),
            np_restrictions: Vec::new(),
            pos_diag_ip_restrictions: Vec::new(),
            trigger_condition_list: Vec::new(),
            listening_duration: UNBOUNDED_DURATION,
            triggered_campaign_delay: 0,
        }
    }
}

impl SurveyParams {
    pub fn is_triggered(&self) -> bool {
        !self.trigger_condition_list.is_empty()
    }
}
