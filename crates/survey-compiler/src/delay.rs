//! Delayed rebroadcast chains for triggered surveys.
//!
//! A triggered survey that must run more than once, or later than the
//! trigger itself, listens on a synthetic event instead of the caller's
//! triggers. Each link of the chain hears the previous event, waits, and
//! rebroadcasts the synthetic event:
//!
//! ```text
//! Births --(d)--> 4711 --(d+s)--> 4711 --(d+2s)--> 4711 ...
//! ```
//!
//! The survey then fires once per rebroadcast.

use serde_json::Number;
use tracing::debug;

use survey_ir::signals::{EVERYONE, FIXED_DURATION};
use survey_ir::types::{
    CampaignEvent, DelayedIntervention, EventCoordinator, Intervention, NodeSet,
    TargetDemographic, Targeting, TriggeredIntervention,
};
use survey_ir::SurveyParams;

use crate::sink::CampaignSink;
use crate::trigger_ids::TriggerIdSource;

/// One delayed rebroadcast to schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct RebroadcastRequest {
    pub start_day: u32,
    pub node_selector: NodeSet,
    /// Timesteps between hearing a trigger and broadcasting.
    pub delay: u32,
    pub trigger_condition_list: Vec<String>,
    pub listening_duration: i32,
    pub broadcast_event: String,
}

/// Schedules "when any of these events fires, wait, then broadcast".
///
/// Implementations append whatever campaign events they need to `sink`.
pub trait DelayScheduler {
    fn schedule_delayed_rebroadcast(
        &mut self,
        sink: &mut dyn CampaignSink,
        request: RebroadcastRequest,
    );
}

/// Emits one triggered campaign event per request, delivering a
/// fixed-duration `DelayedIntervention` that ends in the broadcast.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayedBroadcastScheduler;

impl DelayScheduler for DelayedBroadcastScheduler {
    fn schedule_delayed_rebroadcast(
        &mut self,
        sink: &mut dyn CampaignSink,
        request: RebroadcastRequest,
    ) {
        let delayed = Intervention::Delayed(DelayedIntervention {
            coverage: Number::from(1),
            delay_distribution: FIXED_DURATION.to_string(),
            delay_period: request.delay,
            actual_individual_intervention_configs: vec![Intervention::broadcast(
                request.broadcast_event.clone(),
            )],
        });

        let listener = TriggeredIntervention {
            trigger_condition_list: request.trigger_condition_list,
            target_residents_only: true,
            duration: request.listening_duration,
            demographic_coverage: Number::from(1),
            targeting: Targeting::new(TargetDemographic::label(EVERYONE)),
            property_restrictions_within_node: Vec::new(),
            node_property_restrictions: Vec::new(),
            actual_individual_intervention_config: delayed,
        };

        sink.add_event(CampaignEvent {
            start_day: request.start_day,
            event_name: format!("Delayed rebroadcast of {}", request.broadcast_event),
            nodeset_config: request.node_selector,
            event_coordinator_config: EventCoordinator::triggered(listener),
        });
    }
}

/// Whether a triggered survey needs a rebroadcast chain at all.
pub fn needs_delay_chain(params: &SurveyParams) -> bool {
    params.repetitions > 1 || params.triggered_campaign_delay > 0
}

/// Delay of link `index`: the campaign delay plus one spacing per
/// earlier link.
pub fn link_delay(params: &SurveyParams, index: u32) -> u32 {
    params
        .triggered_campaign_delay
        .saturating_add(index.saturating_mul(params.tsteps_btwn))
}

/// Schedule the rebroadcast chain for a triggered survey and return the
/// trigger list the survey itself should listen on.
///
/// When no chain is needed the caller's triggers come back unchanged and
/// nothing is scheduled. Otherwise one synthetic identifier is drawn and
/// `repetitions` links are scheduled in order; the first listens on the
/// caller's triggers, every later one on the identifier.
pub fn expand_delay_chain(
    params: &SurveyParams,
    sink: &mut dyn CampaignSink,
    scheduler: &mut dyn DelayScheduler,
    ids: &mut dyn TriggerIdSource,
) -> Vec<String> {
    let mut triggers = params.trigger_condition_list.clone();
    if !needs_delay_chain(params) {
        return triggers;
    }

    let synthetic = ids.next_trigger_id();
    for index in 0..params.repetitions {
        let delay = link_delay(params, index);
        debug!(
            link = index,
            delay,
            listens_on = ?triggers,
            broadcasts = %synthetic,
            "scheduling delayed rebroadcast"
        );
        scheduler.schedule_delayed_rebroadcast(
            sink,
            RebroadcastRequest {
                start_day: params.start_day,
                node_selector: params.node_cfg.clone(),
                delay,
                trigger_condition_list: triggers,
                listening_duration: params.listening_duration,
                broadcast_event: synthetic.clone(),
            },
        );
        triggers = vec![synthetic.clone()];
    }
    triggers
}
