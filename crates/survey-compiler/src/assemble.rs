use tracing::{debug, info, warn};

use survey_ir::types::{
    CampaignEvent, CountedDistribution, EventCoordinator, Intervention, InterventionDistributor,
    Targeting, TriggeredIntervention,
};
use survey_ir::SurveyParams;

use crate::delay::{expand_delay_chain, DelayScheduler};
use crate::demographic::apply_age_range;
use crate::lint::lint_params;
use crate::outcome::build_diagnostic;
use crate::sink::CampaignSink;
use crate::trigger_ids::TriggerIdSource;

/// How a survey decides when to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingMode {
    /// Fixed number of rounds at a fixed interval.
    DirectRepeat,
    /// Runs whenever a trigger event (or its delayed rebroadcast) fires.
    TriggerDriven,
}

impl SchedulingMode {
    pub fn for_params(params: &SurveyParams) -> Self {
        if params.is_triggered() {
            SchedulingMode::TriggerDriven
        } else {
            SchedulingMode::DirectRepeat
        }
    }
}

/// Assemble one diagnostic survey and append it to `sink`.
///
/// Triggered surveys that need a rebroadcast chain schedule it through
/// `scheduler` first, so those events precede the survey in the sink.
/// Returns the mode that was used.
pub fn add_diagnostic_survey(
    sink: &mut dyn CampaignSink,
    params: &SurveyParams,
    scheduler: &mut dyn DelayScheduler,
    ids: &mut dyn TriggerIdSource,
) -> SchedulingMode {
    for warning in lint_params(params) {
        warn!(
            event_name = %params.event_name,
            %warning,
            "passing survey parameter through unchanged"
        );
    }

    let mode = SchedulingMode::for_params(params);
    debug!(event_name = %params.event_name, ?mode, "assembling diagnostic survey");

    let mut coordinator = match mode {
        SchedulingMode::DirectRepeat => counted_coordinator(params),
        SchedulingMode::TriggerDriven => {
            let triggers = expand_delay_chain(params, sink, scheduler, ids);
            triggered_coordinator(params, triggers)
        }
    };

    if apply_age_range(coordinator.targeting_mut()) {
        debug!(event_name = %params.event_name, "applied explicit age range");
    }

    sink.add_event(CampaignEvent {
        start_day: params.start_day,
        event_name: params.event_name.clone(),
        nodeset_config: params.node_cfg.clone(),
        event_coordinator_config: coordinator,
    });
    info!(
        event_name = %params.event_name,
        start_day = params.start_day,
        ?mode,
        "diagnostic survey added"
    );
    mode
}

/// `[received-test broadcast, diagnostic]`, handed out together.
fn survey_interventions(params: &SurveyParams) -> Intervention {
    Intervention::Distributor(InterventionDistributor::new(vec![
        Intervention::broadcast(params.received_test_event.clone()),
        Intervention::Diagnostic(build_diagnostic(params)),
    ]))
}

fn counted_coordinator(params: &SurveyParams) -> EventCoordinator {
    EventCoordinator::counted(CountedDistribution {
        number_repetitions: params.repetitions,
        timesteps_between_repetitions: params.tsteps_btwn,
        demographic_coverage: params.coverage.clone(),
        targeting: Targeting::new(params.target.clone()),
        property_restrictions_within_node: params.ip_restrictions.clone(),
        node_property_restrictions: params.np_restrictions.clone(),
        intervention_config: survey_interventions(params),
    })
}

fn triggered_coordinator(params: &SurveyParams, triggers: Vec<String>) -> EventCoordinator {
    EventCoordinator::triggered(TriggeredIntervention {
        trigger_condition_list: triggers,
        target_residents_only: true,
        duration: params.listening_duration,
        demographic_coverage: params.coverage.clone(),
        targeting: Targeting::new(params.target.clone()),
        property_restrictions_within_node: params.ip_restrictions.clone(),
        node_property_restrictions: params.np_restrictions.clone(),
        actual_individual_intervention_config: survey_interventions(params),
    })
}
