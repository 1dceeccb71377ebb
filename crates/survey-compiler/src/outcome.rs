//! What happens to an individual who tests positive.

use survey_ir::signals::TESTED_POSITIVE;
use survey_ir::types::{
    Diagnostic, DiagnosisOutcome, Fragment, Intervention, InterventionDistributor,
    PropertyRestriction,
};
use survey_ir::SurveyParams;

/// The broadcast every positive result ends with.
pub fn positive_broadcast() -> Intervention {
    Intervention::broadcast(TESTED_POSITIVE)
}

/// Build the positive-diagnosis branch of a diagnostic.
///
/// Without follow-ups the diagnostic broadcasts `TestedPositive` directly
/// and `restrictions` has nowhere to attach, so it is dropped. With
/// follow-ups, they are distributed unchanged together with a trailing
/// `TestedPositive` broadcast, restricted by `restrictions`.
pub fn compose_outcome(
    follow_ups: &[Fragment],
    restrictions: &[PropertyRestriction],
) -> DiagnosisOutcome {
    if follow_ups.is_empty() {
        return DiagnosisOutcome::Event {
            positive_diagnosis_event: TESTED_POSITIVE.to_string(),
        };
    }

    let mut intervention_list: Vec<Intervention> = follow_ups
        .iter()
        .cloned()
        .map(Intervention::Opaque)
        .collect();
    intervention_list.push(positive_broadcast());

    DiagnosisOutcome::Config {
        positive_diagnosis_config: InterventionDistributor {
            intervention_list,
            property_restrictions_within_node: restrictions.to_vec(),
        },
    }
}

pub fn build_diagnostic(params: &SurveyParams) -> Diagnostic {
    Diagnostic {
        diagnostic_type: params.diagnostic_type.clone(),
        detection_threshold: params.diagnostic_threshold.clone(),
        outcome: compose_outcome(
            &params.positive_diagnosis_configs,
            &params.pos_diag_ip_restrictions,
        ),
    }
}
