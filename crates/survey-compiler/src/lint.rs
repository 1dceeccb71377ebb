use survey_ir::signals::{AGE_MAX_KEY, AGE_MIN_KEY};
use survey_ir::types::TargetDemographic;
use survey_ir::SurveyParams;

/// Suspicious parameter values. None of these stop assembly; the values
/// are passed to the simulator as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamWarning {
    #[error("Coverage {coverage} is outside [0, 1]")]
    CoverageOutOfRange { coverage: f64 },

    #[error("Event name is empty")]
    EmptyEventName,

    #[error("Received-test event name is empty")]
    EmptyReceivedTestEvent,

    #[error("Age-range target has no '{key}'; the explicit age range will not be applied")]
    IncompleteAgeRange { key: &'static str },

    #[error("Repetitions is zero")]
    ZeroRepetitions,

    #[error("{count} positive-diagnosis restriction(s) dropped: no follow-up interventions to attach them to")]
    DroppedPositiveRestrictions { count: usize },
}

pub fn lint_params(params: &SurveyParams) -> Vec<ParamWarning> {
    let mut warnings = Vec::new();
    check_coverage(params, &mut warnings);
    check_names(params, &mut warnings);
    check_target(params, &mut warnings);
    check_counts(params, &mut warnings);
    warnings
}

fn check_coverage(params: &SurveyParams, warnings: &mut Vec<ParamWarning>) {
    let Some(coverage) = params.coverage.as_f64() else {
        return;
    };
    if !(0.0..=1.0).contains(&coverage) {
        warnings.push(ParamWarning::CoverageOutOfRange { coverage });
    }
}

fn check_names(params: &SurveyParams, warnings: &mut Vec<ParamWarning>) {
    if params.event_name.is_empty() {
        warnings.push(ParamWarning::EmptyEventName);
    }
    if params.received_test_event.is_empty() {
        warnings.push(ParamWarning::EmptyReceivedTestEvent);
    }
}

/// An explicit target object is expected to carry both bounds.
fn check_target(params: &SurveyParams, warnings: &mut Vec<ParamWarning>) {
    let TargetDemographic::Explicit(range) = &params.target else {
        return;
    };
    for key in [AGE_MIN_KEY, AGE_MAX_KEY] {
        if !range.contains_key(key) {
            warnings.push(ParamWarning::IncompleteAgeRange { key });
        }
    }
}

fn check_counts(params: &SurveyParams, warnings: &mut Vec<ParamWarning>) {
    if params.repetitions == 0 {
        warnings.push(ParamWarning::ZeroRepetitions);
    }
    if params.positive_diagnosis_configs.is_empty()
        && !params.pos_diag_ip_restrictions.is_empty()
    {
        warnings.push(ParamWarning::DroppedPositiveRestrictions {
            count: params.pos_diag_ip_restrictions.len(),
        });
    }
}
