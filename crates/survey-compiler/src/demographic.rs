use survey_ir::signals::EXPLICIT_AGE_RANGES;
use survey_ir::types::{TargetDemographic, Targeting};

/// Turn an explicit `{agemin, agemax}` target into the simulator's
/// `ExplicitAgeRanges` form, in place.
///
/// Returns whether the patch applied. Both bounds are copied as given.
/// Targets that are labels, or objects missing either key, are left
/// untouched. Applying twice is the same as applying once.
pub fn apply_age_range(targeting: &mut Targeting) -> bool {
    let Some((min, max)) = targeting.target_demographic.age_bounds() else {
        return false;
    };
    let (min, max) = (min.clone(), max.clone());

    targeting.target_demographic = TargetDemographic::label(EXPLICIT_AGE_RANGES);
    targeting.target_age_min = Some(min);
    targeting.target_age_max = Some(max);
    true
}
