pub mod assemble;
pub mod delay;
pub mod demographic;
pub mod lint;
pub mod outcome;
pub mod sink;
pub mod trigger_ids;

pub use assemble::{add_diagnostic_survey, SchedulingMode};
pub use sink::CampaignSink;
