pub mod params;
pub mod parse;
pub mod serde_int_bool;
pub mod signals;
pub mod types;

pub use params::SurveyParams;
