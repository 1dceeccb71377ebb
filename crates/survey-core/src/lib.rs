pub mod campaign;

pub use campaign::{Campaign, CampaignBuilder, CampaignConfig, CampaignError};
