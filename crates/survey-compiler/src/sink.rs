use survey_ir::types::CampaignEvent;

/// Append-only destination for finished campaign events. Call order is
/// the order the simulator processes them in.
pub trait CampaignSink {
    fn add_event(&mut self, event: CampaignEvent);
}

impl CampaignSink for Vec<CampaignEvent> {
    fn add_event(&mut self, event: CampaignEvent) {
        self.push(event);
    }
}
