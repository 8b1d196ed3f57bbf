use crate::pipeline::{Stage, StageAction};
use crate::worker::event_handler::triggers::completion::CompletionTrigger;
use crate::worker::event_handler::triggers::dispatch::DispatchTrigger;
use crate::worker::event_handler::triggers::ingestion::IngestionTrigger;
use crate::worker::event_handler::triggers::review_gate::ReviewGateTrigger;
use crate::worker::event_handler::triggers::StageTrigger;

/// Trigger carrying out the action of `stage` in the transition table.
pub fn get_stage_trigger(stage: Stage) -> Box<dyn StageTrigger> {
    match stage.action() {
        StageAction::SubmitTranscription => Box::new(IngestionTrigger),
        StageAction::NotifyReviewer => Box::new(ReviewGateTrigger),
        StageAction::SubmitDubbing => Box::new(DispatchTrigger),
        StageAction::NotifyCompletion => Box::new(CompletionTrigger),
    }
}
