use strum_macros::{Display, EnumIter};

use crate::pipeline::Stage;

/// One queue per pipeline location. Each receives the object-created notifications of its bucket.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    #[strum(serialize = "raw_video")]
    RawVideo,
    #[strum(serialize = "pending_review")]
    PendingReview,
    #[strum(serialize = "approved_review")]
    ApprovedReview,
    #[strum(serialize = "final_video")]
    FinalVideo,
}

impl QueueType {
    pub fn stage(&self) -> Stage {
        match self {
            QueueType::RawVideo => Stage::RawVideo,
            QueueType::PendingReview => Stage::PendingReview,
            QueueType::ApprovedReview => Stage::ApprovedReview,
            QueueType::FinalVideo => Stage::FinalVideo,
        }
    }
}

impl From<Stage> for QueueType {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::RawVideo => QueueType::RawVideo,
            Stage::PendingReview => QueueType::PendingReview,
            Stage::ApprovedReview => QueueType::ApprovedReview,
            Stage::FinalVideo => QueueType::FinalVideo,
        }
    }
}
