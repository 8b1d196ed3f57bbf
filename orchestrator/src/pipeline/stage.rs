//! The pipeline's state machine. There is no stage store: the stage of an artifact is a pure function of
//! the bucket it landed in and the shape of its key.

use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::pipeline::key_codec::{ArtifactKind, KeyCodecError};
use crate::pipeline::work_item::{StageArtifact, WorkItem};

#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Stage {
    /// Uploaded video in the intake bucket.
    RawVideo,
    /// Transcript written by the transcription job, waiting for a human.
    PendingReview,
    /// Transcript copied by the reviewer into the approved bucket.
    ApprovedReview,
    /// Localized video written by the dubbing job.
    FinalVideo,
}

/// What the orchestrator does when an artifact of a stage appears.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageAction {
    SubmitTranscription,
    NotifyReviewer,
    SubmitDubbing,
    NotifyCompletion,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub action: StageAction,
    /// Stage of the artifact the action eventually produces. `None` when the produced artifact is out of
    /// the orchestrator's hands (human approval) or when the pipeline ends.
    pub produces: Option<Stage>,
}

pub const TRANSITIONS: [Transition; 4] = [
    Transition { from: Stage::RawVideo, action: StageAction::SubmitTranscription, produces: Some(Stage::PendingReview) },
    Transition { from: Stage::PendingReview, action: StageAction::NotifyReviewer, produces: None },
    Transition { from: Stage::ApprovedReview, action: StageAction::SubmitDubbing, produces: Some(Stage::FinalVideo) },
    Transition { from: Stage::FinalVideo, action: StageAction::NotifyCompletion, produces: None },
];

impl Stage {
    pub fn artifact_kind(&self) -> ArtifactKind {
        match self {
            Stage::RawVideo | Stage::FinalVideo => ArtifactKind::Video,
            Stage::PendingReview | Stage::ApprovedReview => ArtifactKind::Transcript,
        }
    }

    pub fn transition(&self) -> Transition {
        // TRANSITIONS has exactly one row per stage, in declaration order.
        TRANSITIONS[*self as usize]
    }

    pub fn action(&self) -> StageAction {
        self.transition().action
    }

    /// Whether artifacts of this stage carry an encoded job identity.
    pub fn carries_identity(&self) -> bool {
        self.artifact_kind() == ArtifactKind::Transcript
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("Bucket {0:?} is not one of the pipeline locations")]
    UnknownLocation(String),

    #[error("Key {key:?} in stage {stage} does not end with {expected:?}")]
    UnexpectedArtifact { stage: Stage, key: String, expected: &'static str },
}

/// Bucket names of the four pipeline locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLayout {
    pub intake: String,
    pub pending_review: String,
    pub approved_review: String,
    pub final_output: String,
}

impl BucketLayout {
    pub fn bucket_for(&self, stage: Stage) -> &str {
        match stage {
            Stage::RawVideo => &self.intake,
            Stage::PendingReview => &self.pending_review,
            Stage::ApprovedReview => &self.approved_review,
            Stage::FinalVideo => &self.final_output,
        }
    }

    pub fn stage_of_bucket(&self, bucket: &str) -> Option<Stage> {
        [Stage::RawVideo, Stage::PendingReview, Stage::ApprovedReview, Stage::FinalVideo]
            .into_iter()
            .find(|stage| self.bucket_for(*stage) == bucket)
    }
}

/// Classification of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInfo {
    pub stage: Stage,
    pub artifact: StageArtifact,
}

impl StageInfo {
    /// Classify an artifact whose stage is already known (e.g. from the queue it was delivered on).
    pub fn for_stage(stage: Stage, bucket: &str, key: &str) -> Result<Self, StageError> {
        let kind = stage.artifact_kind();
        if !kind.matches(key) {
            return Err(StageError::UnexpectedArtifact { stage, key: key.to_string(), expected: kind.extension() });
        }
        Ok(Self { stage, artifact: StageArtifact::new(bucket, key) })
    }

    /// Rebuild the work item from the artifact key. Only transcript stages carry an identity.
    pub fn work_item(&self) -> Result<WorkItem, KeyCodecError> {
        WorkItem::from_transcript_key(&self.artifact.key)
    }
}

/// Derive the stage of an artifact from its location and key.
pub fn stage(layout: &BucketLayout, bucket: &str, key: &str) -> Result<StageInfo, StageError> {
    let stage = layout.stage_of_bucket(bucket).ok_or_else(|| StageError::UnknownLocation(bucket.to_string()))?;
    StageInfo::for_stage(stage, bucket, key)
}
