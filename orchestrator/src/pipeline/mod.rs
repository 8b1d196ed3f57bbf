pub mod job_request;
pub mod key_codec;
pub mod stage;
pub mod work_item;

pub use job_request::{DubbingJobRequest, TranscriptionJobRequest};
pub use key_codec::{ArtifactKind, JobIdentity, KeyCodecError};
pub use stage::{stage, BucketLayout, Stage, StageAction, StageInfo, Transition, TRANSITIONS};
pub use work_item::{StageArtifact, WorkItem};
