use clap::Args;

use crate::types::constant::{DEFAULT_LANGUAGE_CODE, DEFAULT_MEDIA_FORMAT};

/// Parameters used to config Amazon Transcribe.
#[derive(Debug, Clone, Args)]
pub struct AWSTranscribeCliArgs {
    /// Use the Amazon Transcribe client
    #[arg(long)]
    pub aws_transcribe: bool,

    /// Media format of the uploaded videos.
    #[arg(env = "LOCALIZATION_TRANSCRIBE_MEDIA_FORMAT", long, default_value = DEFAULT_MEDIA_FORMAT)]
    pub media_format: String,

    /// Spoken language of the uploaded videos.
    #[arg(env = "LOCALIZATION_TRANSCRIBE_LANGUAGE_CODE", long, default_value = DEFAULT_LANGUAGE_CODE)]
    pub language_code: String,

    /// Prefix of the transcription job names, followed by the job identity.
    #[arg(env = "LOCALIZATION_TRANSCRIBE_JOB_NAME_PREFIX", long, default_value = "transcribe")]
    pub transcription_job_name_prefix: String,
}
