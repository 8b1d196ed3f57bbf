use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat};
use aws_sdk_transcribe::Client;

use super::{TranscriptionClient, TranscriptionError, TranscriptionSubmission};
use crate::pipeline::TranscriptionJobRequest;

/// Amazon Transcribe backed [`TranscriptionClient`].
#[derive(Clone, Debug)]
pub struct AWSTranscribe {
    client: Client,
}

impl AWSTranscribe {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self { client: Client::new(aws_config) }
    }
}

#[async_trait]
impl TranscriptionClient for AWSTranscribe {
    async fn start_transcription_job(
        &self,
        request: &TranscriptionJobRequest,
    ) -> Result<TranscriptionSubmission, TranscriptionError> {
        let output = self
            .client
            .start_transcription_job()
            .transcription_job_name(&request.job_name)
            .media(Media::builder().media_file_uri(&request.source_uri).build())
            .media_format(MediaFormat::from(request.media_format.as_str()))
            .language_code(LanguageCode::from(request.language_code.as_str()))
            .output_bucket_name(&request.output_bucket)
            .output_key(&request.output_key)
            .send()
            .await?;

        let job = output.transcription_job().ok_or_else(|| TranscriptionError::MissingJob(request.job_name.clone()))?;

        Ok(TranscriptionSubmission {
            job_name: job.transcription_job_name().unwrap_or(&request.job_name).to_string(),
            status: job.transcription_job_status().map(|status| status.as_str().to_string()),
        })
    }
}
