use clap::Args;

/// Parameters used to config the four AWS S3 pipeline locations.
///
/// Each value is either a bucket name or a bucket ARN (`arn:aws:s3:::name`).
#[derive(Debug, Clone, Args)]
pub struct AWSS3CliArgs {
    /// Use the AWS s3 buckets as pipeline locations
    #[arg(long)]
    pub aws_s3: bool,

    /// Bucket where raw videos are uploaded.
    #[arg(env = "LOCALIZATION_AWS_S3_INTAKE_BUCKET", long)]
    pub intake_bucket: Option<String>,

    /// Bucket where the transcription service writes transcripts for review.
    #[arg(env = "LOCALIZATION_AWS_S3_PENDING_REVIEW_BUCKET", long)]
    pub pending_review_bucket: Option<String>,

    /// Bucket where reviewers copy approved transcripts.
    #[arg(env = "LOCALIZATION_AWS_S3_APPROVED_REVIEW_BUCKET", long)]
    pub approved_review_bucket: Option<String>,

    /// Bucket where the dubbing job writes localized videos.
    #[arg(env = "LOCALIZATION_AWS_S3_FINAL_OUTPUT_BUCKET", long)]
    pub final_output_bucket: Option<String>,
}
