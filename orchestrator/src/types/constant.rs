/// Container environment variable holding the input video URI
pub const ENV_INPUT_VIDEO: &str = "INVIDEO";
/// Container environment variable holding the approved transcript URI
pub const ENV_INPUT_SUBTITLES: &str = "INSUBTITLES";
/// Container environment variable holding the bucket the localized video is written to
pub const ENV_OUTPUT_BUCKET: &str = "OUTBUCKET";
/// Container environment variable holding the space separated target languages
pub const ENV_OUTPUT_LANGUAGES: &str = "OUTLANG";
/// Container environment variable holding the region of the translation services
pub const ENV_REGION: &str = "REGION";

pub const DEFAULT_OUTPUT_LANGUAGES: &str = "es de";
pub const DEFAULT_SERVICE_REGION: &str = "eu-central-1";
pub const DEFAULT_MEDIA_FORMAT: &str = "mp4";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Prefix of every object-created event name in storage notifications
pub const OBJECT_CREATED_EVENT_PREFIX: &str = "ObjectCreated:";
/// Event name of the message storage sends when a notification target is first configured
pub const STORAGE_TEST_EVENT: &str = "s3:TestEvent";
