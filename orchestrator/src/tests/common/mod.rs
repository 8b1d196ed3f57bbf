use std::sync::{Arc, Mutex};

use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::pipeline::BucketLayout;

pub const INTAKE_BUCKET: &str = "intake";
pub const PENDING_REVIEW_BUCKET: &str = "pending";
pub const APPROVED_REVIEW_BUCKET: &str = "approved";
pub const FINAL_OUTPUT_BUCKET: &str = "done";

pub fn bucket_layout() -> BucketLayout {
    BucketLayout {
        intake: INTAKE_BUCKET.to_string(),
        pending_review: PENDING_REVIEW_BUCKET.to_string(),
        approved_review: APPROVED_REVIEW_BUCKET.to_string(),
        final_output: FINAL_OUTPUT_BUCKET.to_string(),
    }
}

/// S3 object-created notification as delivered on a stage queue. `key` is written as is, so callers pass
/// it URL-form encoded when needed.
pub fn object_created_payload(bucket: &str, key: &str) -> Vec<u8> {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "eu-central-1",
            "eventTime": "2024-05-02T10:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{bucket}") },
                "object": { "key": key, "size": 1024, "eTag": "0123456789abcdef" }
            }
        }]
    })
    .to_string()
    .into_bytes()
}

pub fn payload_without_key(bucket: &str) -> Vec<u8> {
    json!({
        "Records": [{
            "eventName": "ObjectCreated:Put",
            "s3": { "bucket": { "name": bucket }, "object": { "size": 1024 } }
        }]
    })
    .to_string()
    .into_bytes()
}

pub fn object_removed_payload(bucket: &str, key: &str) -> Vec<u8> {
    json!({
        "Records": [{
            "eventName": "ObjectRemoved:Delete",
            "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
        }]
    })
    .to_string()
    .into_bytes()
}

pub fn storage_test_payload(bucket: &str) -> Vec<u8> {
    json!({ "Service": "Amazon S3", "Event": "s3:TestEvent", "Bucket": bucket }).to_string().into_bytes()
}

/// Whether `key` is `<identity>_<video_key>.json` with an identity free of `_`.
pub fn is_transcript_key_for(key: &str, video_key: &str) -> bool {
    key.strip_suffix(&format!("_{video_key}.json"))
        .is_some_and(|identity| !identity.is_empty() && !identity.contains('_'))
}

/// Layer keeping every value recorded on spans for one field name.
#[derive(Clone)]
pub struct SpanFieldRecorder {
    field: &'static str,
    values: Arc<Mutex<Vec<String>>>,
}

impl SpanFieldRecorder {
    pub fn new(field: &'static str) -> Self {
        Self { field, values: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn values(&self) -> Vec<String> {
        self.values.lock().unwrap().clone()
    }

    fn capture(&self, record: impl FnOnce(&mut dyn Visit)) {
        let mut visitor = FieldCapture { field: self.field, values: Vec::new() };
        record(&mut visitor);
        self.values.lock().unwrap().extend(visitor.values);
    }
}

struct FieldCapture {
    field: &'static str,
    values: Vec<String>,
}

impl Visit for FieldCapture {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == self.field {
            self.values.push(format!("{:?}", value).trim_matches('"').to_string());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.field {
            self.values.push(value.to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for SpanFieldRecorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.capture(|visitor| attrs.record(visitor));
    }

    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        self.capture(|visitor| values.record(visitor));
    }
}
