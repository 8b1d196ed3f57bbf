use std::collections::BTreeMap;
use std::fmt::Debug;

use anyhow::anyhow;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const DEFAULT_LOG_FILTER: &str = "localization_orchestrator=info";

/// Span fields left out of the console output.
const FIELDS_TO_SKIP: &[&str] = &["correlation_id"];

/// Span fields holding the stage queue name: `q` on worker spans, `queue` on event spans.
const QUEUE_FIELDS: &[&str] = &["q", "queue"];

/// Fields written before all others so a failed invocation can be matched to its work item.
const IDENTITY_FIELDS: &[&str] = &["job_identity", "bucket", "key"];

mod color {
    pub const TIMESTAMP: &str = "\x1b[96m";
    pub const MESSAGE: &str = "\x1b[97m";
    pub const COLUMN: &str = "\x1b[92m";
    pub const DIM: &str = "\x1b[90m";
    pub const RESET: &str = "\x1b[0m";
}

fn debug_string(value: &dyn Debug) -> String {
    format!("{:?}", value).trim_matches('"').to_string()
}

/// Fields of a span, kept in its extensions. Fields recorded after creation, like the bucket and key
/// of an event span, are merged in.
#[derive(Debug, Clone, Default)]
pub struct SpanFields(BTreeMap<&'static str, String>);

impl SpanFields {
    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    fn queue(&self) -> Option<&String> {
        QUEUE_FIELDS.iter().find_map(|name| self.get(name))
    }
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name(), debug_string(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name(), value.to_string());
    }
}

pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<SpanFields>() {
            Some(fields) => values.record(fields),
            None => {
                let mut fields = SpanFields::default();
                values.record(&mut fields);
                extensions.insert(fields);
            }
        }
    }
}

/// Message and fields of one event. Identity fields come first.
#[derive(Default)]
struct EventFields {
    message: String,
    identity: Vec<(&'static str, Value)>,
    others: Vec<(&'static str, Value)>,
}

impl EventFields {
    fn of(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn push(&mut self, field: &Field, value: Value) {
        if IDENTITY_FIELDS.contains(&field.name()) {
            self.identity.push((field.name(), value));
        } else {
            self.others.push((field.name(), value));
        }
    }

    fn ordered(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.identity.iter().chain(self.others.iter())
    }
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        match field.name() {
            "message" => self.message = debug_string(value),
            _ => self.push(field, Value::String(debug_string(value))),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            _ => self.push(field, Value::String(value.to_string())),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Console layout: `timestamp | level | location | artifact | service | message (fields)`.
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let level = *event.metadata().level();
        let level_color = match level {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };

        let queue = ctx.event_scope().and_then(|mut scope| {
            scope.find_map(|span| {
                let extensions = span.extensions();
                extensions.get::<SpanFields>()?.queue().cloned()
            })
        });
        let (location, artifact) = queue.as_deref().map(queue_type_to_parts).unwrap_or_else(|| ("-".into(), "-".into()));
        let service = extract_service_name(event.metadata().target());
        let sep = format!("{}|{}", color::DIM, color::RESET);

        write!(writer, "{}{}{} {sep} ", color::TIMESTAMP, Utc::now().format("%y-%m-%d %H:%M:%S"), color::RESET)?;
        write!(writer, "{}{:<5}{} {sep} ", level_color, level, color::RESET)?;
        write!(writer, "{}{:<8}{} {sep} ", color::COLUMN, location, color::RESET)?;
        write!(writer, "{}{:<6}{} {sep} ", color::COLUMN, artifact, color::RESET)?;
        write!(writer, "{}{:<8}{} {sep} ", color::COLUMN, service, color::RESET)?;

        let fields = EventFields::of(event);
        write!(writer, "{}{}{}", color::MESSAGE, fields.message, color::RESET)?;

        let rendered: Vec<String> = fields
            .ordered()
            .filter(|(name, _)| !QUEUE_FIELDS.contains(name) && !FIELDS_TO_SKIP.contains(name))
            .map(|(name, value)| format!("{}{}={}{}", color::DIM, name, plain(value), color::RESET))
            .collect();
        if !rendered.is_empty() {
            write!(writer, " ({})", rendered.join(", "))?;
        }
        writeln!(writer)
    }
}

/// One JSON object per line, with the fields of every enclosing span merged under `fields`.
pub struct JsonEventFormatter;

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let event_fields = EventFields::of(event);

        let mut fields = Map::new();
        if let Some(scope) = ctx.event_scope() {
            // Root first so inner spans override outer ones.
            for span in scope.from_root() {
                if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                    for (name, value) in &span_fields.0 {
                        fields.insert(name.to_string(), Value::String(value.clone()));
                    }
                }
                fields.insert("span_name".to_string(), Value::String(span.name().to_string()));
            }
        }
        for (name, value) in event_fields.ordered() {
            fields.insert(name.to_string(), value.clone());
        }

        let mut root = Map::new();
        root.insert("timestamp".to_string(), Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("service".to_string(), Value::String(extract_service_name(meta.target()).to_string()));
        if let Some(file) = meta.file() {
            root.insert("filename".to_string(), Value::String(file.to_string()));
        }
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        root.insert("message".to_string(), Value::String(event_fields.message));
        if !fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Install the global subscriber and color_eyre.
///
/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches the console layout to one JSON
/// object per line.
pub fn init_logging() -> anyhow::Result<()> {
    color_eyre::install().map_err(|e| anyhow!("Unable to install color_eyre: {e}"))?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .parse(DEFAULT_LOG_FILTER)
            .map_err(|e| anyhow!("Invalid default filter directive: {e}"))?,
    };

    let json = std::env::var("LOG_FORMAT").map(|format| format == "json").unwrap_or(false);
    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);
    let fmt_layer =
        if json { fmt_layer.event_format(JsonEventFormatter).boxed() } else { fmt_layer.event_format(PrettyFormatter).boxed() };

    let subscriber =
        Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set global default subscriber: {e}"))?;
    Ok(())
}

/// Short label of the crate that emitted an event.
fn extract_service_name(target: &str) -> &'static str {
    if target.starts_with("localization_orchestrator") {
        "-"
    } else if target.starts_with("aws_") {
        "AWS_SDK"
    } else if target.starts_with("omniqueue") {
        "QUEUE"
    } else {
        "EXTERNAL"
    }
}

/// Split a stage queue name into its location and artifact parts for the pretty columns,
/// e.g. `approved_review` into `("APPROVED", "REVIEW")`.
pub fn queue_type_to_parts(queue_type: &str) -> (String, String) {
    match queue_type.rsplit_once('_') {
        Some((location, artifact)) => (location.to_uppercase(), artifact.to_uppercase()),
        None => (queue_type.to_uppercase(), "-".into()),
    }
}
