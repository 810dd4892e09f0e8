//! Custom tracing formatters for human and machine consumption.
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;
use yansi::Paint;

const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

/// Single-line console output: `time level span{fields}: target: message fields`.
pub struct CustomPrettyFormatter;

impl<S, N> FormatEvent<S, N> for CustomPrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let clock = OffsetDateTime::now_utc().format(&CLOCK_FORMAT).map_err(|_| fmt::Error)?;
        write!(writer, "{} {} ", styled(ansi, clock, |p| p.dim()), level_label(ansi, meta.level()))?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", styled(ansi, span.metadata().name(), |p| p.bold()))?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|f| !f.fields.is_empty()) {
                    write!(writer, "{{{}}}", fields.fields)?;
                }
                write!(writer, "{}", styled(ansi, ":", |p| p.dim()))?;
            }
            writer.write_char(' ')?;
        }

        write!(writer, "{}: ", styled(ansi, meta.target(), |p| p.dim()))?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// One JSON object per line with event fields flattened to the top level and
/// each enclosing span nested under its own name.
pub struct CustomJsonFormatter;

#[derive(Serialize)]
struct JsonLine {
    timestamp: String,
    level: String,
    target: String,
    message: String,
    #[serde(flatten)]
    spans: Map<String, Value>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::Number(value.into()));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}

impl<S, N> FormatEvent<S, N> for CustomJsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut spans = Map::new();
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                let extensions = span.extensions();
                let fields = match extensions.get::<FormattedFields<N>>() {
                    Some(formatted) => serde_json::from_str::<Map<String, Value>>(formatted.fields.as_str())
                        .unwrap_or_else(|_| Map::from_iter([("raw".to_string(), Value::String(formatted.fields.to_string()))])),
                    None => Map::new(),
                };
                spans.insert(span.metadata().name().to_string(), Value::Object(fields));
            }
        }

        let line = JsonLine {
            timestamp: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            spans,
            fields: visitor.fields,
        };

        let json = serde_json::to_string(&line).map_err(|_| fmt::Error)?;
        writeln!(writer, "{json}")
    }
}

/// Five-character, right-aligned level label, colored when the writer supports ANSI.
fn level_label(ansi: bool, level: &Level) -> String {
    let label = format!("{:>5}", level.as_str());
    if !ansi {
        return label;
    }
    let painted = match *level {
        Level::TRACE => label.magenta(),
        Level::DEBUG => label.blue(),
        Level::INFO => label.green(),
        Level::WARN => label.yellow(),
        Level::ERROR => label.red(),
    };
    painted.to_string()
}

fn styled<T: fmt::Display>(ansi: bool, value: T, style: impl FnOnce(yansi::Painted<&T>) -> yansi::Painted<&T>) -> String {
    if ansi {
        style(Paint::new(&value)).to_string()
    } else {
        value.to_string()
    }
}
