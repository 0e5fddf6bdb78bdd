//! Colorful console output for registry and stream events.
//!
//! Provides a custom `tracing` layer that formats opstream events with colors.
//!
//! ## Log Levels
//!
//! - **WARN**: Ambiguous registrations and failed resolutions
//! - **DEBUG**: Registry changes, stream creation, appended steps
//! - **TRACE**: Individual resolved steps

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use opstream_config::StreamConfig;


static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "opstream_dynamic=info";

/// Initializes console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `opstream_dynamic=info` directive.
pub fn init() {
    init_with(&StreamConfig::default());
}

/// Initializes console output, adding the configured `log_filter` directive.
///
/// Safe to call multiple times - only the first call has effect. A filter
/// that does not parse is ignored.
pub fn init_with(config: &StreamConfig) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let _ = tracing_subscriber::registry()
            .with(build_filter(config.log_filter.as_deref()))
            .with(OpstreamConsoleLayer)
            .try_init();
    });
}

fn build_filter(extra: Option<&str>) -> EnvFilter {
    let mut builder = EnvFilter::builder();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
        builder = builder.with_default_directive(directive);
    }
    let mut filter = builder.from_env_lossy();

    for directive in extra.into_iter().flat_map(|s| s.split(',')) {
        if let Ok(directive) = directive.trim().parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn elapsed_secs() -> f64 {
    EPOCH
        .get()
        .map(|epoch| epoch.elapsed().as_secs_f64())
        .unwrap_or(0.0)
}

/// A tracing layer that formats opstream events with colors.
pub struct OpstreamConsoleLayer;

impl<S: Subscriber> Layer<S> for OpstreamConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from opstream crates only
        if !target.starts_with("opstream") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{} {}", format_elapsed(), output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    operation: Option<String>,
    signature: Option<String>,
    arg_types: Option<String>,
    source_type: Option<String>,
    predicted: Option<String>,
    result_type: Option<String>,
    signatures: Option<u64>,
    candidates: Option<u64>,
    count: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
}

impl EventVisitor {
    fn text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "operation" => self.operation = Some(value),
            "signature" => self.signature = Some(value),
            "arg_types" => self.arg_types = Some(value),
            "source_type" => self.source_type = Some(value),
            "predicted" => self.predicted = Some(value),
            "result_type" => self.result_type = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "signatures" => self.signatures = Some(value),
            "candidates" => self.candidates = Some(value),
            "count" => self.count = Some(value),
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "operation_registered" => format_registered(v),
        "operations_removed" => format_removed(v),
        "stream_created" => format_created(v),
        "step_appended" => format_appended(v),
        "step_resolved" => format_step_resolved(v, level),
        "stream_resolved" => format_resolved(v),
        "ambiguous_signature" => format_ambiguous(v),
        "wrong_transformation_args" => format_wrong_transformation(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn operation(v: &EventVisitor) -> &str {
    v.operation.as_deref().unwrap_or("?")
}

fn format_registered(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} signature(s)",
        "+".bright_green().bold(),
        operation(v).white().bold(),
        v.signatures.unwrap_or(0).bright_yellow()
    )
}

fn format_removed(v: &EventVisitor) -> String {
    format!(
        "{} {} operation(s) removed",
        "-".bright_red().bold(),
        v.count.unwrap_or(0).bright_yellow()
    )
}

fn format_created(v: &EventVisitor) -> String {
    format!(
        "{} Stream({})",
        "▶".bright_green().bold(),
        format_type(v.source_type.as_deref().unwrap_or("?"))
    )
}

fn format_appended(v: &EventVisitor) -> String {
    format!(
        "{} {}({}) │ {} candidate(s) │ → {}",
        "·".bright_blue(),
        operation(v).white().bold(),
        v.arg_types.as_deref().unwrap_or(""),
        v.candidates.unwrap_or(0).bright_yellow(),
        format_type(v.predicted.as_deref().unwrap_or("?"))
    )
}

fn format_step_resolved(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} Step {:>4} │ {}({}) │ {}",
        "✓".bright_green(),
        v.step.unwrap_or(0).bright_black(),
        operation(v),
        v.arg_types.as_deref().unwrap_or(""),
        v.signature.as_deref().unwrap_or("").bright_black()
    )
}

fn format_resolved(v: &EventVisitor) -> String {
    format!(
        "{} Resolved │ {} step(s) │ {}",
        "■".bright_cyan().bold(),
        v.steps.unwrap_or(0).white(),
        format_type(v.result_type.as_deref().unwrap_or("?"))
    )
}

fn format_ambiguous(v: &EventVisitor) -> String {
    format!(
        "{} {} │ ambiguous signature {}",
        "!".bright_red().bold(),
        operation(v).white().bold(),
        v.signature.as_deref().unwrap_or("").bright_red()
    )
}

fn format_wrong_transformation(v: &EventVisitor) -> String {
    format!(
        "{} {} │ step {} │ no candidate for ({})",
        "✗".bright_red().bold(),
        operation(v).white().bold(),
        v.step.unwrap_or(0),
        v.arg_types.as_deref().unwrap_or("").bright_red()
    )
}

// Any marks a widened prediction.
fn format_type(name: &str) -> String {
    if name == "Any" {
        name.yellow().to_string()
    } else {
        name.bright_magenta().to_string()
    }
}
