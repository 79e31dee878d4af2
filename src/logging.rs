//! Minimal stderr subscriber for the `tzdump` binary.
//!
//! Controlled by `TZDUMP_LOG`, a comma-separated list of `level` or
//! `target=level` entries (e.g. `debug` or `tzdump::body=trace`).  A bare
//! target enables every level for it; entries with an unknown level are
//! ignored.  Logging is off when the variable is unset or has no usable
//! entry.

use std::env;
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::field::Visit;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_core::Field;

pub const ENV_VAR: &str = "TZDUMP_LOG";

struct FieldWriter<'a> {
    line: &'a mut String,
}

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = if field.name() == "message" {
            write!(self.line, "{value:?}")
        } else {
            write!(self.line, " {}={:?}", field.name(), value)
        };
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Filter {
    target: Option<String>,
    level:  Option<Level>,
}

impl Filter {
    fn matches(&self, meta: &Metadata<'_>) -> bool {
        let level_ok = self.level.map_or(true, |l| *meta.level() <= l);
        let target_ok = self
            .target
            .as_deref()
            .map_or(true, |t| meta.target().starts_with(t));
        level_ok && target_ok
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error"            => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info"             => Some(Level::INFO),
        "debug"            => Some(Level::DEBUG),
        "trace"            => Some(Level::TRACE),
        _                  => None,
    }
}

fn parse_filters(directives: &str) -> Vec<Filter> {
    directives.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((target, level)) => Some(Filter {
                target: Some(target.to_string()),
                level:  Some(parse_level(level)?),
            }),
            None => Some(match parse_level(entry) {
                Some(level) => Filter { target: None, level: Some(level) },
                None        => Filter { target: Some(entry.to_string()), level: None },
            }),
        })
        .collect()
}

pub struct StderrTracer {
    filters: Vec<Filter>,
}

static NEXT_SPAN: AtomicU64 = AtomicU64::new(1);

impl StderrTracer {
    /// A tracer for `directives`, or `None` when nothing in them is usable.
    fn from_directives(directives: &str) -> Option<Self> {
        let filters = parse_filters(directives);
        if filters.is_empty() {
            return None;
        }
        Some(StderrTracer { filters })
    }

    /// Install as the global subscriber if `TZDUMP_LOG` enables anything.
    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let Ok(directives) = env::var(ENV_VAR) else { return Ok(()) };
        let Some(tracer) = Self::from_directives(&directives) else { return Ok(()) };
        tracing::subscriber::set_global_default(tracer)
    }
}

impl Subscriber for StderrTracer {
    fn enabled(&self, meta: &Metadata<'_>) -> bool {
        self.filters.iter().any(|f| f.matches(meta))
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(NEXT_SPAN.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let meta = event.metadata();
        let mut line = String::new();
        event.record(&mut FieldWriter { line: &mut line });
        eprintln!("{} {}: {}", meta.level(), meta.target(), line);
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
