use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" | "human" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}` (expected pretty or json)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Load,
    Classify,
    Render,
    Write,
}

#[derive(Debug, Default)]
pub struct RunMetrics {
    runs_total: AtomicU64,
    records_total: AtomicU64,
    load_micros: AtomicU64,
    classify_micros: AtomicU64,
    render_micros: AtomicU64,
    write_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub runs_total: u64,
    pub records_total: u64,
    pub load_millis: f64,
    pub classify_millis: f64,
    pub render_millis: f64,
    pub write_millis: f64,
}

impl RunMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_run(&self) {
        self.runs_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records(&self, records: usize) {
        self.records_total
            .fetch_add(records as u64, Ordering::Relaxed);
    }

    pub fn observe_phase(&self, phase: Phase, duration: Duration) {
        let slot = match phase {
            Phase::Load => &self.load_micros,
            Phase::Classify => &self.classify_micros,
            Phase::Render => &self.render_micros,
            Phase::Write => &self.write_micros,
        };
        slot.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let millis = |slot: &AtomicU64| slot.load(Ordering::Relaxed) as f64 / 1000.0;

        MetricsSnapshot {
            runs_total: self.runs_total.load(Ordering::Relaxed),
            records_total: self.records_total.load(Ordering::Relaxed),
            load_millis: millis(&self.load_micros),
            classify_millis: millis(&self.classify_micros),
            render_millis: millis(&self.render_micros),
            write_millis: millis(&self.write_micros),
        }
    }
}

/// Installs the global subscriber once; later calls are no-ops. Events go
/// to stderr so stdout stays free for command output.
pub fn init_tracing(service_name: &str, format: LogFormat) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,skinscout_pipeline=info",
                service_name
            ))
        });

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        match format {
            LogFormat::Json => builder
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .init(),
            LogFormat::Pretty => builder.with_target(false).init(),
        }
    });
}
