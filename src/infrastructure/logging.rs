//! Logging system configuration and initialization
//!
//! Console output goes to stderr so stdout stays free for the run summary.
//! File output, when enabled, rolls daily under the configured directory.
//! Timestamps are written in JST, the timezone of the listings.

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Utc};
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "suumo-scout.log";
const JST_OFFSET_SECONDS: i32 = 9 * 3600;

// Keeps the non-blocking file writer alive for the process lifetime
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Time formatter for JST (Japan Standard Time, UTC+9)
struct JstTimeFormatter;

impl FormatTime for JstTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now();
        match FixedOffset::east_opt(JST_OFFSET_SECONDS) {
            Some(jst) => write!(w, "{}", now.with_timezone(&jst).format("%Y-%m-%d %H:%M:%S%.3f %:z")),
            None => write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f UTC")),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging with custom configuration
///
/// `RUST_LOG` overrides the configured level and module filters. Unless the
/// level is `trace`, HTTP client internals are held at `info`/`warn`.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console_output {
        layers.push(console_layer(&config));
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_directory)
            .with_context(|| format!("Failed to create log directory {:?}", config.log_directory))?;

        let file_appender = rolling::daily(&config.log_directory, LOG_FILE_PREFIX);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        if LOG_GUARD.set(guard).is_err() {
            return Err(anyhow!("Logging has already been initialized"));
        }

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_timer(JstTimeFormatter)
            .with_target(true)
            .with_ansi(false);
        layers.push(if config.json_format {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        });
    }

    if layers.is_empty() {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(&config)?;

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!("Log directory: {:?}", config.log_directory);
    }

    Ok(())
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(JstTimeFormatter)
        .with_target(false);
    if config.json_format {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    if !config.level.eq_ignore_ascii_case("trace") {
        for directive in ["reqwest=info", "hyper=warn", "h2=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    filter = filter.add_directive(format!("suumo_scout={}", config.level).parse()?);

    for (module, level) in &config.module_filters {
        filter = filter.add_directive(
            format!("{module}={level}")
                .parse()
                .with_context(|| format!("Invalid module filter {module}={level}"))?,
        );
    }

    Ok(filter)
}
