use anyhow::Result;
use tracing::{info, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

use crate::settings::config::Settings;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn";

pub fn build_reduced_logger_text<S>() -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if cfg!(debug_assertions) {
        Box::new(
            tracing_subscriber::fmt::layer()
                .with_line_number(false)
                .with_thread_names(false)
                .with_target(true)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NONE)
                .event_format(tracing_subscriber::fmt::format().compact()),
        )
    } else {
        Box::new(tracing_subscriber::fmt::layer().with_target(true))
    }
}

pub fn build_json_logger<S>() -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    Box::new(
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_target(true),
    )
}

/// `RUST_LOG` wins over the built-in default
pub fn build_loglevel_filter_layer() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub fn init_telemetry_and_tracing(settings: &Settings) -> Result<()> {
    let logger = if settings.json_logs() {
        build_json_logger()
    } else {
        build_reduced_logger_text()
    };

    let subscriber = tracing_subscriber::registry()
        .with(build_loglevel_filter_layer())
        .with(logger);
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Logging initialized ({} output)",
        if settings.json_logs() { "json" } else { "text" }
    );
    Ok(())
}
