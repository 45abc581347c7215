use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Output goes to stderr; stdout is reserved for `render` and `schema`.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "a2ui_surface_components_total",
            Unit::Count,
            "Total number of surface entries rendered, nested entries included."
        );
        describe_counter!(
            "a2ui_surface_placeholders_total",
            Unit::Count,
            "Total number of placeholders emitted for unknown, invalid or unrenderable components."
        );
        describe_counter!(
            "a2ui_surface_dropped_children_total",
            Unit::Count,
            "Total number of Row/Column child ids that matched no entry."
        );
        describe_counter!(
            "a2ui_transport_fallback_total",
            Unit::Count,
            "Total number of fallback surfaces substituted for agent responses."
        );
        describe_histogram!(
            "a2ui_agent_generate_ms",
            Unit::Milliseconds,
            "Agent surface generation latency in milliseconds."
        );
    });
}
