//! Tracing initialization and subscriber setup.

use super::{exporter, SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when no `trace_level` is configured or it does not parse.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Builds the span filter for a configured level directive.
///
/// Invalid directives fall back to [`DEFAULT_TRACE_LEVEL`].
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber exporting spans to the data directory.
///
/// # Parameters
///
/// * `config` - Supplies `trace_level`, an `EnvFilter` directive such as
///   `"debug"` or `"marquee=trace"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it does not exist
/// - Runs without tracing if that fails
/// - Only the first call per thread group takes effect
///
/// # Example
///
/// ```rust
/// use marquee::observability::init_tracing;
/// use marquee::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter_for(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used() {
        assert_eq!(filter_for(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn missing_or_invalid_level_falls_back() {
        assert_eq!(filter_for(None).to_string(), DEFAULT_TRACE_LEVEL);
        assert_eq!(filter_for(Some("marquee=loud")).to_string(), DEFAULT_TRACE_LEVEL);
    }
}
