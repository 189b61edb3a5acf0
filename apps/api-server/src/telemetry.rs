//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,api_server=debug,blog_infra=debug,sea_orm=warn";

#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// One JSON object per event instead of the human readable format.
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// `LOG_FORMAT=json` switches to JSON output.
    pub fn from_env() -> Self {
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_telemetry(config: &TelemetryConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = config
        .json_logs
        .then(|| fmt::layer().json().with_current_span(true));
    let pretty = (!config.json_logs).then(|| fmt::layer().pretty());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();

    tracing::info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}
