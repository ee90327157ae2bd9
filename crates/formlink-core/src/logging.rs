//! Logging integration for formlink.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log filter is read from `settings.log_level` (e.g. "debug", "info",
/// "formlink=trace"). In debug mode a pretty, human-readable format is used;
/// otherwise a structured JSON format is used.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for an API request.
///
/// Attach this span around a client call so that all log entries emitted
/// while the request is in flight include the method and path.
///
/// # Examples
///
/// ```
/// use formlink_core::logging::request_span;
///
/// let span = request_span("GET", "/v1/forms/all");
/// let _guard = span.enter();
/// tracing::info!("listing forms");
/// ```
pub fn request_span(method: &str, path: &str) -> tracing::Span {
    tracing::info_span!("api_request", %method, %path)
}
