use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr so command output stays pipeable.
///
/// `RUST_LOG` sets the filter (default `warn`); `FINSIGHT_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(filter);

    let format = std::env::var("FINSIGHT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    if format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
