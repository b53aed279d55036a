//! Log output for the `adprobe` binary.
//!
//! Everything goes to stderr: `adprobe run --format json` prints the report
//! on stdout and callers pipe it straight into other tools.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset or unparseable. Scenario and cleanup events
/// at info, the HTTP stack only when it warns.
const DEFAULT_DIRECTIVES: &str = "adprobe=info,warn";

/// Install the global subscriber. `log` records from the HTTP stack are
/// bridged by `try_init`. Later calls leave the first subscriber in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init();
}
