//! `tracing` subscriber setup for binaries built with the `tracing` feature.

use log::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when `RUST_LOG` is unset.
fn default_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `level`. Closed spans are reported so instrumented
/// scoring calls show their timings. Returns `false` when a global
/// subscriber was already set.
pub fn init_tracing(level: LevelFilter, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let installed = if json {
        subscriber.json().flatten_event(true).finish().try_init()
    } else {
        subscriber.with_target(true).compact().finish().try_init()
    };
    installed.is_ok()
}
