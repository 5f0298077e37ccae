//! Logging setup.
//!
//! [`init_with_level`] installs an `env_logger` backend for the `log` facade
//! that writes to stderr. Directives in `CONTOUR_SHAPES_LOG` (same syntax as
//! `RUST_LOG`) are applied on top of the requested level. With the `tracing`
//! feature, [`init_tracing`] installs a `tracing-subscriber` instead.

use std::sync::OnceLock;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read for extra filter directives.
pub const LOG_ENV: &str = "CONTOUR_SHAPES_LOG";

/// Default filter when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
const DEFAULT_DIRECTIVES: &str = "contour_shapes=info,contour_shapes_core=info";

static INSTALLED: OnceLock<()> = OnceLock::new();

fn builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_env(Env::new().filter(LOG_ENV))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .format_module_path(false)
        .format_target(true);
    builder
}

/// Install the stderr logger with `level` as the default verbosity.
///
/// Only the first call has an effect; it fails when another logger is
/// already registered with `log`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut result = Ok(());
    INSTALLED.get_or_init(|| result = builder(level).try_init());
    result
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// `json` switches to flattened JSON events; otherwise spans are printed on
/// close with an uptime timer.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
