use std::io::IsTerminal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber. `AUTOMOVE_LOG` overrides the level;
/// otherwise `info`, or `debug` when `verbose` is set.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = std::env::var("AUTOMOVE_LOG").unwrap_or_else(|_| default.to_string());

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(EnvFilter::new(filter))
        .try_init();
}
