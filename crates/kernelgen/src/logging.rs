use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber so diagnostics never mix with generated
/// output.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// events when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
