//! Process-wide logging bootstrap. The core never logs through globals on
//! its own behalf beyond tracing events; presentation lives here.

use tracing_subscriber::EnvFilter;

/// Both crate roots, so default verbosity shows info from the engine and
/// from the binary's own events. `EnvFilter` matches targets at `::`
/// boundaries, so a bare `herald` directive would leave `herald_cli` at
/// warn.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,herald=info,herald_cli=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global subscriber from the `-v` count. `RUST_LOG`
/// overrides the derived level when set.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
