//! Log output setup
//!
//! GhostUI crates only emit `tracing` events. Applications that have no
//! subscriber of their own can install a formatted one here; the filter is
//! read from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    init_with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    )
}

/// Install a global fmt subscriber with an explicit filter such as
/// `"ghostui_cursor=trace,info"`
pub fn init_with_directives(directives: &str) -> bool {
    init_with_filter(EnvFilter::new(directives))
}

fn init_with_filter(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
