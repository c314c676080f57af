//! Tracing setup for hosts embedding the grid.
//!
//! The grid crates only emit `tracing` events; installing a subscriber is
//! the host's call. [`init`] is the default one: compact formatting,
//! filtered through `LEDGER_GRID_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "LEDGER_GRID_LOG";
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter from `LEDGER_GRID_LOG`, or `warn` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Returns false when one is already set.
pub fn init() -> bool {
    let fmt_layer = fmt::layer().with_target(true).with_ansi(false).compact();
    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(target: "ledger_grid", "tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init();
        assert!(!init());
    }
}
