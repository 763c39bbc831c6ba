//! Floorplan command-line host
//!
//! Thin shell over `floorplan-core`: argument parsing, logging setup and
//! reports over a file-backed layout store.

mod commands;
mod shortcuts;

pub use commands::{Cli, Command, run};
pub use shortcuts::{Shortcut, ShortcutRegistry};

use floorplan_core::EditorConfig;

/// Default filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize `env_logger`. `RUST_LOG` wins over the configured filter.
pub fn init_logging(config: &EditorConfig) {
    let filter = config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}
