//! Core types - pure abstractions shared across the codebase.

mod mode;
mod state;

pub use mode::Mode;
pub use state::{is_shutdown, register_watcher, setup_shutdown_handler};
