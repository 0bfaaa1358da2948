//! Command-line interface module.

mod args;
pub mod emit;
pub mod pages;
pub mod route;

pub use args::{Cli, Commands, EmitArgs};
pub use emit::write_output;
