//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagepack.toml`:
//!
//! | Module    | TOML Section   | Purpose                                  |
//! |-----------|----------------|------------------------------------------|
//! | `pages`   | `[pages]`      | Page root, globs, home page, vendors     |
//! | `output`  | `[output]`     | Output directory and filename templates  |
//! | `resolve` | `[resolve]`    | Aliases and extensions                   |
//! | `serve`   | `[serve]`      | Dev-server descriptor settings           |

mod output;
mod pages;
pub mod resolve;
mod serve;

pub use output::OutputConfig;
pub use pages::PagesConfig;
pub use resolve::ResolveConfig;
pub use serve::ServeConfig;
