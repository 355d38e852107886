//! # CLI Behavior
//!
//! This is **one possible UI client** for gerencia, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the `gerencia` library.
//!
//! ## Sessions
//!
//! `gerencia login` persists the session marker in the data directory; every
//! later invocation restores it before dispatching. Catalog, ledger and report
//! commands fail with "not logged in" until a login succeeds.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and format output
//! - `print`: Output formatting (tables, colors, messages)
//! - `setup`: Argument parsing via clap, help text

mod commands;
mod print;
mod setup;

pub use commands::run;
