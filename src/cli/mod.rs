//! Command-line front end.
//!
//! Argument parsing lives in [`args`], the analyze flow (status output,
//! exit codes) in [`analyze`].

/// CLI arguments.
pub mod args;

/// Analyze command.
pub mod analyze;

pub use analyze::run;
pub use args::Cli;
