//! Command-line admin console for the gym platform

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::Cli;
pub use commands::Settings;
pub use output::OutputFormat;
