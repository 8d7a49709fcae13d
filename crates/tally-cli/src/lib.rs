//! Time interval calculator CLI library.
//!
//! This crate provides the CLI interface around `tally-core`: input sources,
//! the saved session and the periodic watch loop.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod session;

pub use cli::{Cli, Commands};
pub use config::Config;
