//! CLI subcommand implementations.

pub mod clear;
pub mod example;
pub mod save;
pub mod show;
pub mod sum;
pub mod watch;
