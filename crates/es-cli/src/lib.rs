//! Equipment status CLI library.
//!
//! This crate provides the CLI interface for recording and reporting
//! equipment status changes.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ImportArgs, QueryArgs, RecordArgs};
pub use config::Config;
