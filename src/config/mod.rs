//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (batch limit, default paths, endpoints)
//! - Library configuration structs for each subcommand, with validation
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, DmarcArgs, HashesArgs, LeadsArgs, ResolverArgs};
pub use constants::*;
pub use types::{
    ConfigValidationError, DmarcConfig, HashesConfig, LeadsConfig, LogFormat, LogLevel,
};
