//! keeplog Core - Shared foundation for changelog management
//!
//! This crate provides the error taxonomy and configuration system used by
//! the changelog engine and the keeplog CLI.

pub mod config;
pub mod error;

pub use config::{load_config_or_default, Config};
pub use error::{ChangelogError, ConfigError, KeeplogError, Result};
