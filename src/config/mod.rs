//! Configuration module for Skyquake
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so callers that never touch a file can use
//! `Config::default()` directly.
//!
//! # Example
//!
//! ```no_run
//! use skyquake::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("skyquake.toml")).unwrap();
//! println!("Requests time out after {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, ScraperConfig, DEFAULT_PAGE_LIMIT, DEFAULT_REGION, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
