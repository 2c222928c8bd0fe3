//! Configuration module for Data-Grab
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so the server also runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use data_grab::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("data-grab.toml")).unwrap();
//! println!("Page fetch timeout: {}s", config.crawler.fetch_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ServerConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};

// Re-export validation
pub use validation::validate;
