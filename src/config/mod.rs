//! Configuration module for Wander
//!
//! This module handles loading, parsing, and validating JSON configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use wander::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.json")).unwrap();
//! println!("Walk depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types and the loader
pub use parser::load_config;
pub use types::Config;
pub use validation::validate;
