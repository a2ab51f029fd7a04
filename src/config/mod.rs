//! Configuration module for the x-media-archiver.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{
    Config, NetworkConfig, OptionsConfig, SourceConfig, TargetConfig, VideoConfig,
    DEFAULT_REFERER, DEFAULT_USER_AGENT,
};
pub use validation::{parse_account, parse_since, validate_account, validate_config};
