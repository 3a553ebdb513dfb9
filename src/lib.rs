//! sitecfg - Load and validate static site settings
//!
//! This is the library interface for sitecfg. A site generator calls
//! [`load_config`] (or [`load_config_from_path`]) once at startup and reads
//! the returned [`SiteConfig`].

pub mod cli;
pub mod config;
pub mod error;

pub use config::{load_config, load_config_from_path, Markup, SettingValue, SiteConfig};
pub use error::ConfigError;
