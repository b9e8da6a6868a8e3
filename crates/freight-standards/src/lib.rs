#![deny(unsafe_code)]

//! Dashboard configuration: embedded defaults, user TOML configs and CSV
//! alias sheets.

pub mod aliases;
pub mod config;
pub mod embedded;
pub mod error;
pub mod validate;

pub use crate::aliases::{load_alias_csv, parse_alias_csv};
pub use crate::config::{
    CONFIG_ENV_VAR, config_to_toml, default_config, load_config, load_effective_config,
    parse_config,
};
pub use crate::error::{Result, StandardsError};
pub use crate::validate::{ConfigWarning, validate_config};
