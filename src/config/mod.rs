//! User configuration.
//!
//! Settings are read from a TOML file; every key is optional and a missing file
//! means defaults.

mod settings;

pub use settings::{CONFIG_ENV, Settings, config_path};
