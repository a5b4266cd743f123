//! Suite configuration
//!
//! The suite never reads module-level constants for its target: a
//! `SuiteConfig` is built once (defaults, then TOML file, then CLI overrides)
//! and passed explicitly to the session and every check.

mod loader;
mod types;


pub use loader::{discover_config_file, ConfigOverrides, LOCAL_CONFIG_FILE};
pub use types::{
    IpmiConfig, PowerConfig, RedfishConfig, SuiteConfig, ThermalConfig, DEFAULT_BASE_URL,
    DEFAULT_IPMI_COMMAND, DEFAULT_IPMI_PORT, DEFAULT_PASSWORD, DEFAULT_SYSTEM_ID,
    DEFAULT_USERNAME,
};
