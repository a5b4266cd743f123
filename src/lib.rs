pub mod checks;
pub mod commands;
pub mod config;
pub mod error;
pub mod ipmi;
pub mod logging;
pub mod poll;
pub mod power;
pub mod redfish;
pub mod suite;
pub mod thermal;

/// Banner printed at the top of a human-readable run
pub const BANNER: &str = "redfish-validate: Redfish + IPMI BMC validation suite";
