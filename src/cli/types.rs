use clap::{Args, Parser, Subcommand};
use redfish_validate::checks::Check;
use redfish_validate::config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redfish-validate")]
#[command(about = "Validate a BMC over Redfish with an IPMI cross-check", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and run the validation checks
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Run only these checks (repeatable; default: all)
        #[arg(long, value_enum)]
        only: Vec<Check>,

        /// Skip these checks (repeatable)
        #[arg(long, value_enum)]
        skip: Vec<Check>,

        /// Fail power-on when no PowerState change is observed
        #[arg(long)]
        strict_power: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the available checks
    List,

    /// Print the effective configuration (passwords redacted)
    Config {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Where the configuration comes from and what to override in it
#[derive(Args, Clone)]
pub struct TargetArgs {
    /// Path to a TOML config file (default: ./redfish-validate.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Redfish base URL, e.g. https://127.0.0.1:2443
    #[arg(long)]
    pub base_url: Option<String>,

    /// Username for Redfish and IPMI
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for Redfish and IPMI
    #[arg(short, long)]
    pub password: Option<String>,

    /// IPMI host
    #[arg(long)]
    pub ipmi_host: Option<String>,

    /// IPMI port
    #[arg(long)]
    pub ipmi_port: Option<u16>,
}

impl TargetArgs {
    pub fn overrides(&self, strict_power: bool) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            ipmi_host: self.ipmi_host.clone(),
            ipmi_port: self.ipmi_port,
            strict_power,
        }
    }
}
