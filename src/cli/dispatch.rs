use anyhow::Result;
use redfish_validate::checks::Check;
use redfish_validate::commands::{config, list, run};
use redfish_validate::config::SuiteConfig;
use std::process::ExitCode;

use super::types::{Commands, TargetArgs};

fn load_config(target: &TargetArgs, strict_power: bool) -> Result<SuiteConfig> {
    let mut config = SuiteConfig::load(target.config.as_deref())?;
    config.apply_overrides(&target.overrides(strict_power));
    Ok(config)
}

pub fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            target,
            only,
            skip,
            strict_power,
            json,
        } => {
            let config = load_config(&target, strict_power)?;
            let checks = Check::select(&only, &skip);
            if run::execute(&config, &checks, json)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::List => {
            list::execute();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { target } => {
            let config = load_config(&target, false)?;
            config::execute(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
