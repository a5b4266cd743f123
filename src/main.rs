use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;

use cli::{dispatch, Cli};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    redfish_validate::logging::init(cli.verbose);
    dispatch(cli.command)
}
