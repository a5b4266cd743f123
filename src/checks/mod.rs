//! The individual validation checks.
//!
//! Each check takes a `CheckContext` and returns `Result<CheckOutcome>`.
//! An `Err` means the check could not talk to the BMC as expected (transport
//! failure, wrong status, bad JSON) and is reported as a failure by
//! `run_check`.

mod outcome;
mod power;
mod service;
mod thermal;


use anyhow::Result;

use crate::config::SuiteConfig;
use crate::ipmi::IpmiSensorSource;
use crate::poll::Clock;
use crate::redfish::Session;
use crate::thermal::TemperatureSource;

pub use outcome::{Check, CheckOutcome, CheckResult};

/// Everything a check needs, borrowed from the suite runner
pub struct CheckContext<'a> {
    pub session: &'a Session,
    pub config: &'a SuiteConfig,
    pub clock: &'a dyn Clock,
    pub ipmi: &'a dyn IpmiSensorSource,
    pub temperature_sources: &'a [Box<dyn TemperatureSource>],
}

/// Run one check, folding errors into a failed outcome
pub fn run_check(check: Check, ctx: &CheckContext<'_>) -> CheckOutcome {
    let result: Result<CheckOutcome> = match check {
        Check::Authentication => service::authentication(ctx),
        Check::SystemInfo => service::system_info(ctx),
        Check::PowerOn => power::power_on(ctx),
        Check::PowerCycle => power::power_cycle(ctx),
        Check::Thermal => thermal::thermal_sensors(ctx),
        Check::CrossCheck => thermal::cross_check(ctx),
    };

    result.unwrap_or_else(|e| CheckOutcome::failed(format!("{e:#}")))
}
