//! Sequential suite runner

use anyhow::{Context, Result};
use std::time::Instant;

use super::report::SuiteReport;
use crate::checks::{run_check, Check, CheckContext, CheckResult};
use crate::config::SuiteConfig;
use crate::ipmi::{IpmiSensorSource, IpmiTool};
use crate::poll::{Clock, SystemClock};
use crate::redfish::Session;
use crate::thermal::{default_sources, TemperatureSource};

/// Runs checks against one BMC with one session.
///
/// The clock, IPMI source and temperature sources default to the real
/// implementations and can be swapped for tests or dry runs.
pub struct SuiteRunner<'a> {
    config: &'a SuiteConfig,
    clock: Box<dyn Clock>,
    ipmi: Box<dyn IpmiSensorSource>,
    temperature_sources: Vec<Box<dyn TemperatureSource>>,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(config: &'a SuiteConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
            ipmi: Box::new(IpmiTool::new(config.ipmi.clone())),
            temperature_sources: default_sources(),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ipmi(mut self, ipmi: Box<dyn IpmiSensorSource>) -> Self {
        self.ipmi = ipmi;
        self
    }

    pub fn with_temperature_sources(mut self, sources: Vec<Box<dyn TemperatureSource>>) -> Self {
        self.temperature_sources = sources;
        self
    }

    /// Log in, run `checks` in order, log out.
    ///
    /// A failed login aborts the run before any check executes. Once logged
    /// in, every check runs regardless of earlier outcomes and the session is
    /// deleted exactly once at the end.
    pub fn run(&self, checks: &[Check]) -> Result<SuiteReport> {
        let session = Session::login(&self.config.redfish).with_context(|| {
            format!(
                "Redfish login to {} as '{}' failed",
                self.config.redfish.base_url, self.config.redfish.username
            )
        })?;

        let mut report = SuiteReport::new(session.client().base_url());
        {
            let ctx = CheckContext {
                session: &session,
                config: self.config,
                clock: self.clock.as_ref(),
                ipmi: self.ipmi.as_ref(),
                temperature_sources: &self.temperature_sources,
            };

            for &check in checks {
                tracing::info!(check = check.name(), "running check");
                let start = Instant::now();
                let outcome = run_check(check, &ctx);
                let result = CheckResult::new(check, outcome, start.elapsed());
                tracing::info!(check = check.name(), result = %result.summary(), "check finished");
                report.results.push(result);
            }
        }

        report.logged_out = session.logout();
        Ok(report)
    }
}

/// Run `checks` with the real clock, `ipmitool` and default temperature sources
pub fn run_suite(config: &SuiteConfig, checks: &[Check]) -> Result<SuiteReport> {
    SuiteRunner::new(config).run(checks)
}
