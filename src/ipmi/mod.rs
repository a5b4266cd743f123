//! Out-of-band temperature readings over IPMI.
//!
//! The suite shells out to `ipmitool` rather than speaking RMCP+ itself.
//! Any failure (tool missing, timeout, non-zero exit, unparseable output)
//! degrades to "no reading", which makes dependent checks skip.

mod executor;
mod parser;

pub use parser::parse_cpu_temperature;

use crate::config::IpmiConfig;
use crate::error::IpmiError;

/// Anything that can report a CPU temperature independently of Redfish
pub trait IpmiSensorSource {
    fn cpu_temperature(&self) -> Option<f64>;
}

/// `ipmitool` over LAN
#[derive(Debug, Clone)]
pub struct IpmiTool {
    config: IpmiConfig,
}

impl IpmiTool {
    pub fn new(config: IpmiConfig) -> Self {
        Self { config }
    }

    /// Arguments for `ipmitool … sensor`
    pub fn sensor_args(&self) -> Vec<String> {
        vec![
            "-I".to_string(),
            self.config.interface.clone(),
            "-H".to_string(),
            self.config.host.clone(),
            "-p".to_string(),
            self.config.port.to_string(),
            "-U".to_string(),
            self.config.username.clone(),
            "-P".to_string(),
            self.config.password.clone(),
            "sensor".to_string(),
        ]
    }

    /// Raw `sensor` table
    pub fn read_sensors(&self) -> Result<String, IpmiError> {
        let program = which::which(&self.config.command)
            .map_err(|_| IpmiError::NotFound(self.config.command.clone()))?;
        let program = program.to_string_lossy();

        executor::run_with_timeout(&program, &self.sensor_args(), self.config.timeout())
    }
}

impl IpmiSensorSource for IpmiTool {
    fn cpu_temperature(&self) -> Option<f64> {
        match self.read_sensors() {
            Ok(output) => {
                let reading = parse_cpu_temperature(&output);
                if reading.is_none() {
                    tracing::info!("no CPU temperature in IPMI sensor output");
                }
                reading
            }
            Err(e) => {
                tracing::info!(error = %e, "IPMI sensor read unavailable");
                None
            }
        }
    }
}
