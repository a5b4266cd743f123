//! Configuration types for a validation run

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::poll::RetryPolicy;

/// Default Redfish endpoint of the lab BMC (QEMU with port forwarding)
pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1:2443";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "0penBmc";
pub const DEFAULT_SYSTEM_ID: &str = "system";

pub const DEFAULT_IPMI_COMMAND: &str = "ipmitool";
pub const DEFAULT_IPMI_PORT: u16 = 2623;

/// Complete configuration for a suite run.
///
/// Every section is optional in the TOML file; missing fields fall back to
/// the lab defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub redfish: RedfishConfig,
    pub ipmi: IpmiConfig,
    pub power: PowerConfig,
    pub thermal: ThermalConfig,
}

/// Redfish endpoint and credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedfishConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Member ID of the computer system under test
    pub system_id: String,
    /// BMC images ship self-signed certificates
    pub accept_invalid_certs: bool,
    pub request_timeout_secs: u64,
}

impl Default for RedfishConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            system_id: DEFAULT_SYSTEM_ID.to_string(),
            accept_invalid_certs: true,
            request_timeout_secs: 10,
        }
    }
}

impl RedfishConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Path of the computer system resource
    pub fn system_path(&self) -> String {
        format!("/redfish/v1/Systems/{}", self.system_id)
    }
}

/// Out-of-band IPMI access through `ipmitool`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpmiConfig {
    /// Binary name or path of the IPMI tool
    pub command: String,
    pub interface: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for IpmiConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_IPMI_COMMAND.to_string(),
            interface: "lanplus".to_string(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_IPMI_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_secs: 10,
        }
    }
}

impl IpmiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Timing and acceptance policy for power transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Wait after a ForceOff before issuing the next reset
    pub settle_secs: u64,
    pub poll_interval_secs: u64,
    pub poll_deadline_secs: u64,
    /// Wait after the On request of a power cycle before reading the final state
    pub cycle_wait_secs: u64,
    /// Force the system off before power-on whenever it is not already Off
    pub force_off_before_on: bool,
    /// Fail power-on when no state transition is observed
    pub strict: bool,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            settle_secs: 5,
            poll_interval_secs: 3,
            poll_deadline_secs: 30,
            cycle_wait_secs: 10,
            force_off_before_on: false,
            strict: false,
        }
    }
}

impl PowerConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    /// Retry policy for the power-on transition poll
    pub fn poll_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.poll_deadline_secs),
        )
    }

    /// Single delayed read used after a power cycle
    pub fn cycle_policy(&self) -> RetryPolicy {
        RetryPolicy::single(Duration::from_secs(self.cycle_wait_secs))
    }
}

/// Physical plausibility limits for temperature readings (°C)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    pub min_celsius: f64,
    /// Exclusive upper bound
    pub max_celsius: f64,
    /// CPU critical threshold used when the sensor reports none
    pub cpu_default_critical: f64,
    /// Maximum absolute difference between Redfish and IPMI CPU readings
    pub cross_check_tolerance: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            min_celsius: 0.0,
            max_celsius: 120.0,
            cpu_default_critical: 80.0,
            cross_check_tolerance: 5.0,
        }
    }
}
