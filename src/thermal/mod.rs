//! Thermal telemetry: chassis discovery, temperature sources and validation

mod sources;
mod validation;


use serde::Serialize;

use crate::error::RedfishResult;
use crate::redfish::{Collection, RedfishClient, CHASSIS_PATH};

pub use sources::{
    default_sources, resolve_temperatures, ResolvedTemperatures, SensorsEndpoint,
    TemperatureSource, ThermalEndpoint,
};
pub use validation::{check_cpu_norm, validate_all, validate_reading, ThresholdViolation};

/// A single temperature sensor as reported over Redfish
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReading {
    pub name: String,
    pub celsius: Option<f64>,
    pub upper_critical: Option<f64>,
    pub upper_fatal: Option<f64>,
}

impl TemperatureReading {
    pub fn is_cpu(&self) -> bool {
        self.name.to_uppercase().contains("CPU")
    }
}

/// ID of the first chassis in `/redfish/v1/Chassis`, if any
pub fn first_chassis_id(client: &RedfishClient) -> RedfishResult<Option<String>> {
    let response = client.get(CHASSIS_PATH)?;
    if !response.is_ok() {
        tracing::debug!(status = response.status.as_u16(), "chassis collection unavailable");
        return Ok(None);
    }
    let collection: Collection = response.json()?;
    Ok(collection.first_member_id().map(str::to_string))
}

/// Reading of the first CPU-named sensor
pub fn cpu_reading(readings: &[TemperatureReading]) -> Option<f64> {
    readings.iter().find(|r| r.is_cpu()).and_then(|r| r.celsius)
}
