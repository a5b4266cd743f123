//! Temperature sources, tried in order until one answers

use serde_json::Value;

use super::TemperatureReading;
use crate::error::RedfishResult;
use crate::redfish::{Collection, RedfishClient};

/// One way of obtaining temperature readings for a chassis.
///
/// `Ok(None)` means the endpoint is not available on this BMC and the next
/// source should be tried.
pub trait TemperatureSource {
    fn name(&self) -> &'static str;

    fn resolve(
        &self,
        client: &RedfishClient,
        chassis_id: &str,
    ) -> RedfishResult<Option<Vec<TemperatureReading>>>;
}

/// Readings found by the first answering source
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTemperatures {
    pub source: &'static str,
    pub readings: Vec<TemperatureReading>,
}

/// Deprecated-but-common `Chassis/{id}/Thermal` resource
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalEndpoint;

/// `Chassis/{id}/Sensors` collection (Redfish 2019.3+)
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorsEndpoint;

impl TemperatureSource for ThermalEndpoint {
    fn name(&self) -> &'static str {
        "Thermal"
    }

    fn resolve(
        &self,
        client: &RedfishClient,
        chassis_id: &str,
    ) -> RedfishResult<Option<Vec<TemperatureReading>>> {
        fetch_readings(client, &format!("/redfish/v1/Chassis/{chassis_id}/Thermal"))
    }
}

impl TemperatureSource for SensorsEndpoint {
    fn name(&self) -> &'static str {
        "Sensors"
    }

    fn resolve(
        &self,
        client: &RedfishClient,
        chassis_id: &str,
    ) -> RedfishResult<Option<Vec<TemperatureReading>>> {
        fetch_readings(client, &format!("/redfish/v1/Chassis/{chassis_id}/Sensors"))
    }
}

/// Thermal first, then Sensors
pub fn default_sources() -> Vec<Box<dyn TemperatureSource>> {
    vec![Box::new(ThermalEndpoint), Box::new(SensorsEndpoint)]
}

/// Try each source in order; `None` when none of them is available
pub fn resolve_temperatures(
    client: &RedfishClient,
    chassis_id: &str,
    sources: &[Box<dyn TemperatureSource>],
) -> RedfishResult<Option<ResolvedTemperatures>> {
    for source in sources {
        match source.resolve(client, chassis_id)? {
            Some(readings) => {
                tracing::info!(
                    source = source.name(),
                    count = readings.len(),
                    "temperature source resolved"
                );
                return Ok(Some(ResolvedTemperatures {
                    source: source.name(),
                    readings,
                }));
            }
            None => tracing::info!(source = source.name(), "temperature source unavailable"),
        }
    }
    Ok(None)
}

/// GET a thermal-ish document and extract readings from it.
///
/// A `Temperatures` array is used directly; otherwise every collection member
/// is fetched and kept if it is a temperature sensor.
fn fetch_readings(
    client: &RedfishClient,
    path: &str,
) -> RedfishResult<Option<Vec<TemperatureReading>>> {
    let response = client.get(path)?;
    if !response.is_ok() {
        tracing::debug!(path, status = response.status.as_u16(), "endpoint not available");
        return Ok(None);
    }

    let document: Value = response.json()?;

    if let Some(temperatures) = document.get("Temperatures") {
        let readings = temperatures
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|entry| entry.is_object())
            .map(reading_from)
            .collect();
        return Ok(Some(readings));
    }

    let Some(members) = document.get("Members") else {
        return Ok(Some(Vec::new()));
    };
    let collection: Collection =
        serde_json::from_value(serde_json::json!({ "Members": members })).unwrap_or_default();

    let mut readings = Vec::new();
    for uri in collection.members.iter().filter_map(|m| m.odata_id.as_deref()) {
        let member = client.get(uri)?;
        if !member.is_ok() {
            continue;
        }
        let Ok(sensor) = member.json::<Value>() else {
            continue;
        };
        if !is_temperature_sensor(&sensor) {
            continue;
        }
        readings.push(reading_from(&sensor));
    }
    Ok(Some(readings))
}

/// Legacy sensors carry a `ReadingCelsius` key (possibly null); newer ones
/// are typed through `ReadingType` or `ReadingUnits`
fn is_temperature_sensor(sensor: &Value) -> bool {
    sensor.get("ReadingCelsius").is_some()
        || sensor.get("ReadingType").and_then(Value::as_str) == Some("Temperature")
        || sensor.get("ReadingUnits").and_then(Value::as_str) == Some("Cel")
}

/// Numeric field of a sensor document; missing or non-numeric is `None`
fn number(sensor: &Value, key: &str) -> Option<f64> {
    sensor.get(key).and_then(Value::as_f64)
}

/// `Thresholds.<key>.Reading` of a Sensor resource
fn threshold(sensor: &Value, key: &str) -> Option<f64> {
    sensor
        .get("Thresholds")
        .and_then(|t| t.get(key))
        .and_then(|t| number(t, "Reading"))
}

/// Build a reading from either a `Thermal.Temperatures[]` entry or a `Sensor`
/// resource.
///
/// Fields are read one by one so a malformed threshold only drops that
/// threshold, never the reading.
fn reading_from(sensor: &Value) -> TemperatureReading {
    TemperatureReading {
        name: sensor
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        celsius: number(sensor, "ReadingCelsius").or_else(|| number(sensor, "Reading")),
        upper_critical: number(sensor, "UpperThresholdCritical")
            .or_else(|| threshold(sensor, "UpperCritical")),
        upper_fatal: number(sensor, "UpperThresholdFatal")
            .or_else(|| threshold(sensor, "UpperFatal")),
    }
}
