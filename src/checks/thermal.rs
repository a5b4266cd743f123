//! Thermal sensor and cross-protocol temperature checks

use anyhow::Result;
use std::fmt::Write;

use super::{CheckContext, CheckOutcome};
use crate::thermal::{
    check_cpu_norm, cpu_reading, first_chassis_id, resolve_temperatures, validate_all,
    ResolvedTemperatures,
};

enum Lookup {
    Found(ResolvedTemperatures),
    /// Reason the dependent check must skip
    Unavailable(String),
}

/// Readings for the first chassis
fn temperatures(ctx: &CheckContext<'_>) -> Result<Lookup> {
    let client = ctx.session.client();

    let Some(chassis_id) = first_chassis_id(client)? else {
        return Ok(Lookup::Unavailable(
            "No chassis found in /redfish/v1/Chassis".to_string(),
        ));
    };

    match resolve_temperatures(client, &chassis_id, ctx.temperature_sources)? {
        Some(resolved) => Ok(Lookup::Found(resolved)),
        None => Ok(Lookup::Unavailable(format!(
            "Thermal/Sensors endpoints unavailable for chassis {chassis_id}"
        ))),
    }
}

pub(super) fn thermal_sensors(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let resolved = match temperatures(ctx)? {
        Lookup::Found(resolved) => resolved,
        Lookup::Unavailable(reason) => return Ok(CheckOutcome::skipped(reason)),
    };
    let readings = &resolved.readings;

    if readings.is_empty() {
        return Ok(CheckOutcome::skipped(format!(
            "No temperature sensors found via {}",
            resolved.source
        )));
    }

    for reading in readings {
        if let Some(celsius) = reading.celsius {
            tracing::info!(sensor = %reading.name, celsius, "temperature");
        }
    }

    if let Err(violation) = validate_all(readings, &ctx.config.thermal) {
        return Ok(CheckOutcome::failed(violation.to_string()));
    }

    let cpu = match check_cpu_norm(readings, &ctx.config.thermal) {
        Ok(cpu) => cpu,
        Err(violation) => return Ok(CheckOutcome::failed(violation.to_string())),
    };

    let mut detail = format!(
        "{} temperature sensor(s) via {} within limits",
        readings.len(),
        resolved.source
    );
    match cpu {
        Some(celsius) => {
            let _ = write!(detail, "; CPU {celsius}°C in norm");
        }
        None => detail.push_str("; no CPU sensor"),
    }
    Ok(CheckOutcome::passed(detail))
}

pub(super) fn cross_check(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let resolved = match temperatures(ctx)? {
        Lookup::Found(resolved) => resolved,
        Lookup::Unavailable(reason) => return Ok(CheckOutcome::skipped(reason)),
    };

    let redfish = cpu_reading(&resolved.readings);
    let ipmi = ctx.ipmi.cpu_temperature();

    let (Some(redfish), Some(ipmi)) = (redfish, ipmi) else {
        return Ok(CheckOutcome::skipped(format!(
            "CPU temperature not available (Redfish: {}, IPMI: {})",
            availability(redfish),
            availability(ipmi)
        )));
    };

    let diff = (redfish - ipmi).abs();
    let tolerance = ctx.config.thermal.cross_check_tolerance;
    tracing::info!(redfish, ipmi, diff, "CPU temperature cross-check");

    if diff > tolerance {
        return Ok(CheckOutcome::failed(format!(
            "Temps differ too much: Redfish={redfish}°C, IPMI={ipmi}°C (diff={diff}°C > {tolerance}°C)"
        )));
    }
    Ok(CheckOutcome::passed(format!(
        "CPU temps match: Redfish={redfish}°C, IPMI={ipmi}°C (diff={diff}°C)"
    )))
}

fn availability(value: Option<f64>) -> String {
    value.map_or_else(|| "unavailable".to_string(), |v| format!("{v}°C"))
}
