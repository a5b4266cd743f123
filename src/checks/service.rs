//! Service root and system inventory checks

use anyhow::{Context, Result};
use serde_json::Value;

use super::{CheckContext, CheckOutcome};
use crate::redfish::SERVICE_ROOT_PATH;

/// The service root must answer 200 and link to `Systems`
pub(super) fn authentication(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let response = ctx.session.client().get(SERVICE_ROOT_PATH)?;
    if !response.is_ok() {
        return Ok(CheckOutcome::failed(format!(
            "GET {SERVICE_ROOT_PATH} returned HTTP {}",
            response.status.as_u16()
        )));
    }

    let root = response
        .json_object()
        .context("Service root is not a JSON object")?;
    let keys: Vec<&str> = root.keys().map(String::as_str).collect();

    if !root.contains_key("Systems") {
        return Ok(CheckOutcome::failed(format!(
            "Expected 'Systems' key in root response, got: {}",
            keys.join(", ")
        )));
    }

    tracing::info!(keys = %keys.join(","), "service root");
    Ok(CheckOutcome::passed(format!("root keys: {}", keys.join(", "))))
}

/// The system resource must carry `PowerState` and `Status`
pub(super) fn system_info(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let path = ctx.config.redfish.system_path();
    let response = ctx.session.client().get(&path)?;
    if !response.is_ok() {
        return Ok(CheckOutcome::failed(format!(
            "GET {path} returned HTTP {}",
            response.status.as_u16()
        )));
    }

    let system = response
        .json_object()
        .with_context(|| format!("{path} is not a JSON object"))?;

    let missing: Vec<&str> = ["PowerState", "Status"]
        .into_iter()
        .filter(|key| !system.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Ok(CheckOutcome::failed(format!(
            "System resource missing: {}",
            missing.join(", ")
        )));
    }

    let power_state = display_value(&system["PowerState"]);
    let status = display_value(&system["Status"]);
    tracing::info!(power_state = %power_state, status = %status, "system info");

    Ok(CheckOutcome::passed(format!(
        "PowerState: {power_state}, Status: {status}"
    )))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
