//! Power transition checks

use anyhow::Result;

use super::{CheckContext, CheckOutcome};
use crate::power::{PowerController, Transition};
use crate::redfish::PowerState;

fn controller<'a>(ctx: &'a CheckContext<'_>) -> PowerController<'a> {
    PowerController::new(
        ctx.session.client(),
        ctx.config.redfish.system_path(),
        &ctx.config.power,
        ctx.clock,
    )
}

fn state_name(state: Option<&PowerState>) -> &str {
    state.map_or("<missing>", PowerState::as_str)
}

pub(super) fn power_on(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let report = controller(ctx).power_on()?;
    let initial = state_name(report.initial.as_ref());
    let prefix = if report.forced_off {
        "ForceOff then On"
    } else {
        "On"
    };

    match &report.transition {
        Transition::Observed { state, attempts } => Ok(CheckOutcome::passed(format!(
            "{prefix} accepted (HTTP {}); {initial} -> {} after {attempts} poll(s)",
            report.status.as_u16(),
            state_name(state.as_ref())
        ))),
        Transition::NotObserved { last, attempts } => {
            let last = state_name(last.as_ref());
            tracing::warn!(
                initial,
                last,
                attempts,
                "no power state change observed after power-on"
            );
            if ctx.config.power.strict {
                Ok(CheckOutcome::failed(format!(
                    "{prefix} accepted but PowerState stayed {last} after {attempts} poll(s)"
                )))
            } else {
                Ok(CheckOutcome::passed(format!(
                    "{prefix} accepted (HTTP {}); no state change observed ({initial} -> {last})",
                    report.status.as_u16()
                )))
            }
        }
    }
}

pub(super) fn power_cycle(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let report = controller(ctx).power_cycle()?;
    Ok(CheckOutcome::passed(format!(
        "ForceOff (HTTP {}) and On (HTTP {}) accepted; final PowerState: {}",
        report.off_status.as_u16(),
        report.on_status.as_u16(),
        state_name(report.final_state.as_ref())
    )))
}
