//! Power-state transitions through `ComputerSystem.Reset`.
//!
//! Acceptance is lenient by default: a reset request answered with 200, 202
//! or 204 is a success even when the polled `PowerState` never moves, since
//! emulated hosts (QEMU) often cannot complete the transition.


use reqwest::StatusCode;

use crate::config::PowerConfig;
use crate::error::{RedfishError, RedfishResult};
use crate::poll::{Clock, PollOutcome};
use crate::redfish::{
    reset_action_path, ComputerSystem, PowerState, RedfishClient, ResetRequest, ResetType,
};

/// Status codes that mean the BMC accepted a reset request
pub const ACCEPTED_STATUSES: [StatusCode; 3] =
    [StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT];

pub fn is_accepted(status: StatusCode) -> bool {
    ACCEPTED_STATUSES.contains(&status)
}

/// What the power-on poll saw after the On request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State moved away from the initial one or reached an On state
    Observed {
        state: Option<PowerState>,
        attempts: u32,
    },
    /// Poll budget spent without a change
    NotObserved {
        last: Option<PowerState>,
        attempts: u32,
    },
}

impl Transition {
    pub fn is_observed(&self) -> bool {
        matches!(self, Transition::Observed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerOnReport {
    pub initial: Option<PowerState>,
    /// A ForceOff was issued before the On request
    pub forced_off: bool,
    pub status: StatusCode,
    pub transition: Transition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerCycleReport {
    pub off_status: StatusCode,
    pub on_status: StatusCode,
    pub final_state: Option<PowerState>,
}

/// Drives reset actions against one computer system
pub struct PowerController<'a> {
    client: &'a RedfishClient,
    system_path: String,
    config: &'a PowerConfig,
    clock: &'a dyn Clock,
}

impl<'a> PowerController<'a> {
    pub fn new(
        client: &'a RedfishClient,
        system_path: impl Into<String>,
        config: &'a PowerConfig,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            client,
            system_path: system_path.into(),
            config,
            clock,
        }
    }

    /// Current `PowerState`, `None` when the resource omits it
    pub fn power_state(&self) -> RedfishResult<Option<PowerState>> {
        let system: ComputerSystem = self.client.get_json(&self.system_path)?;
        Ok(system.power_state)
    }

    /// Submit a reset action; non-accepted statuses are an error
    pub fn reset(&self, reset_type: ResetType) -> RedfishResult<StatusCode> {
        let path = reset_action_path(&self.system_path);
        let response = self.client.post_json(&path, &ResetRequest { reset_type })?;

        if !is_accepted(response.status) {
            return Err(RedfishError::ResetRejected {
                reset: reset_type,
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        tracing::info!(reset = %reset_type, status = response.status.as_u16(), "reset accepted");
        Ok(response.status)
    }

    fn needs_force_off(&self, initial: Option<&PowerState>) -> bool {
        match initial {
            Some(PowerState::Off) => false,
            Some(PowerState::On) => self.config.force_off_before_on,
            _ => true,
        }
    }

    /// Power the system on and wait for the state to move.
    ///
    /// Systems in an intermediate or unknown state are forced off first so
    /// the On request starts from a known point.
    pub fn power_on(&self) -> RedfishResult<PowerOnReport> {
        let initial = self.power_state()?;
        tracing::info!(
            state = initial.as_ref().map_or("<missing>", PowerState::as_str),
            "initial power state"
        );

        let forced_off = self.needs_force_off(initial.as_ref());
        if forced_off {
            tracing::info!("system not Off, forcing off before power-on");
            self.reset(ResetType::ForceOff)?;
            self.clock.sleep(self.config.settle());
        }

        let status = self.reset(ResetType::On)?;

        let policy = self.config.poll_policy();
        let outcome = policy.poll(
            self.clock,
            |attempt| {
                let state = self.power_state()?;
                tracing::info!(
                    attempt,
                    state = state.as_ref().map_or("<missing>", PowerState::as_str),
                    "polling power state"
                );
                Ok::<_, RedfishError>(state)
            },
            |state| *state != initial || state.as_ref().is_some_and(PowerState::is_powering_on),
        )?;

        let transition = match outcome {
            PollOutcome::Accepted {
                value, attempts, ..
            } => Transition::Observed {
                state: value,
                attempts,
            },
            PollOutcome::Exhausted { last, attempts, .. } => Transition::NotObserved {
                last: last.flatten(),
                attempts,
            },
        };

        Ok(PowerOnReport {
            initial,
            forced_off,
            status,
            transition,
        })
    }

    /// ForceOff, settle, On, then one delayed read of the resulting state
    pub fn power_cycle(&self) -> RedfishResult<PowerCycleReport> {
        let off_status = self.reset(ResetType::ForceOff)?;
        self.clock.sleep(self.config.settle());

        let on_status = self.reset(ResetType::On)?;

        let outcome = self.config.cycle_policy().poll(
            self.clock,
            |_| self.power_state(),
            |state| state.as_ref().is_some_and(PowerState::is_powering_on),
        )?;
        let final_state = outcome.last_value().cloned().flatten();

        tracing::info!(
            state = final_state.as_ref().map_or("<missing>", PowerState::as_str),
            "power state after cycle"
        );

        Ok(PowerCycleReport {
            off_status,
            on_status,
            final_state,
        })
    }
}
