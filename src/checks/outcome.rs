//! Check identity and per-check results

use serde::Serialize;
use std::time::Duration;

/// The checks of a validation run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    Authentication,
    SystemInfo,
    PowerOn,
    PowerCycle,
    Thermal,
    CrossCheck,
}

impl Check {
    pub const ALL: [Check; 6] = [
        Check::Authentication,
        Check::SystemInfo,
        Check::PowerOn,
        Check::PowerCycle,
        Check::Thermal,
        Check::CrossCheck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::Authentication => "authentication",
            Check::SystemInfo => "system-info",
            Check::PowerOn => "power-on",
            Check::PowerCycle => "power-cycle",
            Check::Thermal => "thermal",
            Check::CrossCheck => "cross-check",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Check::Authentication => "Service root is reachable with the session token",
            Check::SystemInfo => "System resource reports PowerState and Status",
            Check::PowerOn => "Power-on request is accepted and the state is polled",
            Check::PowerCycle => "ForceOff followed by On are both accepted",
            Check::Thermal => "Temperature sensors are within thresholds",
            Check::CrossCheck => "Redfish and IPMI CPU temperatures agree",
        }
    }

    /// Whether the check changes host power state
    pub fn is_disruptive(&self) -> bool {
        matches!(self, Check::PowerOn | Check::PowerCycle)
    }

    /// `selected` (or every check when empty) minus `skipped`, in run order
    pub fn select(selected: &[Check], skipped: &[Check]) -> Vec<Check> {
        Check::ALL
            .into_iter()
            .filter(|c| selected.is_empty() || selected.contains(c))
            .filter(|c| !skipped.contains(c))
            .collect()
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed { detail: String },
    Skipped { reason: String },
    Failed { reason: String },
}

impl CheckOutcome {
    pub fn passed(detail: impl Into<String>) -> Self {
        CheckOutcome::Passed {
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        CheckOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        CheckOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CheckOutcome::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckOutcome::Passed { .. } => "PASSED",
            CheckOutcome::Skipped { .. } => "SKIPPED",
            CheckOutcome::Failed { .. } => "FAILED",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CheckOutcome::Passed { detail } => detail,
            CheckOutcome::Skipped { reason } | CheckOutcome::Failed { reason } => reason,
        }
    }
}

/// Result of running one check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub check: Check,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl CheckResult {
    pub fn new(check: Check, outcome: CheckOutcome, duration: Duration) -> Self {
        Self {
            check,
            outcome,
            duration,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {} ({}ms): {}",
            self.outcome.label(),
            self.check,
            self.duration.as_millis(),
            self.outcome.message()
        )
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
