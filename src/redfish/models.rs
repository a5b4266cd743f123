//! Redfish resource payloads used by the suite

use serde::{Deserialize, Serialize};

/// `PowerState` of a ComputerSystem resource.
///
/// Values outside the schema are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PowerState {
    On,
    Off,
    PoweringOn,
    PoweringOff,
    Paused,
    /// OpenBMC reports this while the host is coming up
    TransitioningToOn,
    Other(String),
}

impl PowerState {
    pub fn as_str(&self) -> &str {
        match self {
            PowerState::On => "On",
            PowerState::Off => "Off",
            PowerState::PoweringOn => "PoweringOn",
            PowerState::PoweringOff => "PoweringOff",
            PowerState::Paused => "Paused",
            PowerState::TransitioningToOn => "TransitioningToOn",
            PowerState::Other(s) => s,
        }
    }

    /// States that count as a successful power-on target
    pub fn is_powering_on(&self) -> bool {
        matches!(self, PowerState::On | PowerState::TransitioningToOn)
    }
}

impl From<String> for PowerState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "On" => PowerState::On,
            "Off" => PowerState::Off,
            "PoweringOn" => PowerState::PoweringOn,
            "PoweringOff" => PowerState::PoweringOff,
            "Paused" => PowerState::Paused,
            "TransitioningToOn" => PowerState::TransitioningToOn,
            _ => PowerState::Other(value),
        }
    }
}

impl From<PowerState> for String {
    fn from(value: PowerState) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `ResetType` parameter of `ComputerSystem.Reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    ForceOn,
    PowerCycle,
    Nmi,
    PushPowerButton,
}

impl std::fmt::Display for ResetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResetType::On => "On",
            ResetType::ForceOff => "ForceOff",
            ResetType::GracefulShutdown => "GracefulShutdown",
            ResetType::GracefulRestart => "GracefulRestart",
            ResetType::ForceRestart => "ForceRestart",
            ResetType::ForceOn => "ForceOn",
            ResetType::PowerCycle => "PowerCycle",
            ResetType::Nmi => "Nmi",
            ResetType::PushPowerButton => "PushPowerButton",
        };
        write!(f, "{name}")
    }
}

/// Body of a `ComputerSystem.Reset` action
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResetRequest {
    #[serde(rename = "ResetType")]
    pub reset_type: ResetType,
}

/// Body of a session login request
#[derive(Debug, Clone, Serialize)]
pub struct SessionCredentials<'a> {
    #[serde(rename = "UserName")]
    pub username: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
}

/// Session resource returned on login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionResource {
    #[serde(rename = "Id")]
    pub id: Option<String>,
}

/// Subset of the ComputerSystem resource the suite reads
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerSystem {
    #[serde(rename = "PowerState")]
    pub power_state: Option<PowerState>,
}

/// `{"@odata.id": "..."}` navigation link
#[derive(Debug, Clone, Deserialize)]
pub struct ODataLink {
    #[serde(rename = "@odata.id")]
    pub odata_id: Option<String>,
}

/// Any Redfish resource collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(rename = "Members", default)]
    pub members: Vec<ODataLink>,
}

impl Collection {
    /// Last path segment of the first member, e.g. `chassis` for
    /// `/redfish/v1/Chassis/chassis`
    pub fn first_member_id(&self) -> Option<&str> {
        let uri = self.members.first()?.odata_id.as_deref()?;
        uri.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }
}
