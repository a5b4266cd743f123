//! Redfish client, session and resource models

mod client;
mod models;
mod session;


pub use client::{ApiResponse, RedfishClient, AUTH_TOKEN_HEADER};
pub use models::{
    Collection, ComputerSystem, ODataLink, PowerState, ResetRequest, ResetType,
    SessionCredentials, SessionResource,
};
pub use session::{Session, SESSIONS_PATH};

pub const SERVICE_ROOT_PATH: &str = "/redfish/v1/";
pub const CHASSIS_PATH: &str = "/redfish/v1/Chassis";

/// Reset action endpoint of a computer system
pub fn reset_action_path(system_path: &str) -> String {
    format!("{system_path}/Actions/ComputerSystem.Reset")
}
