//! Error types for the Redfish client layer.
//!
//! Higher layers (checks, suite, commands) work with `anyhow::Result` and add
//! context; the client layer keeps typed errors so callers can tell a rejected
//! login apart from a transport failure.

use thiserror::Error;

use crate::redfish::ResetType;

pub type RedfishResult<T> = std::result::Result<T, RedfishError>;

#[derive(Debug, Error)]
pub enum RedfishError {
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("{method} {url} failed")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("Login failed: HTTP {status} {body}")]
    LoginRejected { status: u16, body: String },

    #[error("X-Auth-Token not found in login response")]
    MissingAuthToken,

    #[error("{reset} request rejected: HTTP {status} {body}")]
    ResetRejected {
        reset: ResetType,
        status: u16,
        body: String,
    },

    #[error("Invalid JSON in response from {url}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from invoking the external IPMI tool
#[derive(Debug, Error)]
pub enum IpmiError {
    #[error("IPMI tool '{0}' not found")]
    NotFound(String),

    #[error("Failed to spawn IPMI tool '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for IPMI tool '{command}'")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IPMI tool timed out after {0}s")]
    Timeout(u64),

    #[error("IPMI tool exited with code {code:?}: {stderr}")]
    ExitStatus { code: Option<i32>, stderr: String },
}
