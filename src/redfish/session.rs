//! Authenticated Redfish session lifecycle.
//!
//! A `Session` is created by a successful login and owns the session
//! resource URI. The resource is deleted exactly once: either by an explicit
//! `logout`, or when the session is dropped.

use reqwest::StatusCode;

use super::client::{RedfishClient, AUTH_TOKEN_HEADER};
use super::models::{SessionCredentials, SessionResource};
use crate::config::RedfishConfig;
use crate::error::{RedfishError, RedfishResult};

pub const SESSIONS_PATH: &str = "/redfish/v1/SessionService/Sessions";

#[derive(Debug)]
pub struct Session {
    client: RedfishClient,
    /// Session resource to DELETE on teardown; `None` once torn down
    resource: Option<String>,
}

impl Session {
    /// Log in with the configured credentials.
    ///
    /// Anything other than `201 Created` with a non-empty `X-Auth-Token`
    /// header is an error.
    pub fn login(config: &RedfishConfig) -> RedfishResult<Self> {
        let anonymous = RedfishClient::new(config)?;
        let credentials = SessionCredentials {
            username: &config.username,
            password: &config.password,
        };

        let response = anonymous.post_json(SESSIONS_PATH, &credentials)?;
        if response.status != StatusCode::CREATED {
            return Err(RedfishError::LoginRejected {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        let token = response
            .header(AUTH_TOKEN_HEADER)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RedfishError::MissingAuthToken)?
            .to_string();

        let resource = response
            .header("Location")
            .map(str::to_string)
            .or_else(|| {
                let body: SessionResource = response.json().unwrap_or_default();
                body.id.map(|id| format!("{SESSIONS_PATH}/{id}"))
            });

        if resource.is_none() {
            tracing::warn!("login response carried neither Location nor Id; session will not be deleted");
        }
        tracing::info!(session = resource.as_deref().unwrap_or("-"), "redfish session created");

        Ok(Self {
            client: anonymous.with_token(token),
            resource,
        })
    }

    /// Authenticated client; every request carries the session token
    pub fn client(&self) -> &RedfishClient {
        &self.client
    }

    pub fn token(&self) -> &str {
        self.client.token().unwrap_or_default()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Delete the session resource.
    ///
    /// Best effort: returns whether the BMC acknowledged the delete. Failures
    /// are logged, never propagated.
    pub fn logout(mut self) -> bool {
        self.close()
    }

    fn close(&mut self) -> bool {
        let Some(resource) = self.resource.take() else {
            return false;
        };

        match self.client.delete(&resource) {
            Ok(response) if response.status.is_success() => {
                tracing::info!(session = %resource, "redfish session deleted");
                true
            }
            Ok(response) => {
                tracing::warn!(
                    session = %resource,
                    status = response.status.as_u16(),
                    "failed to delete redfish session"
                );
                false
            }
            Err(e) => {
                tracing::warn!(session = %resource, error = %e, "failed to delete redfish session");
                false
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
