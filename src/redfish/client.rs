//! Blocking HTTP client for the Redfish service.
//!
//! Every request goes through `send`, which attaches the session token once
//! one is set and buffers the body so checks can inspect the response
//! without holding the connection.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::RedfishConfig;
use crate::error::{RedfishError, RedfishResult};

/// Header carrying the Redfish session token
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Fully buffered response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json<T: DeserializeOwned>(&self) -> RedfishResult<T> {
        serde_json::from_str(&self.body).map_err(|source| RedfishError::InvalidJson {
            url: self.url.clone(),
            source,
        })
    }

    /// Body as a JSON object; non-object bodies are an error
    pub fn json_object(&self) -> RedfishResult<serde_json::Map<String, Value>> {
        self.json()
    }
}

#[derive(Debug, Clone)]
pub struct RedfishClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RedfishClient {
    /// Create an unauthenticated client for the configured service
    pub fn new(config: &RedfishConfig) -> RedfishResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("redfish-validate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RedfishError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Same connection settings, with every request carrying `token`
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resolve a resource path (or an absolute URL, as in `Location`) to a URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn get(&self, path: &str) -> RedfishResult<ApiResponse> {
        let url = self.url(path);
        self.send(Method::GET, url.clone(), self.http.get(&url))
    }

    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> RedfishResult<ApiResponse> {
        let url = self.url(path);
        let builder = self.http.post(&url).json(body);
        self.send(Method::POST, url, builder)
    }

    pub fn delete(&self, path: &str) -> RedfishResult<ApiResponse> {
        let url = self.url(path);
        self.send(Method::DELETE, url.clone(), self.http.delete(&url))
    }

    /// GET that must answer 200, decoded as JSON
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> RedfishResult<T> {
        let response = self.get(path)?;
        if !response.is_ok() {
            return Err(RedfishError::UnexpectedStatus {
                method: "GET",
                url: response.url,
                status: response.status.as_u16(),
            });
        }
        response.json()
    }

    fn send(
        &self,
        method: Method,
        url: String,
        mut builder: RequestBuilder,
    ) -> RedfishResult<ApiResponse> {
        let method_name = method_name(&method);
        if let Some(token) = &self.token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }

        let response = builder.send().map_err(|source| RedfishError::Transport {
            method: method_name,
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(|source| RedfishError::Transport {
            method: method_name,
            url: url.clone(),
            source,
        })?;

        tracing::debug!(
            method = method_name,
            url = %url,
            status = status.as_u16(),
            "redfish request"
        );

        Ok(ApiResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::DELETE => "DELETE",
        _ => "HTTP",
    }
}
