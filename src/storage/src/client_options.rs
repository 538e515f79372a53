// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration for the storage raw client.
//!
//! [ClientOptions] is immutable once created. Use [ClientOptions::builder] to
//! create a new instance, the builder fills any unset option from the
//! environment or from the library defaults.
//!
//! # Example
//! ```
//! # use storage_raw_client::client_options::ClientOptions;
//! # fn sample() -> anyhow::Result<()> {
//! let options = ClientOptions::builder()
//!     .with_endpoint("https://private.googleapis.com")
//!     .with_project_id("my-project")
//!     .with_request_timeout(std::time::Duration::from_secs(30))
//!     .build()?;
//! assert_eq!(options.endpoint(), "https://private.googleapis.com");
//! # Ok(()) }
//! ```

use crate::credentials::Credentials;
use std::time::Duration;

/// The default endpoint for the service.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Overrides the default project.
pub const PROJECT_ENV_VAR: &str = "GOOGLE_CLOUD_PROJECT";
/// Overrides the default endpoint, typically to use a local emulator.
pub const EMULATOR_ENV_VAR: &str = "STORAGE_EMULATOR_HOST";
/// A comma-separated list of components with tracing enabled.
pub const TRACING_ENV_VAR: &str = "CLOUD_STORAGE_ENABLE_TRACING";

const RAW_CLIENT_COMPONENT: &str = "raw-client";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The errors returned by [ClientOptionsBuilder::build].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid endpoint `{0}`: {1}")]
    InvalidEndpoint(String, #[source] BoxError),
    #[error("invalid user agent prefix `{0}`")]
    InvalidUserAgent(String, #[source] http::header::InvalidHeaderValue),
}

/// The configuration for the storage raw client.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    endpoint: String,
    project_id: String,
    credentials: Credentials,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    user_agent_prefix: String,
    enable_raw_client_tracing: bool,
}

impl ClientOptions {
    /// Returns a builder initialized with the environment defaults.
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// The endpoint, such as `https://storage.googleapis.com`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The default project for operations that need one, may be empty.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns true if the raw client calls should be logged.
    pub fn enable_raw_client_tracing(&self) -> bool {
        self.enable_raw_client_tracing
    }

    /// The value for the `User-Agent` header.
    pub fn user_agent(&self) -> String {
        let suffix = format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        if self.user_agent_prefix.is_empty() {
            return suffix;
        }
        format!("{} {suffix}", self.user_agent_prefix)
    }
}

/// The library defaults, ignoring any environment variables.
impl std::default::Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: String::new(),
            credentials: Credentials::anonymous(),
            connect_timeout: None,
            request_timeout: None,
            user_agent_prefix: String::new(),
            enable_raw_client_tracing: false,
        }
    }
}

/// A builder for [ClientOptions].
#[derive(Clone, Debug, Default)]
pub struct ClientOptionsBuilder {
    endpoint: Option<String>,
    project_id: Option<String>,
    credentials: Option<Credentials>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    enable_raw_client_tracing: Option<bool>,
}

impl ClientOptionsBuilder {
    /// Sets the endpoint, overriding `STORAGE_EMULATOR_HOST`.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Sets the default project, overriding `GOOGLE_CLOUD_PROJECT`.
    pub fn with_project_id<V: Into<String>>(mut self, v: V) -> Self {
        self.project_id = Some(v.into());
        self
    }

    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.credentials = Some(v.into());
        self
    }

    /// Sets the timeout to establish new connections.
    pub fn with_connect_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.connect_timeout = Some(v.into());
        self
    }

    /// Sets the timeout for each attempt, the retry loop may make several
    /// attempts.
    pub fn with_request_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.request_timeout = Some(v.into());
        self
    }

    /// Prepends `v` to the `User-Agent` header.
    pub fn with_user_agent_prefix<V: Into<String>>(mut self, v: V) -> Self {
        self.user_agent_prefix = Some(v.into());
        self
    }

    /// Enables (or disables) logging of the raw client calls, overriding
    /// `CLOUD_STORAGE_ENABLE_TRACING`.
    pub fn with_raw_client_tracing(mut self, v: bool) -> Self {
        self.enable_raw_client_tracing = Some(v);
        self
    }

    pub fn build(self) -> Result<ClientOptions, Error> {
        let endpoint = self
            .endpoint
            .or_else(emulator_endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = validate_endpoint(endpoint)?;
        let user_agent_prefix = self.user_agent_prefix.unwrap_or_default();
        http::HeaderValue::from_str(&user_agent_prefix)
            .map_err(|e| Error::InvalidUserAgent(user_agent_prefix.clone(), e))?;
        Ok(ClientOptions {
            endpoint,
            project_id: self
                .project_id
                .or_else(|| std::env::var(PROJECT_ENV_VAR).ok())
                .unwrap_or_default(),
            credentials: self.credentials.unwrap_or_default(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            user_agent_prefix,
            enable_raw_client_tracing: self
                .enable_raw_client_tracing
                .unwrap_or_else(raw_client_tracing_from_env),
        })
    }
}

// Emulators are typically configured as `host:port`, without a scheme.
fn emulator_endpoint() -> Option<String> {
    let host = std::env::var(EMULATOR_ENV_VAR).ok()?;
    if host.is_empty() {
        return None;
    }
    if host.contains("://") {
        return Some(host);
    }
    Some(format!("http://{host}"))
}

fn validate_endpoint(endpoint: String) -> Result<String, Error> {
    let url = match url::Url::parse(&endpoint) {
        Ok(u) => u,
        Err(e) => return Err(Error::InvalidEndpoint(endpoint, e.into())),
    };
    if !matches!(url.scheme(), "http" | "https") {
        let message = format!("unsupported scheme `{}`", url.scheme());
        return Err(Error::InvalidEndpoint(endpoint, message.into()));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

fn raw_client_tracing_from_env() -> bool {
    std::env::var(TRACING_ENV_VAR)
        .map(|v| v.split(',').any(|c| c.trim() == RAW_CLIENT_COMPONENT))
        .unwrap_or(false)
}
