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

//! Types and functions to authenticate requests.
//!
//! The storage client obtains one `Authorization` header value for each
//! request sent to the service. Applications can use [Credentials::anonymous]
//! to access public buckets, [Credentials::access_token] to use a token
//! obtained by other means, or implement [CredentialsProvider] to plug in their
//! own source of tokens.

use crate::Result;
use gax::error::{Status, StatusCode};
use std::sync::Arc;

/// Implemented by all sources of authorization headers.
#[async_trait::async_trait]
pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
    /// Returns the value for the `Authorization` header, if any.
    ///
    /// Failures are reported as non-retryable statuses.
    async fn authorization_header(&self) -> Result<Option<http::HeaderValue>>;
}

/// A cheap to clone handle to a [CredentialsProvider].
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Credentials that do not send any authorization header.
    pub fn anonymous() -> Self {
        Self::from(Anonymous)
    }

    /// Credentials that send `Bearer {token}` with each request.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::credentials::Credentials;
    /// let credentials = Credentials::access_token("ya29.some-token");
    /// ```
    pub fn access_token<T: Into<String>>(token: T) -> Self {
        Self::from(AccessToken {
            token: token.into(),
        })
    }

    /// Returns the value for the `Authorization` header, if any.
    ///
    /// Any failure is reported as [StatusCode::PermissionDenied], which the
    /// retry policies treat as permanent.
    ///
    /// [StatusCode::PermissionDenied]: gax::error::StatusCode::PermissionDenied
    pub async fn authorization_header(&self) -> Result<Option<http::HeaderValue>> {
        self.inner
            .authorization_header()
            .await
            .map_err(|e| match e.code() {
                StatusCode::PermissionDenied => e,
                _ => Status::authentication(e),
            })
    }
}

impl std::default::Default for Credentials {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[derive(Debug)]
struct Anonymous;

#[async_trait::async_trait]
impl CredentialsProvider for Anonymous {
    async fn authorization_header(&self) -> Result<Option<http::HeaderValue>> {
        Ok(None)
    }
}

struct AccessToken {
    token: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[censored]")
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for AccessToken {
    async fn authorization_header(&self) -> Result<Option<http::HeaderValue>> {
        let mut value = http::HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(Status::authentication)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = anyhow::Result<()>;

    #[tokio::test]
    async fn anonymous() -> TestResult {
        let credentials = Credentials::anonymous();
        assert_eq!(credentials.authorization_header().await?, None);
        let credentials = Credentials::default();
        assert_eq!(credentials.authorization_header().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn access_token() -> TestResult {
        let credentials = Credentials::access_token("test-token");
        let header = credentials.authorization_header().await?;
        let header = header.ok_or_else(|| anyhow::anyhow!("missing header"))?;
        assert_eq!(header.to_str()?, "Bearer test-token");
        assert!(header.is_sensitive());
        Ok(())
    }

    #[tokio::test]
    async fn access_token_invalid() {
        let credentials = Credentials::access_token("bad\ntoken");
        let status = credentials.authorization_header().await.unwrap_err();
        assert_eq!(status.code(), StatusCode::PermissionDenied);
        assert!(
            status.as_inner::<http::header::InvalidHeaderValue>().is_some(),
            "{status:?}"
        );
    }

    #[test]
    fn debug_hides_token() {
        let credentials = Credentials::access_token("secret-token");
        let fmt = format!("{credentials:?}");
        assert!(!fmt.contains("secret-token"), "{fmt}");
        assert!(fmt.contains("[censored]"), "{fmt}");
    }

    #[derive(Debug)]
    struct Failing;

    #[async_trait::async_trait]
    impl CredentialsProvider for Failing {
        async fn authorization_header(&self) -> Result<Option<http::HeaderValue>> {
            Err(Status::authentication("cannot fetch token"))
        }
    }

    #[tokio::test]
    async fn custom() {
        let credentials = Credentials::from(Failing);
        let status = credentials.authorization_header().await.unwrap_err();
        assert_eq!(status.code(), StatusCode::PermissionDenied);
        assert_eq!(status.message(), Status::authentication("cannot fetch token").message());
    }

    #[derive(Debug)]
    struct Unavailable;

    #[async_trait::async_trait]
    impl CredentialsProvider for Unavailable {
        async fn authorization_header(&self) -> Result<Option<http::HeaderValue>> {
            Err(Status::io("token endpoint unavailable"))
        }
    }

    #[tokio::test]
    async fn custom_transient_is_permission_denied() {
        let credentials = Credentials::from(Unavailable);
        let status = credentials.authorization_header().await.unwrap_err();
        assert_eq!(status.code(), StatusCode::PermissionDenied, "{status:?}");
        let inner = status.as_inner::<Status>();
        assert_eq!(
            inner.map(Status::code),
            Some(StatusCode::TransientFailure),
            "{status:?}"
        );
    }
}
