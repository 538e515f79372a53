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

use crate::Result;
use crate::client_options::{self, ClientOptions, ClientOptionsBuilder};
use crate::credentials::Credentials;
use crate::http_response::EmptyResponse;
use crate::model::{BucketMetadata, ObjectMetadata};
use crate::object_write_stream::ObjectWriteStream;
use crate::raw_client::RawClient;
use crate::requests::*;
use crate::storage::{HttpClient, LoggingClient, RetryClient};
use gax::backoff_policy::BackoffPolicyArg;
use gax::paginator::Paginator;
use gax::retry_policy::RetryPolicyArg;
use std::sync::Arc;
use std::time::Duration;

/// Implements a client for the storage JSON API.
///
/// # Example
/// ```
/// # use storage_raw_client::client::Storage;
/// # async fn sample() -> anyhow::Result<()> {
/// let client = Storage::builder().with_project_id("my-project").build()?;
/// let object = client.get_object_metadata("my-bucket", "my-object").await?;
/// println!("object={object:?}");
/// # Ok(()) }
/// ```
///
/// # Configuration
///
/// To configure `Storage` use the `with_*` methods in the type returned
/// by [builder()][Storage::builder]. The default configuration should
/// work for most applications. Common configuration changes include
///
/// * [with_endpoint()]: by default this client uses the global endpoint
///   (`https://storage.googleapis.com`), or the value of
///   `STORAGE_EMULATOR_HOST` when set.
/// * [with_credentials()]: by default this client uses anonymous credentials.
///
/// # Pooling and Cloning
///
/// `Storage` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Storage` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// [with_endpoint()]: ClientBuilder::with_endpoint
/// [with_credentials()]: ClientBuilder::with_credentials
#[derive(Clone, Debug)]
pub struct Storage {
    inner: Arc<dyn RawClient>,
}

impl Storage {
    /// Returns a builder for [Storage].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client on top of any [RawClient] stack.
    ///
    /// Useful in tests, or to compose a custom chain of decorators.
    pub fn from_raw(inner: Arc<dyn RawClient>) -> Self {
        Self { inner }
    }

    /// The raw client stack used by this client.
    ///
    /// Use it to send requests with optional parameters.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// use storage_raw_client::generic_request::GenericRequest;
    /// use storage_raw_client::requests::GetObjectMetadataRequest;
    /// use storage_raw_client::well_known_parameters::Generation;
    /// # async fn sample(client: &Storage) -> anyhow::Result<()> {
    /// let request = GetObjectMetadataRequest::new("my-bucket", "my-object")
    ///     .set_parameter(Generation::new(1234));
    /// let object = client.raw().get_object_metadata(&request).await?;
    /// # Ok(()) }
    /// ```
    pub fn raw(&self) -> &Arc<dyn RawClient> {
        &self.inner
    }

    pub fn client_options(&self) -> &ClientOptions {
        self.inner.client_options()
    }

    /// Lists the buckets in a project, following the continuation tokens.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// use storage_raw_client::requests::ListBucketsRequest;
    /// # async fn sample(client: &Storage) -> anyhow::Result<()> {
    /// let mut pages = client.list_buckets(ListBucketsRequest::new("my-project"));
    /// while let Some(page) = pages.next().await {
    ///     for bucket in page?.items {
    ///         println!("{}", bucket.name);
    ///     }
    /// }
    /// # Ok(()) }
    /// ```
    pub fn list_buckets(&self, request: ListBucketsRequest) -> Paginator<ListBucketsResponse> {
        let inner = self.inner.clone();
        let seed = request.page_token().to_string();
        let execute = move |token: String| {
            let inner = inner.clone();
            let request = request.clone().set_page_token(token);
            async move { inner.list_buckets(&request).await }
        };
        Paginator::new(seed, execute)
    }

    pub async fn get_bucket_metadata<B>(&self, bucket_name: B) -> Result<BucketMetadata>
    where
        B: Into<String>,
    {
        self.inner
            .get_bucket_metadata(&GetBucketMetadataRequest::new(bucket_name))
            .await
    }

    /// Creates an object with the given contents.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// # async fn sample(client: &Storage) -> anyhow::Result<()> {
    /// let object = client.insert_object("my-bucket", "my-object", "hello world").await?;
    /// assert_eq!(object.size, 11);
    /// # Ok(()) }
    /// ```
    pub async fn insert_object<B, O, C>(
        &self,
        bucket_name: B,
        object_name: O,
        contents: C,
    ) -> Result<ObjectMetadata>
    where
        B: Into<String>,
        O: Into<String>,
        C: Into<bytes::Bytes>,
    {
        let request = InsertObjectMediaRequest::new(bucket_name, object_name, contents);
        self.inner.insert_object_media(&request).await
    }

    pub async fn get_object_metadata<B, O>(
        &self,
        bucket_name: B,
        object_name: O,
    ) -> Result<ObjectMetadata>
    where
        B: Into<String>,
        O: Into<String>,
    {
        let request = GetObjectMetadataRequest::new(bucket_name, object_name);
        self.inner.get_object_metadata(&request).await
    }

    /// Reads the bytes in `[begin, end)` from an object.
    pub async fn read_object_range<B, O>(
        &self,
        bucket_name: B,
        object_name: O,
        begin: u64,
        end: u64,
    ) -> Result<ReadObjectRangeResponse>
    where
        B: Into<String>,
        O: Into<String>,
    {
        let request = ReadObjectRangeRequest::new(bucket_name, object_name, begin, end);
        self.inner.read_object_range_media(&request).await
    }

    /// Starts a new object upload, see [ObjectWriteStream].
    pub async fn write_object<B, O>(
        &self,
        bucket_name: B,
        object_name: O,
    ) -> Result<ObjectWriteStream>
    where
        B: Into<String>,
        O: Into<String>,
    {
        let request = InsertObjectStreamingRequest::new(bucket_name, object_name);
        self.inner.write_object(&request).await
    }

    /// Lists the objects in a bucket, following the continuation tokens.
    pub fn list_objects(&self, request: ListObjectsRequest) -> Paginator<ListObjectsResponse> {
        let inner = self.inner.clone();
        let seed = request.page_token().to_string();
        let execute = move |token: String| {
            let inner = inner.clone();
            let request = request.clone().set_page_token(token);
            async move { inner.list_objects(&request).await }
        };
        Paginator::new(seed, execute)
    }

    pub async fn delete_object<B, O>(&self, bucket_name: B, object_name: O) -> Result<EmptyResponse>
    where
        B: Into<String>,
        O: Into<String>,
    {
        let request = DeleteObjectRequest::new(bucket_name, object_name);
        self.inner.delete_object(&request).await
    }
}

/// The errors returned by [ClientBuilder::build].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum BuilderError {
    #[error("invalid client configuration: {0}")]
    Config(#[from] client_options::Error),
    #[error("cannot create the HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A builder for [Storage].
///
/// ```
/// # use storage_raw_client::client::Storage;
/// # fn sample() -> anyhow::Result<()> {
/// let client = Storage::builder()
///     .with_endpoint("https://storage.googleapis.com")
///     .with_logging(true)
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    options: ClientOptionsBuilder,
    retry_policy: Option<RetryPolicyArg>,
    backoff_policy: Option<BackoffPolicyArg>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            options: ClientOptions::builder(),
            retry_policy: None,
            backoff_policy: None,
        }
    }

    /// Creates a new client.
    ///
    /// The stack is an [HttpClient] wrapped by a [RetryClient]. If logging is
    /// enabled a [LoggingClient] sits between the two, so every attempt,
    /// including retries, is logged.
    pub fn build(self) -> std::result::Result<Storage, BuilderError> {
        tracing::info!("builder={self:?}");
        let options = self.options.build()?;
        let logging = options.enable_raw_client_tracing();
        let http: Arc<dyn RawClient> = Arc::new(HttpClient::new(options)?);
        let inner: Arc<dyn RawClient> = if logging {
            Arc::new(LoggingClient::new(http))
        } else {
            http
        };
        let mut retry = RetryClient::new(inner);
        if let Some(p) = self.retry_policy {
            retry = retry.with_retry_policy(p);
        }
        if let Some(p) = self.backoff_policy {
            retry = retry.with_backoff_policy(p);
        }
        Ok(Storage::from_raw(Arc::new(retry)))
    }

    /// Sets the endpoint.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = Storage::builder()
    ///     .with_endpoint("https://private.googleapis.com")
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.options = self.options.with_endpoint(v);
        self
    }

    /// Sets the default project for [Storage::list_buckets].
    pub fn with_project_id<V: Into<String>>(mut self, v: V) -> Self {
        self.options = self.options.with_project_id(v);
        self
    }

    /// Configures the authentication credentials.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// use storage_raw_client::credentials::Credentials;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = Storage::builder()
    ///     .with_credentials(Credentials::access_token("my-token"))
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.options = self.options.with_credentials(v);
        self
    }

    pub fn with_connect_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.options = self.options.with_connect_timeout(v);
        self
    }

    /// Sets the timeout for each attempt.
    pub fn with_request_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.options = self.options.with_request_timeout(v);
        self
    }

    pub fn with_user_agent_prefix<V: Into<String>>(mut self, v: V) -> Self {
        self.options = self.options.with_user_agent_prefix(v);
        self
    }

    /// Configure the retry policy.
    ///
    /// The client uses the retry policy to classify errors (e.g. is this a
    /// transient error and should be retried, or is it a permanent error), and
    /// to limit the number of attempts and the total time spent retrying.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::client::Storage;
    /// use storage_raw_client::retry_policy::RetryableErrors;
    /// use gax::retry_policy::RetryPolicyExt;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = Storage::builder()
    ///     .with_retry_policy(RetryableErrors.with_attempt_limit(3))
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.retry_policy = Some(v.into());
        self
    }

    /// Configure the retry backoff policy.
    ///
    /// The client uses the backoff policy to determine how long to wait after
    /// each failed attempt.
    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.backoff_policy = Some(v.into());
        self
    }

    /// Enables (or disables) the logging decorator, overriding
    /// `CLOUD_STORAGE_ENABLE_TRACING`.
    pub fn with_logging(mut self, v: bool) -> Self {
        self.options = self.options.with_raw_client_tracing(v);
        self
    }
}
