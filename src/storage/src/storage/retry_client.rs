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
use crate::client_options::ClientOptions;
use crate::http_response::EmptyResponse;
use crate::model::{BucketMetadata, ObjectAccessControl, ObjectMetadata};
use crate::object_write_stream::{ObjectUploader, ObjectWriteStream};
use crate::raw_client::RawClient;
use crate::requests::*;
use gax::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use gax::retry_loop_internal::retry_loop;
use gax::retry_policy::{RetryPolicy, RetryPolicyArg};
use std::future::Future;
use std::sync::Arc;

/// A decorator that retries failed operations.
///
/// Each call runs its own retry loop, concurrent calls do not share their
/// attempt counts or elapsed time budgets. Operations that return a permanent
/// error are not retried, operations that exhaust the retry policy return a
/// [PolicyExhausted][crate::StatusCode::PolicyExhausted] status with the last
/// error as its source.
///
/// Streaming uploads are atomic, if the upload fails the full contents are
/// sent again.
#[derive(Clone, Debug)]
pub struct RetryClient {
    inner: Arc<dyn RawClient>,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
}

impl RetryClient {
    /// Decorates `inner` with the default storage retry and backoff policies.
    pub fn new(inner: Arc<dyn RawClient>) -> Self {
        Self {
            inner,
            retry_policy: Arc::new(crate::retry_policy::storage_default()),
            backoff_policy: Arc::new(crate::backoff_policy::default()),
        }
    }

    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.retry_policy = v.into().into_inner();
        self
    }

    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.backoff_policy = v.into().into_inner();
        self
    }

    async fn retry<F, Fut, R>(&self, call: F) -> Result<R>
    where
        F: Fn() -> Fut + Send,
        Fut: Future<Output = Result<R>> + Send,
        R: Send,
    {
        retry_loop(
            move |_| call(),
            tokio::time::sleep,
            self.retry_policy.clone(),
            self.backoff_policy.clone(),
        )
        .await
    }
}

#[async_trait::async_trait]
impl RawClient for RetryClient {
    fn client_options(&self) -> &ClientOptions {
        self.inner.client_options()
    }

    async fn list_buckets(&self, request: &ListBucketsRequest) -> Result<ListBucketsResponse> {
        self.retry(|| self.inner.list_buckets(request)).await
    }

    async fn get_bucket_metadata(
        &self,
        request: &GetBucketMetadataRequest,
    ) -> Result<BucketMetadata> {
        self.retry(|| self.inner.get_bucket_metadata(request)).await
    }

    async fn insert_object_media(
        &self,
        request: &InsertObjectMediaRequest,
    ) -> Result<ObjectMetadata> {
        self.retry(|| self.inner.insert_object_media(request)).await
    }

    async fn get_object_metadata(
        &self,
        request: &GetObjectMetadataRequest,
    ) -> Result<ObjectMetadata> {
        self.retry(|| self.inner.get_object_metadata(request)).await
    }

    async fn read_object_range_media(
        &self,
        request: &ReadObjectRangeRequest,
    ) -> Result<ReadObjectRangeResponse> {
        self.retry(|| self.inner.read_object_range_media(request))
            .await
    }

    async fn write_object(
        &self,
        request: &InsertObjectStreamingRequest,
    ) -> Result<ObjectWriteStream> {
        let stream = self.retry(|| self.inner.write_object(request)).await?;
        let retry_policy = self.retry_policy.clone();
        let backoff_policy = self.backoff_policy.clone();
        Ok(stream.map_uploader(move |inner| {
            Box::new(RetryUploader {
                inner,
                retry_policy,
                backoff_policy,
            })
        }))
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListObjectsResponse> {
        self.retry(|| self.inner.list_objects(request)).await
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> Result<EmptyResponse> {
        self.retry(|| self.inner.delete_object(request)).await
    }

    async fn list_object_acl(
        &self,
        request: &ListObjectAclRequest,
    ) -> Result<ListObjectAclResponse> {
        self.retry(|| self.inner.list_object_acl(request)).await
    }

    async fn create_object_acl(
        &self,
        request: &CreateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        self.retry(|| self.inner.create_object_acl(request)).await
    }

    async fn delete_object_acl(&self, request: &ObjectAclRequest) -> Result<EmptyResponse> {
        self.retry(|| self.inner.delete_object_acl(request)).await
    }

    async fn get_object_acl(&self, request: &ObjectAclRequest) -> Result<ObjectAccessControl> {
        self.retry(|| self.inner.get_object_acl(request)).await
    }

    async fn update_object_acl(
        &self,
        request: &UpdateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        self.retry(|| self.inner.update_object_acl(request)).await
    }
}

/// Retries the upload of a [ObjectWriteStream], sending all the data on each
/// attempt.
#[derive(Debug)]
struct RetryUploader {
    inner: Box<dyn ObjectUploader>,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
}

#[async_trait::async_trait]
impl ObjectUploader for RetryUploader {
    async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata> {
        retry_loop(
            |_| self.inner.upload(contents.clone()),
            tokio::time::sleep,
            self.retry_policy.clone(),
            self.backoff_policy.clone(),
        )
        .await
    }
}
