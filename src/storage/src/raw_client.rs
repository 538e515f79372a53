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

//! Defines the contract implemented by every layer of the raw client.

use crate::Result;
use crate::client_options::ClientOptions;
use crate::http_response::EmptyResponse;
use crate::model::{BucketMetadata, ObjectAccessControl, ObjectMetadata};
use crate::object_write_stream::ObjectWriteStream;
use crate::requests::*;

/// The operations supported by the storage raw client.
///
/// The terminal implementation ([HttpClient][crate::storage::HttpClient])
/// sends each request to the service. The decorators
/// ([LoggingClient][crate::storage::LoggingClient] and
/// [RetryClient][crate::storage::RetryClient]) implement the same trait and
/// wrap another implementation, adding behavior to every operation without
/// changing the call sites.
///
/// Each call returns exactly one outcome, either the response or a
/// [Status][crate::Status] describing the failure. Implementations must be
/// safe to share between tasks, none of the implementations in this crate
/// keep any per-request state.
///
/// Applications may implement this trait to mock the client in their tests,
/// and then use [Storage::from_raw][crate::client::Storage::from_raw].
#[async_trait::async_trait]
pub trait RawClient: std::fmt::Debug + Send + Sync {
    /// The options used to configure this client.
    fn client_options(&self) -> &ClientOptions;

    async fn list_buckets(&self, request: &ListBucketsRequest) -> Result<ListBucketsResponse>;

    async fn get_bucket_metadata(
        &self,
        request: &GetBucketMetadataRequest,
    ) -> Result<BucketMetadata>;

    async fn insert_object_media(
        &self,
        request: &InsertObjectMediaRequest,
    ) -> Result<ObjectMetadata>;

    async fn get_object_metadata(
        &self,
        request: &GetObjectMetadataRequest,
    ) -> Result<ObjectMetadata>;

    /// Reads the `[begin, end)` range of an object.
    async fn read_object_range_media(
        &self,
        request: &ReadObjectRangeRequest,
    ) -> Result<ReadObjectRangeResponse>;

    /// Starts a streaming upload.
    ///
    /// Nothing is sent to the service until the stream is closed.
    async fn write_object(
        &self,
        request: &InsertObjectStreamingRequest,
    ) -> Result<ObjectWriteStream>;

    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListObjectsResponse>;

    async fn delete_object(&self, request: &DeleteObjectRequest) -> Result<EmptyResponse>;

    async fn list_object_acl(
        &self,
        request: &ListObjectAclRequest,
    ) -> Result<ListObjectAclResponse>;

    async fn create_object_acl(
        &self,
        request: &CreateObjectAclRequest,
    ) -> Result<ObjectAccessControl>;

    async fn delete_object_acl(&self, request: &ObjectAclRequest) -> Result<EmptyResponse>;

    async fn get_object_acl(&self, request: &ObjectAclRequest) -> Result<ObjectAccessControl>;

    async fn update_object_acl(
        &self,
        request: &UpdateObjectAclRequest,
    ) -> Result<ObjectAccessControl>;
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;

    mockall::mock! {
        #[derive(Debug)]
        pub RawClient {}

        #[async_trait::async_trait]
        impl crate::raw_client::RawClient for RawClient {
            fn client_options(&self) -> &ClientOptions;
            async fn list_buckets(&self, request: &ListBucketsRequest) -> Result<ListBucketsResponse>;
            async fn get_bucket_metadata(&self, request: &GetBucketMetadataRequest) -> Result<BucketMetadata>;
            async fn insert_object_media(&self, request: &InsertObjectMediaRequest) -> Result<ObjectMetadata>;
            async fn get_object_metadata(&self, request: &GetObjectMetadataRequest) -> Result<ObjectMetadata>;
            async fn read_object_range_media(&self, request: &ReadObjectRangeRequest) -> Result<ReadObjectRangeResponse>;
            async fn write_object(&self, request: &InsertObjectStreamingRequest) -> Result<ObjectWriteStream>;
            async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListObjectsResponse>;
            async fn delete_object(&self, request: &DeleteObjectRequest) -> Result<EmptyResponse>;
            async fn list_object_acl(&self, request: &ListObjectAclRequest) -> Result<ListObjectAclResponse>;
            async fn create_object_acl(&self, request: &CreateObjectAclRequest) -> Result<ObjectAccessControl>;
            async fn delete_object_acl(&self, request: &ObjectAclRequest) -> Result<EmptyResponse>;
            async fn get_object_acl(&self, request: &ObjectAclRequest) -> Result<ObjectAccessControl>;
            async fn update_object_acl(&self, request: &UpdateObjectAclRequest) -> Result<ObjectAccessControl>;
        }
    }

    /// A mock that reports the library default options.
    pub(crate) fn mock_raw_client() -> MockRawClient {
        let mut mock = MockRawClient::new();
        mock.expect_client_options()
            .return_const(ClientOptions::default());
        mock
    }
}
