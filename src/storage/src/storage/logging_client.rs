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
use gax::error::Status;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;

/// Responses longer than this are truncated in the logs.
pub const MAX_LOGGED_RESPONSE: usize = 512;

const LOG_TARGET: &str = "storage_raw_client::logging";

/// A decorator that logs each operation and its outcome.
///
/// Emits one `INFO` event before calling the inner client, with the
/// `operation` name and the `request`, and another event after the call
/// completes, with the `operation`, its `status`, and a summary of the
/// `response`. The events use the `storage_raw_client::logging` target. The
/// decorator never changes the outcome of the operation.
#[derive(Clone, Debug)]
pub struct LoggingClient {
    inner: Arc<dyn RawClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn RawClient>) -> Self {
        Self { inner }
    }
}

async fn log_call<R, T, F>(operation: &'static str, request: &R, call: F) -> Result<T>
where
    R: Display + Sync + ?Sized,
    T: Debug + Send,
    F: Future<Output = Result<T>> + Send,
{
    tracing::info!(target: LOG_TARGET, operation, request = %request, "raw client call");
    let result = call.await;
    match &result {
        Ok(response) => tracing::info!(
            target: LOG_TARGET,
            operation,
            status = %Status::ok(),
            response = %truncate(format!("{response:?}")),
            "raw client call complete"
        ),
        Err(status) => tracing::info!(
            target: LOG_TARGET,
            operation,
            %status,
            "raw client call complete"
        ),
    }
    result
}

fn truncate(mut text: String) -> String {
    if let Some((end, _)) = text.char_indices().nth(MAX_LOGGED_RESPONSE) {
        text.truncate(end);
        text.push_str("...");
    }
    text
}

#[async_trait::async_trait]
impl RawClient for LoggingClient {
    fn client_options(&self) -> &ClientOptions {
        self.inner.client_options()
    }

    async fn list_buckets(&self, request: &ListBucketsRequest) -> Result<ListBucketsResponse> {
        log_call("list_buckets", request, self.inner.list_buckets(request)).await
    }

    async fn get_bucket_metadata(
        &self,
        request: &GetBucketMetadataRequest,
    ) -> Result<BucketMetadata> {
        log_call(
            "get_bucket_metadata",
            request,
            self.inner.get_bucket_metadata(request),
        )
        .await
    }

    async fn insert_object_media(
        &self,
        request: &InsertObjectMediaRequest,
    ) -> Result<ObjectMetadata> {
        log_call(
            "insert_object_media",
            request,
            self.inner.insert_object_media(request),
        )
        .await
    }

    async fn get_object_metadata(
        &self,
        request: &GetObjectMetadataRequest,
    ) -> Result<ObjectMetadata> {
        log_call(
            "get_object_metadata",
            request,
            self.inner.get_object_metadata(request),
        )
        .await
    }

    async fn read_object_range_media(
        &self,
        request: &ReadObjectRangeRequest,
    ) -> Result<ReadObjectRangeResponse> {
        log_call(
            "read_object_range_media",
            request,
            self.inner.read_object_range_media(request),
        )
        .await
    }

    async fn write_object(
        &self,
        request: &InsertObjectStreamingRequest,
    ) -> Result<ObjectWriteStream> {
        let stream = log_call("write_object", request, self.inner.write_object(request)).await?;
        let request = request.to_string();
        Ok(stream.map_uploader(move |inner| Box::new(LoggingUploader { inner, request })))
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListObjectsResponse> {
        log_call("list_objects", request, self.inner.list_objects(request)).await
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> Result<EmptyResponse> {
        log_call("delete_object", request, self.inner.delete_object(request)).await
    }

    async fn list_object_acl(
        &self,
        request: &ListObjectAclRequest,
    ) -> Result<ListObjectAclResponse> {
        log_call(
            "list_object_acl",
            request,
            self.inner.list_object_acl(request),
        )
        .await
    }

    async fn create_object_acl(
        &self,
        request: &CreateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        log_call(
            "create_object_acl",
            request,
            self.inner.create_object_acl(request),
        )
        .await
    }

    async fn delete_object_acl(&self, request: &ObjectAclRequest) -> Result<EmptyResponse> {
        log_call(
            "delete_object_acl",
            request,
            self.inner.delete_object_acl(request),
        )
        .await
    }

    async fn get_object_acl(&self, request: &ObjectAclRequest) -> Result<ObjectAccessControl> {
        log_call("get_object_acl", request, self.inner.get_object_acl(request)).await
    }

    async fn update_object_acl(
        &self,
        request: &UpdateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        log_call(
            "update_object_acl",
            request,
            self.inner.update_object_acl(request),
        )
        .await
    }
}

/// Logs the upload of a [ObjectWriteStream].
#[derive(Debug)]
struct LoggingUploader {
    inner: Box<dyn ObjectUploader>,
    request: String,
}

#[async_trait::async_trait]
impl ObjectUploader for LoggingUploader {
    async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata> {
        let request = format!("{}, contents.size={}", self.request, contents.len());
        log_call("write_object.close", request.as_str(), self.inner.upload(contents)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_write_stream::tests::FakeUploader;
    use crate::raw_client::mocks::mock_raw_client;
    use crate::well_known_parameters::UserProject;
    use crate::generic_request::GenericRequest;
    use gax::error::StatusCode;
    use pretty_assertions::assert_eq;
    use storage_test_utils::test_layer::TestLayer;

    type TestResult = anyhow::Result<()>;

    #[tokio::test]
    async fn logs_success() -> TestResult {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        mock.expect_get_object_metadata()
            .times(1)
            .returning(|_| Ok(ObjectMetadata::default().set_name("the-object-name")));
        let client = LoggingClient::new(Arc::new(mock));
        let request = GetObjectMetadataRequest::new("my-bucket", "my-object")
            .set_parameter(UserProject::new("my-project"));
        let got = client.get_object_metadata(&request).await?;
        assert_eq!(got.name, "the-object-name");

        let captured = events.with_target(LOG_TARGET);
        assert_eq!(captured.len(), 2, "{captured:?}");
        assert!(captured.iter().all(|e| e.level == tracing::Level::INFO));
        let start = &captured[0];
        assert_eq!(start.field("operation"), Some("get_object_metadata"));
        assert_eq!(start.field("request"), Some(request.to_string().as_str()));
        let end = &captured[1];
        assert_eq!(end.field("operation"), Some("get_object_metadata"));
        assert_eq!(end.field("status"), Some("OK"));
        let response = end.field("response").unwrap_or_default();
        assert!(response.contains("the-object-name"), "{response}");
        Ok(())
    }

    #[tokio::test]
    async fn logs_error() {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        mock.expect_delete_object()
            .times(1)
            .returning(|_| Err(Status::http(404, "no such object")));
        let client = LoggingClient::new(Arc::new(mock));
        let status = client
            .delete_object(&DeleteObjectRequest::new("b", "o"))
            .await
            .unwrap_err();
        assert_eq!(status, Status::http(404, "no such object"));

        let captured = events.with_target(LOG_TARGET);
        assert_eq!(captured.len(), 2, "{captured:?}");
        let end = &captured[1];
        let logged = end.field("status").unwrap_or_default();
        assert!(logged.contains("NOT_FOUND"), "{logged}");
        assert!(logged.contains("no such object"), "{logged}");
        assert_eq!(end.field("response"), None);
    }

    #[tokio::test]
    async fn logs_object_acl() -> TestResult {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        mock.expect_create_object_acl()
            .times(1)
            .returning(|r| Ok(ObjectAccessControl::default().set_entity(r.entity())));
        mock.expect_delete_object_acl()
            .times(1)
            .returning(|_| Ok(EmptyResponse));
        let client = LoggingClient::new(Arc::new(mock));
        let create = CreateObjectAclRequest::new("b", "o", "allUsers", "READER");
        client.create_object_acl(&create).await?;
        client
            .delete_object_acl(&ObjectAclRequest::new("b", "o", "allUsers"))
            .await?;

        let captured = events.with_target(LOG_TARGET);
        let operations: Vec<_> = captured
            .iter()
            .filter_map(|e| e.field("operation"))
            .collect();
        assert_eq!(
            operations,
            vec![
                "create_object_acl",
                "create_object_acl",
                "delete_object_acl",
                "delete_object_acl"
            ]
        );
        assert_eq!(captured[0].field("request"), Some(create.to_string().as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn one_start_and_end_per_call() -> TestResult {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        mock.expect_list_buckets()
            .times(3)
            .returning(|_| Ok(ListBucketsResponse::default()));
        let client = LoggingClient::new(Arc::new(mock));
        for _ in 0..3 {
            client
                .list_buckets(&ListBucketsRequest::new("my-project"))
                .await?;
        }
        let captured = events.with_target(LOG_TARGET);
        let starts = captured.iter().filter(|e| e.field("status").is_none()).count();
        let ends = captured.iter().filter(|e| e.field("status").is_some()).count();
        assert_eq!((starts, ends), (3, 3), "{captured:?}");
        Ok(())
    }

    #[tokio::test]
    async fn truncates_long_responses() -> TestResult {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        mock.expect_read_object_range_media()
            .times(1)
            .returning(|_| {
                Ok(ReadObjectRangeResponse {
                    contents: bytes::Bytes::from(vec![b'x'; 4 * MAX_LOGGED_RESPONSE]),
                    ..Default::default()
                })
            });
        let client = LoggingClient::new(Arc::new(mock));
        let got = client
            .read_object_range_media(&ReadObjectRangeRequest::new("b", "o", 0, 2048))
            .await?;
        assert_eq!(got.contents.len(), 4 * MAX_LOGGED_RESPONSE);

        let captured = events.with_target(LOG_TARGET);
        let response = captured[1].field("response").unwrap_or_default();
        assert!(response.ends_with("..."), "{response}");
        assert_eq!(response.chars().count(), MAX_LOGGED_RESPONSE + 3);
        Ok(())
    }

    #[test]
    fn truncate_boundaries() {
        let short = "a".repeat(MAX_LOGGED_RESPONSE);
        assert_eq!(truncate(short.clone()), short);
        let long = "é".repeat(MAX_LOGGED_RESPONSE + 1);
        let got = truncate(long);
        assert_eq!(got, format!("{}...", "é".repeat(MAX_LOGGED_RESPONSE)));
    }

    #[tokio::test]
    async fn logs_upload() -> TestResult {
        let (_guard, events) = TestLayer::initialize();
        let mut mock = mock_raw_client();
        let uploader = std::sync::Mutex::new(Some(FakeUploader::new(vec![Err(Status::http(
            503,
            "unavailable",
        ))])));
        mock.expect_write_object().times(1).returning(move |_| {
            let uploader = uploader
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| Status::new(StatusCode::Unknown, "called twice"))?;
            Ok(ObjectWriteStream::new(Box::new(uploader)))
        });
        let client = LoggingClient::new(Arc::new(mock));
        let mut stream = client
            .write_object(&InsertObjectStreamingRequest::new("b", "o"))
            .await?;
        stream.write("12345");
        let status = stream.close().await.unwrap_err();
        assert_eq!(status.code(), StatusCode::TransientFailure);

        let captured = events.with_target(LOG_TARGET);
        assert_eq!(captured.len(), 4, "{captured:?}");
        assert_eq!(captured[2].field("operation"), Some("write_object.close"));
        let request = captured[2].field("request").unwrap_or_default();
        assert!(request.contains("contents.size=5"), "{request}");
        Ok(())
    }

    #[test]
    fn client_options() {
        let client = LoggingClient::new(Arc::new(mock_raw_client()));
        assert_eq!(
            client.client_options().endpoint(),
            crate::client_options::DEFAULT_ENDPOINT
        );
    }
}
