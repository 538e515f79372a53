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

//! The terminal node of the raw client stack.
//!
//! [HttpClient] sends each request to the JSON API endpoint and converts the
//! HTTP response with the matching [FromHttpResponse] implementation.

use crate::Result;
use crate::client_options::ClientOptions;
use crate::generic_request::{GenericRequest, RequestParameters};
use crate::http_response::{EmptyResponse, FromHttpResponse, HttpResponse};
use crate::model::{BucketMetadata, ObjectAccessControl, ObjectMetadata};
use crate::object_write_stream::{ObjectUploader, ObjectWriteStream};
use crate::raw_client::RawClient;
use crate::requests::*;
use gax::error::Status;
use std::sync::Arc;

/// The set of characters that are percent encoded in path segments.
///
/// Encode the following characters when they appear in either the object name
/// or query string of a request URL:
///     !, #, $, &, ', (, ), *, +, ,, /, :, ;, =, ?, @, [, ], and space characters.
const ENCODED_CHARS: percent_encoding::AsciiSet = percent_encoding::CONTROLS
    .add(b'!')
    .add(b'#')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b' ');

/// Percent encode a path segment.
pub(crate) fn enc(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, &ENCODED_CHARS).to_string()
}

/// Sends requests over HTTP.
///
/// Cloning is cheap, all clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Arc<HttpInner>,
}

#[derive(Debug)]
struct HttpInner {
    client: reqwest::Client,
    options: ClientOptions,
}

impl HttpClient {
    /// Creates a new client, the connection pool is created lazily.
    pub fn new(options: ClientOptions) -> std::result::Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent());
        if let Some(timeout) = options.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = options.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            inner: Arc::new(HttpInner { client, options }),
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        fixed: &[(&str, &str)],
        parameters: &RequestParameters,
    ) -> reqwest::RequestBuilder {
        let mut pairs: Vec<(&str, &str)> = fixed.to_vec();
        for (key, value) in parameters.iter() {
            pairs.push((key, value));
        }
        let query = gax::query_parameter::encode(pairs);
        let mut url = format!("{}{path}", self.inner.options.endpoint());
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        self.inner.client.request(method, url)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<HttpResponse> {
        let builder = match self.inner.options.credentials().authorization_header().await? {
            Some(header) => builder.header(http::header::AUTHORIZATION, header),
            None => builder,
        };
        let response = builder.send().await.map_err(map_send_error)?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let payload = response.bytes().await.map_err(map_send_error)?;
        let mut result = HttpResponse::new(status_code).with_payload(payload);
        result.headers = headers;
        Ok(result)
    }

    async fn execute<T: FromHttpResponse>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        T::from_http_response(response)
    }

    async fn upload_media(
        &self,
        bucket_name: &str,
        object_name: &str,
        parameters: &RequestParameters,
        contents: bytes::Bytes,
    ) -> Result<ObjectMetadata> {
        let builder = self
            .request(
                reqwest::Method::POST,
                &format!("/upload/storage/v1/b/{}/o", enc(bucket_name)),
                &[("uploadType", "media"), ("name", object_name)],
                parameters,
            )
            .header(http::header::CONTENT_TYPE, "application/octet-stream")
            .body(contents);
        self.execute(builder).await
    }

    fn object_path(bucket_name: &str, object_name: &str) -> String {
        format!("/storage/v1/b/{}/o/{}", enc(bucket_name), enc(object_name))
    }

    fn acl_path(bucket_name: &str, object_name: &str, entity: &str) -> String {
        format!(
            "{}/acl/{}",
            Self::object_path(bucket_name, object_name),
            enc(entity)
        )
    }
}

fn map_send_error(e: reqwest::Error) -> Status {
    if e.is_timeout() {
        return Status::timeout(e);
    }
    Status::io(e)
}

#[derive(Debug)]
struct HttpUploader {
    client: HttpClient,
    request: InsertObjectStreamingRequest,
}

#[async_trait::async_trait]
impl ObjectUploader for HttpUploader {
    async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata> {
        self.client
            .upload_media(
                self.request.bucket_name(),
                self.request.object_name(),
                self.request.parameters(),
                contents,
            )
            .await
    }
}

#[async_trait::async_trait]
impl RawClient for HttpClient {
    fn client_options(&self) -> &ClientOptions {
        &self.inner.options
    }

    async fn list_buckets(&self, request: &ListBucketsRequest) -> Result<ListBucketsResponse> {
        let project = match request.project_id() {
            "" => self.inner.options.project_id(),
            p => p,
        };
        if project.is_empty() {
            return Err(Status::invalid_argument(
                "list_buckets requires a project id, set it in the request or the client options",
            ));
        }
        let mut fixed = vec![("project", project)];
        if !request.page_token().is_empty() {
            fixed.push(("pageToken", request.page_token()));
        }
        let builder = self.request(
            reqwest::Method::GET,
            "/storage/v1/b",
            &fixed,
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn get_bucket_metadata(
        &self,
        request: &GetBucketMetadataRequest,
    ) -> Result<BucketMetadata> {
        let builder = self.request(
            reqwest::Method::GET,
            &format!("/storage/v1/b/{}", enc(request.bucket_name())),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn insert_object_media(
        &self,
        request: &InsertObjectMediaRequest,
    ) -> Result<ObjectMetadata> {
        self.upload_media(
            request.bucket_name(),
            request.object_name(),
            request.parameters(),
            request.contents().clone(),
        )
        .await
    }

    async fn get_object_metadata(
        &self,
        request: &GetObjectMetadataRequest,
    ) -> Result<ObjectMetadata> {
        let builder = self.request(
            reqwest::Method::GET,
            &Self::object_path(request.bucket_name(), request.object_name()),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn read_object_range_media(
        &self,
        request: &ReadObjectRangeRequest,
    ) -> Result<ReadObjectRangeResponse> {
        let range = request.range_header()?;
        let builder = self
            .request(
                reqwest::Method::GET,
                &Self::object_path(request.bucket_name(), request.object_name()),
                &[("alt", "media")],
                request.parameters(),
            )
            .header(http::header::RANGE, range);
        self.execute(builder).await
    }

    async fn write_object(
        &self,
        request: &InsertObjectStreamingRequest,
    ) -> Result<ObjectWriteStream> {
        // Fail early if the credentials cannot produce a header.
        let _ = self.inner.options.credentials().authorization_header().await?;
        Ok(ObjectWriteStream::new(Box::new(HttpUploader {
            client: self.clone(),
            request: request.clone(),
        })))
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListObjectsResponse> {
        let mut fixed = Vec::new();
        if !request.page_token().is_empty() {
            fixed.push(("pageToken", request.page_token()));
        }
        let builder = self.request(
            reqwest::Method::GET,
            &format!("/storage/v1/b/{}/o", enc(request.bucket_name())),
            &fixed,
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> Result<EmptyResponse> {
        let builder = self.request(
            reqwest::Method::DELETE,
            &Self::object_path(request.bucket_name(), request.object_name()),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn list_object_acl(
        &self,
        request: &ListObjectAclRequest,
    ) -> Result<ListObjectAclResponse> {
        let builder = self.request(
            reqwest::Method::GET,
            &format!(
                "{}/acl",
                Self::object_path(request.bucket_name(), request.object_name())
            ),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn create_object_acl(
        &self,
        request: &CreateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        let builder = self
            .request(
                reqwest::Method::POST,
                &format!(
                    "{}/acl",
                    Self::object_path(request.bucket_name(), request.object_name())
                ),
                &[],
                request.parameters(),
            )
            .json(&serde_json::json!({
                "entity": request.entity(),
                "role": request.role(),
            }));
        self.execute(builder).await
    }

    async fn delete_object_acl(&self, request: &ObjectAclRequest) -> Result<EmptyResponse> {
        let builder = self.request(
            reqwest::Method::DELETE,
            &Self::acl_path(
                request.bucket_name(),
                request.object_name(),
                request.entity(),
            ),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn get_object_acl(&self, request: &ObjectAclRequest) -> Result<ObjectAccessControl> {
        let builder = self.request(
            reqwest::Method::GET,
            &Self::acl_path(
                request.bucket_name(),
                request.object_name(),
                request.entity(),
            ),
            &[],
            request.parameters(),
        );
        self.execute(builder).await
    }

    async fn update_object_acl(
        &self,
        request: &UpdateObjectAclRequest,
    ) -> Result<ObjectAccessControl> {
        let builder = self
            .request(
                reqwest::Method::PUT,
                &Self::acl_path(
                    request.bucket_name(),
                    request.object_name(),
                    request.entity(),
                ),
                &[],
                request.parameters(),
            )
            .json(&serde_json::json!({
                "entity": request.entity(),
                "role": request.role(),
            }));
        self.execute(builder).await
    }
}
