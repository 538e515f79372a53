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
use crate::error::ParseError;
use crate::generic_request::{RequestParameters, format_request, generic_request};
use crate::http_response::{FromHttpResponse, HttpResponse, check_status, content_range};
use crate::model::ObjectMetadata;
use gax::error::Status;

/// Uploads an object in a single request, the contents are held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertObjectMediaRequest {
    bucket_name: String,
    object_name: String,
    contents: bytes::Bytes,
    parameters: RequestParameters,
}

generic_request!(
    InsertObjectMediaRequest: IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    ContentEncoding,
    PredefinedAcl,
    Projection,
    UserProject,
);

impl InsertObjectMediaRequest {
    pub fn new<B, O, C>(bucket_name: B, object_name: O, contents: C) -> Self
    where
        B: Into<String>,
        O: Into<String>,
        C: Into<bytes::Bytes>,
    {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            contents: contents.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn contents(&self) -> &bytes::Bytes {
        &self.contents
    }

    /// Replaces the object contents.
    pub fn set_contents<C: Into<bytes::Bytes>>(mut self, v: C) -> Self {
        self.contents = v.into();
        self
    }
}

impl std::fmt::Display for InsertObjectMediaRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the size, the contents can be arbitrarily large.
        format_request(
            f,
            "InsertObjectMediaRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
                ("contents.size", &self.contents.len()),
            ],
            &self.parameters,
        )
    }
}

/// Fetches the metadata for an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetObjectMetadataRequest {
    bucket_name: String,
    object_name: String,
    parameters: RequestParameters,
}

generic_request!(
    GetObjectMetadataRequest: Generation,
    IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    Projection,
    UserProject,
);

impl GetObjectMetadataRequest {
    pub fn new<B: Into<String>, O: Into<String>>(bucket_name: B, object_name: O) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl std::fmt::Display for GetObjectMetadataRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "GetObjectMetadataRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
            ],
            &self.parameters,
        )
    }
}

/// Reads a range of bytes from an object.
///
/// The range is half-open: `begin` is the offset of the first byte returned,
/// `end` is one past the offset of the last byte returned.
///
/// # Example
/// ```
/// use storage_raw_client::requests::ReadObjectRangeRequest;
/// let request = ReadObjectRangeRequest::new("my-bucket", "my-object", 0, 1024);
/// assert_eq!(request.range_header().ok(), Some("bytes=0-1023".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadObjectRangeRequest {
    bucket_name: String,
    object_name: String,
    begin: u64,
    end: u64,
    parameters: RequestParameters,
}

generic_request!(
    ReadObjectRangeRequest: Generation,
    IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    UserProject,
);

impl ReadObjectRangeRequest {
    pub fn new<B: Into<String>, O: Into<String>>(
        bucket_name: B,
        object_name: O,
        begin: u64,
        end: u64,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            begin,
            end,
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// The value for the `Range` HTTP header.
    ///
    /// HTTP ranges are inclusive, an empty range cannot be expressed and
    /// results in an error.
    pub fn range_header(&self) -> Result<String> {
        if self.begin >= self.end {
            return Err(Status::invalid_argument(format!(
                "invalid range [{}, {}), the range must not be empty",
                self.begin, self.end
            )));
        }
        Ok(format!("bytes={}-{}", self.begin, self.end - 1))
    }
}

impl std::fmt::Display for ReadObjectRangeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "ReadObjectRangeRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
                ("begin", &self.begin),
                ("end", &self.end),
            ],
            &self.parameters,
        )
    }
}

/// The bytes returned by a range read.
///
/// `first_byte` and `last_byte` are the inclusive offsets of the returned
/// bytes within the object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadObjectRangeResponse {
    pub contents: bytes::Bytes,
    pub first_byte: u64,
    pub last_byte: u64,
    pub object_size: u64,
}

impl FromHttpResponse for ReadObjectRangeResponse {
    fn from_http_response(response: HttpResponse) -> Result<Self> {
        let response = check_status(response)?;
        let range = content_range(&response.headers).map_err(Status::parse)?;
        let contents = response.payload;
        let Some(range) = range else {
            // Without a `Content-Range` header the payload is the full object.
            let size = contents.len() as u64;
            return Ok(Self {
                contents,
                first_byte: 0,
                last_byte: size.saturating_sub(1),
                object_size: size,
            });
        };
        let expected = range.last_byte - range.first_byte + 1;
        if expected != contents.len() as u64 {
            return Err(Status::parse(ParseError::BadHeaderFormat(
                "content-range",
                format!(
                    "the range contains {expected} bytes, but the payload has {} bytes",
                    contents.len()
                )
                .into(),
            )));
        }
        Ok(Self {
            contents,
            first_byte: range.first_byte,
            last_byte: range.last_byte,
            object_size: range.object_size,
        })
    }
}

/// Uploads an object using a [ObjectWriteStream][crate::object_write_stream::ObjectWriteStream].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertObjectStreamingRequest {
    bucket_name: String,
    object_name: String,
    parameters: RequestParameters,
}

generic_request!(
    InsertObjectStreamingRequest: IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    ContentEncoding,
    PredefinedAcl,
    Projection,
    UserProject,
);

impl InsertObjectStreamingRequest {
    pub fn new<B: Into<String>, O: Into<String>>(bucket_name: B, object_name: O) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl std::fmt::Display for InsertObjectStreamingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "InsertObjectStreamingRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
            ],
            &self.parameters,
        )
    }
}

/// Lists the objects in a bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListObjectsRequest {
    bucket_name: String,
    page_token: String,
    parameters: RequestParameters,
}

generic_request!(ListObjectsRequest: MaxResults, Prefix, Projection, UserProject, Versions);

impl ListObjectsRequest {
    pub fn new<B: Into<String>>(bucket_name: B) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn page_token(&self) -> &str {
        &self.page_token
    }

    /// Sets the continuation token returned by a previous page.
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.page_token = v.into();
        self
    }
}

impl std::fmt::Display for ListObjectsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "ListObjectsRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("page_token", &self.page_token),
            ],
            &self.parameters,
        )
    }
}

/// A page of objects.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListObjectsResponse {
    /// The continuation token, empty if this is the last page.
    pub next_page_token: String,
    pub items: Vec<ObjectMetadata>,
    /// The common prefixes, only populated when listing with a delimiter.
    pub prefixes: Vec<String>,
}

crate::http_response::json_response!(ListObjectsResponse);

impl gax::paginator::PageableResponse for ListObjectsResponse {
    type PageItem = ObjectMetadata;

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }

    fn items(self) -> Vec<Self::PageItem> {
        self.items
    }
}

/// Deletes an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteObjectRequest {
    bucket_name: String,
    object_name: String,
    parameters: RequestParameters,
}

generic_request!(
    DeleteObjectRequest: Generation,
    IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    UserProject,
);

impl DeleteObjectRequest {
    pub fn new<B: Into<String>, O: Into<String>>(bucket_name: B, object_name: O) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl std::fmt::Display for DeleteObjectRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "DeleteObjectRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
            ],
            &self.parameters,
        )
    }
}
