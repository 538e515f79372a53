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

use crate::generic_request::{RequestParameters, format_request, generic_request};
use crate::model::BucketMetadata;

/// Lists the buckets in a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListBucketsRequest {
    project_id: String,
    page_token: String,
    parameters: RequestParameters,
}

generic_request!(ListBucketsRequest: MaxResults, Prefix, Projection, UserProject);

impl ListBucketsRequest {
    /// Creates a request for the buckets in `project_id`.
    ///
    /// An empty project id uses the project configured in the client options.
    pub fn new<T: Into<String>>(project_id: T) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
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

impl std::fmt::Display for ListBucketsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "ListBucketsRequest",
            &[
                ("project_id", &self.project_id),
                ("page_token", &self.page_token),
            ],
            &self.parameters,
        )
    }
}

/// A page of buckets.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListBucketsResponse {
    /// The continuation token, empty if this is the last page.
    pub next_page_token: String,
    pub items: Vec<BucketMetadata>,
}

crate::http_response::json_response!(ListBucketsResponse);

impl gax::paginator::PageableResponse for ListBucketsResponse {
    type PageItem = BucketMetadata;

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }

    fn items(self) -> Vec<Self::PageItem> {
        self.items
    }
}

/// Fetches the metadata for a bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetBucketMetadataRequest {
    bucket_name: String,
    parameters: RequestParameters,
}

generic_request!(
    GetBucketMetadataRequest: IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    Projection,
    UserProject,
);

impl GetBucketMetadataRequest {
    pub fn new<T: Into<String>>(bucket_name: T) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

impl std::fmt::Display for GetBucketMetadataRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "GetBucketMetadataRequest",
            &[("bucket_name", &self.bucket_name)],
            &self.parameters,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic_request::GenericRequest;
    use crate::http_response::{FromHttpResponse, HttpResponse};
    use crate::well_known_parameters::*;
    use gax::paginator::PageableResponse;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_buckets() {
        let request = ListBucketsRequest::new("my-project")
            .set_page_token("abc")
            .set_multiple_parameters((MaxResults::new(10), Prefix::new("foo-")));
        assert_eq!(request.project_id(), "my-project");
        assert_eq!(request.page_token(), "abc");
        assert_eq!(request.serialize_query_string(), "maxResults=10&prefix=foo-");
        let fmt = request.to_string();
        assert!(fmt.starts_with("ListBucketsRequest={"), "{fmt}");
        assert!(fmt.contains("project_id=my-project"), "{fmt}");
        assert!(fmt.contains("page_token=abc"), "{fmt}");
        assert!(fmt.contains("maxResults=10"), "{fmt}");
        assert!(fmt.contains("prefix=foo-"), "{fmt}");
    }

    #[test]
    fn list_buckets_response() -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "kind": "storage#buckets",
            "nextPageToken": "some-token-42",
            "items": [
                {"kind": "storage#bucket", "name": "foo-bar-baz", "location": "US"},
                {"kind": "storage#bucket", "name": "qux", "location": "EU"},
            ]
        });
        let response = HttpResponse::new(200).with_payload(payload.to_string());
        let got = ListBucketsResponse::from_http_response(response)?;
        assert_eq!(got.next_page_token(), "some-token-42");
        let names = got.items().into_iter().map(|b| b.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["foo-bar-baz", "qux"]);
        Ok(())
    }

    #[test]
    fn list_buckets_response_last_page() -> anyhow::Result<()> {
        let payload = serde_json::json!({"items": [{"name": "b1"}]});
        let response = HttpResponse::new(200).with_payload(payload.to_string());
        let got = ListBucketsResponse::from_http_response(response)?;
        assert_eq!(got.next_page_token(), "");
        assert_eq!(got.items.len(), 1);

        let response = HttpResponse::new(200).with_payload("{}");
        let got = ListBucketsResponse::from_http_response(response)?;
        assert_eq!(got, ListBucketsResponse::default());
        Ok(())
    }

    #[test]
    fn get_bucket_metadata() {
        let request = GetBucketMetadataRequest::new("my-bucket")
            .set_parameter(IfMetagenerationNotMatch::new(7))
            .set_parameter(Projection::full());
        assert_eq!(request.bucket_name(), "my-bucket");
        assert_eq!(
            request.to_string(),
            "GetBucketMetadataRequest={bucket_name=my-bucket, ifMetagenerationNotMatch=7, projection=full}"
        );
    }
}
