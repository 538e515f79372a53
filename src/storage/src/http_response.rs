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

//! Convert HTTP responses into typed responses.
//!
//! The parsers are pure functions, they do not perform any I/O. A response
//! with a status code of 300 or higher is converted to a [Status] classified
//! by its HTTP status code. Successful responses are decoded from their JSON
//! payloads.

use crate::Result;
use crate::error::ParseError;
use gax::error::Status;

/// The raw outcome of a single HTTP request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: http::HeaderMap,
    pub payload: bytes::Bytes,
}

impl HttpResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Default::default()
        }
    }

    /// Sets the payload.
    pub fn with_payload<V: Into<bytes::Bytes>>(mut self, v: V) -> Self {
        self.payload = v.into();
        self
    }

    /// Appends a header, invalid names or values are ignored.
    pub fn with_header<K: AsRef<str>, V: AsRef<str>>(mut self, name: K, value: V) -> Self {
        if let (Ok(k), Ok(v)) = (
            http::HeaderName::from_bytes(name.as_ref().as_bytes()),
            http::HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.append(k, v);
        }
        self
    }

    /// Returns true if the status code is in the `[200, 300)` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Implemented by all response types.
pub trait FromHttpResponse: Sized {
    fn from_http_response(response: HttpResponse) -> Result<Self>;
}

/// Converts a failed response into a [Status].
///
/// The message is the `error.message` field of the JSON error payload if
/// present, otherwise the payload is used verbatim.
pub(crate) fn to_status(response: &HttpResponse) -> Status {
    let message = serde_json::from_slice::<serde_json::Value>(&response.payload)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(&response.payload).into_owned());
    Status::http(response.status_code, message)
}

/// Returns the response unchanged if it was successful, otherwise converts it
/// to a [Status].
pub(crate) fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.status_code >= 300 {
        return Err(to_status(&response));
    }
    Ok(response)
}

/// Decodes a successful response from its JSON payload.
pub(crate) fn from_json<T>(response: HttpResponse) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let response = check_status(response)?;
    serde_json::from_slice::<T>(&response.payload).map_err(|e| Status::parse(ParseError::Json(e)))
}

/// Implements [FromHttpResponse] for types decoded from a JSON payload.
macro_rules! json_response {
    ($($t:ty),+ $(,)?) => {
        $(impl $crate::http_response::FromHttpResponse for $t {
            fn from_http_response(
                response: $crate::http_response::HttpResponse,
            ) -> $crate::Result<Self> {
                $crate::http_response::from_json(response)
            }
        })+
    };
}
pub(crate) use json_response;

json_response!(
    crate::model::BucketMetadata,
    crate::model::ObjectMetadata,
    crate::model::ObjectAccessControl,
);

/// The response for operations that do not return a payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmptyResponse;

impl FromHttpResponse for EmptyResponse {
    fn from_http_response(response: HttpResponse) -> Result<Self> {
        check_status(response).map(|_| EmptyResponse)
    }
}

/// The byte range in a `Content-Range` header.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ContentRange {
    pub first_byte: u64,
    pub last_byte: u64,
    pub object_size: u64,
}

const CONTENT_RANGE: &str = "content-range";

/// Parses the `Content-Range` header, if present.
///
/// The expected format is `bytes <first>-<last>/<size>`, where the range is
/// inclusive.
pub(crate) fn content_range(
    headers: &http::HeaderMap,
) -> std::result::Result<Option<ContentRange>, ParseError> {
    let Some(header) = headers.get(CONTENT_RANGE) else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|e| ParseError::BadHeaderFormat(CONTENT_RANGE, e.into()))?;
    let header = header
        .strip_prefix("bytes ")
        .ok_or_else(|| ParseError::BadHeaderFormat(CONTENT_RANGE, "missing bytes prefix".into()))?;
    let (range, size) = header
        .split_once('/')
        .ok_or_else(|| ParseError::BadHeaderFormat(CONTENT_RANGE, "missing / separator".into()))?;
    let (first, last) = range
        .split_once('-')
        .ok_or_else(|| ParseError::BadHeaderFormat(CONTENT_RANGE, "missing - separator".into()))?;
    let parse = |v: &str| {
        v.parse::<u64>()
            .map_err(|e| ParseError::BadHeaderFormat(CONTENT_RANGE, e.into()))
    };
    let (first_byte, last_byte, object_size) = (parse(first)?, parse(last)?, parse(size)?);
    if first_byte > last_byte {
        return Err(ParseError::BadHeaderFormat(
            CONTENT_RANGE,
            format!("range start ({first_byte}) should be less than or equal to the range end ({last_byte})").into(),
        ));
    }
    if last_byte >= object_size {
        return Err(ParseError::BadHeaderFormat(
            CONTENT_RANGE,
            format!("range end ({last_byte}) should be less than the object size ({object_size})").into(),
        ));
    }
    Ok(Some(ContentRange {
        first_byte,
        last_byte,
        object_size,
    }))
}
