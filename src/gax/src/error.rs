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

use std::error::Error as StdError;
use std::sync::Arc;

type BoxError = Box<dyn StdError + Send + Sync>;
type SharedError = Arc<dyn StdError + Send + Sync>;

/// The classification of a [Status].
///
/// The retry policies use this classification to decide if an operation can
/// be attempted again. Only [StatusCode::TransientFailure] is retryable with
/// the default policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StatusCode {
    /// The operation completed successfully.
    Ok,
    /// The operation failed, but it may succeed if attempted again. Timeouts,
    /// connection resets, and most 5xx HTTP errors fall in this category.
    TransientFailure,
    /// The service rejected the request and will reject it again.
    PermanentFailure,
    /// The bucket, object, or access control entry does not exist.
    NotFound,
    /// The caller is not authorized, or the credentials could not be created.
    PermissionDenied,
    /// The client detected a problem with the request before sending it.
    InvalidArgument,
    /// The response could not be decoded.
    ParseFailure,
    /// The retry policy stopped the retry loop.
    PolicyExhausted,
    /// An unclassified problem.
    #[default]
    Unknown,
}

impl StatusCode {
    /// Classifies an HTTP status code.
    ///
    /// The storage service [recommends] retrying 408, 429, and all 5xx HTTP
    /// status codes. Resumable uploads also return 308, which means the
    /// upload is not complete and should be continued.
    ///
    /// [recommends]: https://cloud.google.com/storage/docs/retry-strategy
    pub fn from_http_status(code: u16) -> Self {
        match code {
            200..300 => Self::Ok,
            308 | 408 | 429 | 500..600 => Self::TransientFailure,
            401 | 403 => Self::PermissionDenied,
            404 => Self::NotFound,
            300..500 => Self::PermanentFailure,
            _ => Self::Unknown,
        }
    }

    /// The canonical name for this code.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::TransientFailure => "TRANSIENT_FAILURE",
            Self::PermanentFailure => "PERMANENT_FAILURE",
            Self::NotFound => "NOT_FOUND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ParseFailure => "PARSE_FAILURE",
            Self::PolicyExhausted => "POLICY_EXHAUSTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of an operation.
///
/// Every layer of the client (the transport, the response parsers, and the
/// decorators) reports problems as values of this type, nothing in the client
/// panics or aborts on a failed request. Successful operations return `Ok(T)`
/// from functions returning [crate::Result], [Status::ok()] exists to log
/// and compare outcomes.
///
/// # Example
/// ```
/// use storage_gax::error::{Status, StatusCode};
/// let status = Status::http(503, "try again later");
/// assert_eq!(status.code(), StatusCode::TransientFailure);
/// assert_eq!(status.http_status_code(), Some(503));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Status {
    code: StatusCode,
    message: String,
    http_status_code: Option<u16>,
    source: Option<SharedError>,
}

impl Status {
    /// Creates a status with the given code and message.
    pub fn new<T: Into<String>>(code: StatusCode, message: T) -> Self {
        Self {
            code,
            message: message.into(),
            http_status_code: None,
            source: None,
        }
    }

    /// A successful status.
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok, "")
    }

    /// A status for a failure classified by its HTTP status code.
    pub fn http<T: Into<String>>(status_code: u16, message: T) -> Self {
        Self {
            http_status_code: Some(status_code),
            ..Self::new(StatusCode::from_http_status(status_code), message)
        }
    }

    /// A transient failure, such as a reset connection.
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self::from_source(StatusCode::TransientFailure, "I/O error", source)
    }

    /// The request did not complete before its deadline.
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::from_source(
            StatusCode::TransientFailure,
            "the request exceeded its deadline",
            source,
        )
    }

    /// The credentials could not produce an authorization header.
    pub fn authentication<T: Into<BoxError>>(source: T) -> Self {
        Self::from_source(
            StatusCode::PermissionDenied,
            "cannot create the authentication headers",
            source,
        )
    }

    /// The response body could not be decoded.
    pub fn parse<T: Into<BoxError>>(source: T) -> Self {
        Self::from_source(
            StatusCode::ParseFailure,
            "cannot deserialize the response",
            source,
        )
    }

    /// The request could not be created with the given inputs.
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::new(StatusCode::InvalidArgument, message)
    }

    /// The retry policy gave up, `last` is the last status observed by the
    /// retry loop.
    ///
    /// The last status is available as the [source][std::error::Error::source]
    /// of the new status.
    ///
    /// # Example
    /// ```
    /// use storage_gax::error::{Status, StatusCode};
    /// let status = Status::exhausted(Status::http(503, "unavailable"));
    /// assert_eq!(status.code(), StatusCode::PolicyExhausted);
    /// let last = status.as_inner::<Status>().unwrap();
    /// assert_eq!(last.http_status_code(), Some(503));
    /// ```
    pub fn exhausted(last: Status) -> Self {
        Self {
            code: StatusCode::PolicyExhausted,
            message: format!("retry policy exhausted, last status was {last}"),
            http_status_code: last.http_status_code,
            source: Some(Arc::new(last)),
        }
    }

    fn from_source<T: Into<BoxError>>(code: StatusCode, prefix: &str, source: T) -> Self {
        let source: BoxError = source.into();
        Self {
            code,
            message: format!("{prefix}: {source}"),
            http_status_code: None,
            source: Some(Arc::from(source)),
        }
    }

    /// The classification for this status.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// A human-readable description of the problem.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code, if the status was created from an HTTP response.
    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status_code
    }

    /// Returns true if this is a successful status.
    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }

    /// Returns true if the retry policy stopped the retry loop.
    pub fn is_exhausted(&self) -> bool {
        self.code == StatusCode::PolicyExhausted
    }

    /// Recurses through the source chain and returns a reference to the first
    /// value of type `T`, or `None` if there is no such value.
    pub fn as_inner<T: StdError + Send + Sync + 'static>(&self) -> Option<&T> {
        let mut error = self.source.as_deref()? as &(dyn StdError + 'static);
        loop {
            match error.downcast_ref::<T>() {
                Some(e) => return Some(e),
                None => error = error.source()?,
            }
        }
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.http_status_code == other.http_status_code
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.message.is_empty(), self.http_status_code) {
            (true, _) => write!(f, "{}", self.code),
            (false, None) => write!(f, "{}: {}", self.code, self.message),
            (false, Some(http)) => write!(f, "{} [HTTP {http}]: {}", self.code, self.message),
        }
    }
}

impl StdError for Status {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200, StatusCode::Ok)]
    #[test_case(204, StatusCode::Ok)]
    #[test_case(308, StatusCode::TransientFailure)]
    #[test_case(400, StatusCode::PermanentFailure)]
    #[test_case(401, StatusCode::PermissionDenied)]
    #[test_case(403, StatusCode::PermissionDenied)]
    #[test_case(404, StatusCode::NotFound)]
    #[test_case(408, StatusCode::TransientFailure)]
    #[test_case(409, StatusCode::PermanentFailure)]
    #[test_case(412, StatusCode::PermanentFailure)]
    #[test_case(429, StatusCode::TransientFailure)]
    #[test_case(500, StatusCode::TransientFailure)]
    #[test_case(503, StatusCode::TransientFailure)]
    #[test_case(504, StatusCode::TransientFailure)]
    #[test_case(100, StatusCode::Unknown)]
    fn classify_http(code: u16, want: StatusCode) {
        assert_eq!(StatusCode::from_http_status(code), want);
        let status = Status::http(code, "test-only");
        assert_eq!(status.code(), want, "{status:?}");
        assert_eq!(status.http_status_code(), Some(code));
    }

    #[test]
    fn display() {
        assert_eq!(Status::ok().to_string(), "OK");
        let status = Status::new(StatusCode::NotFound, "no such object");
        assert_eq!(status.to_string(), "NOT_FOUND: no such object");
        let status = Status::http(503, "unavailable");
        assert_eq!(status.to_string(), "TRANSIENT_FAILURE [HTTP 503]: unavailable");
    }

    #[test]
    fn from_sources() {
        let status = Status::io("connection reset");
        assert_eq!(status.code(), StatusCode::TransientFailure);
        assert!(status.source().is_some(), "{status:?}");
        assert!(status.message().contains("connection reset"), "{status}");

        let status = Status::timeout("deadline");
        assert_eq!(status.code(), StatusCode::TransientFailure);

        let status = Status::authentication("bad key");
        assert_eq!(status.code(), StatusCode::PermissionDenied);

        let status = Status::parse("unexpected EOF");
        assert_eq!(status.code(), StatusCode::ParseFailure);

        let status = Status::invalid_argument("empty bucket name");
        assert_eq!(status.code(), StatusCode::InvalidArgument);
        assert!(status.source().is_none(), "{status:?}");
    }

    #[test]
    fn exhausted() {
        let last = Status::http(503, "unavailable");
        let status = Status::exhausted(last.clone());
        assert!(status.is_exhausted(), "{status:?}");
        assert!(!status.is_ok(), "{status:?}");
        assert_eq!(status.http_status_code(), Some(503));
        assert!(status.message().contains("unavailable"), "{status}");
        assert_eq!(status.as_inner::<Status>(), Some(&last));
    }

    #[derive(Debug)]
    struct LeafError;

    impl std::fmt::Display for LeafError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "leaf error")
        }
    }

    impl StdError for LeafError {}

    #[test]
    fn as_inner_recurses() {
        let status = Status::exhausted(Status::io(LeafError));
        assert!(status.as_inner::<LeafError>().is_some(), "{status:?}");
        assert!(status.as_inner::<std::io::Error>().is_none(), "{status:?}");
        assert!(Status::ok().as_inner::<LeafError>().is_none());
    }

    #[test]
    fn equality_ignores_source() {
        let a = Status::new(StatusCode::ParseFailure, "cannot deserialize the response: leaf error");
        let b = Status::parse(LeafError);
        assert_eq!(a, b);
    }

    #[test]
    fn traits() {
        static_assertions::assert_impl_all!(Status: Clone, Send, Sync, StdError);
    }
}
