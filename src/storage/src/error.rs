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

//! Custom errors for the storage raw client.
//!
//! The client reports all failures as [Status][crate::Status] values. The
//! types in this module appear as the [source][std::error::Error::source] of
//! those statuses, applications can recover them with
//! [Status::as_inner][crate::Status::as_inner].
//!
//! # Example
//! ```
//! use storage_raw_client::error::ParseError;
//! # fn sample(status: &storage_raw_client::Status) {
//! match status.as_inner::<ParseError>() {
//!     Some(ParseError::BadHeaderFormat(h, _)) => println!("the {h} header is malformed"),
//!     Some(e) => println!("cannot parse the response: {e}"),
//!     None => println!("status={status}"),
//! }
//! # }
//! ```

/// Represents an error that can occur when parsing a successful response.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The payload is not valid JSON, or it does not match the expected type.
    #[error("cannot decode the response payload: {0}")]
    Json(#[source] serde_json::Error),

    /// The received header format is invalid.
    #[error("the format for header '{0}' is incorrect")]
    BadHeaderFormat(
        &'static str,
        #[source] Box<dyn std::error::Error + Send + Sync + 'static>,
    ),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use gax::error::StatusCode;

    #[test]
    fn bad_header_format() {
        let value = ParseError::BadHeaderFormat("content-range", "missing bytes prefix".into());
        let fmt = value.to_string();
        assert!(fmt.contains("'content-range'"), "{value:?} => {fmt}");
        let source = std::error::Error::source(&value).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("missing bytes prefix"), "{value:?}");
    }

    #[test]
    fn recover_from_status() {
        let json = serde_json::from_str::<serde_json::Value>("{not-json").unwrap_err();
        let status = Status::parse(ParseError::Json(json));
        assert_eq!(status.code(), StatusCode::ParseFailure);
        let got = status.as_inner::<ParseError>();
        assert!(matches!(got, Some(ParseError::Json(_))), "{status:?}");
        assert!(status.as_inner::<serde_json::Error>().is_some(), "{status:?}");
    }
}
