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

//! The request and response types for each operation.
//!
//! Each request holds the fields required by its operation, and a set of
//! optional [well-known parameters][crate::well_known_parameters]. The
//! parameters accepted by each request are checked at compile time.
//!
//! # Example
//! ```
//! use storage_raw_client::generic_request::GenericRequest;
//! use storage_raw_client::requests::GetObjectMetadataRequest;
//! use storage_raw_client::well_known_parameters::*;
//! let request = GetObjectMetadataRequest::new("my-bucket", "my-object")
//!     .set_multiple_parameters((Generation::new(7), UserProject::new("my-project")));
//! assert_eq!(
//!     request.to_string(),
//!     "GetObjectMetadataRequest={bucket_name=my-bucket, object_name=my-object, generation=7, userProject=my-project}"
//! );
//! ```

mod bucket_requests;
mod object_acl_requests;
mod object_requests;

pub use bucket_requests::*;
pub use object_acl_requests::*;
pub use object_requests::*;
