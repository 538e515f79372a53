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

//! Storage raw client
//!
//! This crate contains the low-level ("raw") client for a storage JSON API.
//! Each operation takes a typed request and returns a typed response. The
//! operations are defined by the [RawClient][raw_client::RawClient] trait,
//! implemented by the HTTP transport and by decorators that add retries and
//! logging on top of any other implementation.
//!
//! Most applications will use [Storage][client::Storage], which composes the
//! default stack and exposes list operations as streams of pages.
//!
//! # Example
//! ```
//! # use storage_raw_client::client::Storage;
//! # async fn sample() -> anyhow::Result<()> {
//! let client = Storage::builder().build()?;
//! let bucket = client.get_bucket_metadata("my-bucket").await?;
//! println!("bucket={bucket:?}");
//! # Ok(()) }
//! ```

pub use gax::Result;
pub use gax::error::{Status, StatusCode};

pub mod backoff_policy;
pub mod client;
pub mod client_options;
pub mod credentials;
pub mod error;
pub mod generic_request;
pub mod http_response;
pub mod model;
pub mod object_write_stream;
pub mod raw_client;
pub mod requests;
pub mod retry_policy;
pub mod storage;
pub mod well_known_parameters;
