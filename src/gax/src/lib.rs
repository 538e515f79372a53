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

//! Storage raw client helpers.
//!
//! This crate contains the types and functions shared by every layer of the
//! storage raw client pipeline: the [Status][error::Status] returned by all
//! operations, the helpers to format typed query parameters, and the policies
//! and loop used by the retry decorator.
//!
//! <div class="warning">
//! The <code>retry_loop_internal</code> module is an implementation detail of
//! the storage client. It is public because the decorator lives in a different
//! crate, it is not intended for general use.
//! </div>

/// An alias of [std::result::Result] where the error is always [crate::error::Status].
///
/// This is the result type used by all functions wrapping remote operations.
/// `Ok(T)` corresponds to a successful status with a meaningful response.
pub type Result<T> = std::result::Result<T, crate::error::Status>;

/// The status model used by all layers of the client.
pub mod error;

/// Defines traits and helpers to serialize query parameters.
///
/// Query parameters can be integers, booleans, or strings. Optional values
/// that are not set are not included in the query string. The helpers in this
/// module produce the canonical text for a value and percent-encode
/// `key=value` pairs.
pub mod query_parameter;

/// Implementation details for [query_parameter](crate::query_parameter).
mod request_parameter;

pub mod backoff_policy;
pub mod exponential_backoff;
pub mod retry_policy;
pub mod retry_result;
pub mod retry_state;

#[doc(hidden)]
pub mod retry_loop_internal;

/// Defines some types and traits to convert and use List RPCs as a Stream.
pub mod paginator;
