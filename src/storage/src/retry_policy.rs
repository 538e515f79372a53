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

//! Defines the retry policies for the storage client.
//!
//! The storage service [recommends] retrying requests that fail with
//! transient errors. The client classifies HTTP status codes 308, 408, 429,
//! and all 5xx codes as transient, as well as any I/O error or timeout.
//!
//! [recommends]: https://cloud.google.com/storage/docs/retry-strategy

use gax::error::{Status, StatusCode};
use gax::retry_policy::{RetryPolicy, RetryPolicyExt};
use gax::retry_result::RetryResult;
use gax::retry_state::RetryState;
use std::time::Duration;

/// The default retry policy for the storage client.
///
/// Retries transient errors, for up to 10 attempts or up to 5 minutes, whichever
/// happens first.
pub fn storage_default() -> impl RetryPolicy {
    RetryableErrors
        .with_attempt_limit(10)
        .with_time_limit(Duration::from_secs(300))
}

/// Retries all transient failures.
///
/// This policy does not limit the number of attempts or the elapsed time,
/// combine it with [RetryPolicyExt] to add such limits.
///
/// # Example
/// ```
/// # use storage_raw_client::retry_policy::RetryableErrors;
/// use gax::retry_policy::RetryPolicyExt;
/// let policy = RetryableErrors.with_attempt_limit(3);
/// ```
#[derive(Clone, Debug)]
pub struct RetryableErrors;

impl RetryPolicy for RetryableErrors {
    fn on_error(&self, _state: &RetryState, status: Status) -> RetryResult {
        match status.code() {
            StatusCode::TransientFailure => RetryResult::Continue(status),
            _ => RetryResult::Permanent(status),
        }
    }
}
