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

use super::Result;
use super::backoff_policy::BackoffPolicy;
use super::error::Status;
use super::retry_policy::RetryPolicy;
use super::retry_result::RetryResult;
use super::retry_state::RetryState;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Runs the retry loop for a given function.
///
/// This functions calls an inner function as long as (1) the retry policy has
/// not expired, and (2) the inner function has not returned a successful
/// response.
///
/// In between calls the function waits the amount of time prescribed by the
/// backoff policy, using `sleep` to implement any sleep. The inner function
/// receives the remaining time in the retry policy, if any.
///
/// The loop state is local to each invocation. Concurrent calls sharing the
/// same policies do not share their attempt budgets.
pub async fn retry_loop<F, Fut, S, SFut, Response>(
    mut inner: F,
    sleep: S,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
) -> Result<Response>
where
    F: FnMut(Option<Duration>) -> Fut + Send,
    Fut: Future<Output = Result<Response>> + Send,
    S: Fn(Duration) -> SFut + Send + Sync,
    SFut: Future<Output = ()> + Send,
{
    let mut state = RetryState::new();
    loop {
        let remaining_time = retry_policy.remaining_time(&state);
        state.attempt_count += 1;
        let status = match inner(remaining_time).await {
            Ok(r) => return Ok(r),
            Err(s) => s,
        };
        let status = match retry_policy.on_error(&state, status) {
            RetryResult::Permanent(s) => return Err(s),
            RetryResult::Exhausted(s) => return Err(Status::exhausted(s)),
            RetryResult::Continue(s) => s,
        };
        let delay = backoff_policy.on_failure(&state);
        if retry_policy
            .remaining_time(&state)
            .is_some_and(|remaining| remaining < delay)
        {
            return Err(Status::exhausted(status));
        }
        tracing::debug!(
            attempt_count = state.attempt_count,
            ?delay,
            %status,
            "retrying after transient failure"
        );
        sleep(delay).await;
    }
}
