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

//! Defines traits for retry policies and some common implementations.
//!
//! A retry policy decides if a failed operation should be attempted again. The
//! retry loop queries the policy after each failed attempt, providing the
//! state of the loop (when it started and how many attempts were made) and the
//! last status.
//!
//! Policies are stateless, all the state lives in the [RetryState] owned by
//! each call. Multiple concurrent calls can share the same policy without
//! sharing their attempt budgets.
//!
//! The decorators in this module limit how long a retry loop can run. Use
//! [RetryPolicyExt] to compose them.
//!
//! # Example
//! ```
//! # use storage_gax::retry_policy::*;
//! use std::time::Duration;
//! let policy = AlwaysRetry
//!     .with_time_limit(Duration::from_secs(60))
//!     .with_attempt_limit(5);
//! ```

use crate::error::Status;
use crate::retry_result::RetryResult;
use crate::retry_state::RetryState;
use std::sync::Arc;
use std::time::Duration;

/// Determines how errors are handled in the retry loop.
pub trait RetryPolicy: Send + Sync + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `state` - the state of the retry loop. `state.attempt_count` includes
    ///   the attempt that just failed, it is always non-zero.
    /// * `status` - the status returned by the last attempt.
    fn on_error(&self, state: &RetryState, status: Status) -> RetryResult;

    /// The remaining time in the retry policy.
    ///
    /// For policies based on time, this returns the remaining time in the
    /// policy. The retry loop stops early if the next backoff delay is longer
    /// than this value. For policies that are not time based this returns
    /// `None`.
    fn remaining_time(&self, _state: &RetryState) -> Option<Duration> {
        None
    }
}

/// A helper type to use [RetryPolicy] in client options.
#[derive(Clone, Debug)]
pub struct RetryPolicyArg(pub(crate) Arc<dyn RetryPolicy>);

impl RetryPolicyArg {
    /// Returns the wrapped policy.
    pub fn into_inner(self) -> Arc<dyn RetryPolicy> {
        self.0
    }
}

impl<T: RetryPolicy + 'static> std::convert::From<T> for RetryPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn RetryPolicy>> for RetryPolicyArg {
    fn from(value: Arc<dyn RetryPolicy>) -> Self {
        Self(value)
    }
}

/// Extension trait for [RetryPolicy].
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// Decorate a [RetryPolicy] to limit the total elapsed time in the retry
    /// loop.
    ///
    /// While the time spent in the retry loop (including time in backoff) is
    /// less than the prescribed duration the `on_error()` method returns the
    /// results of the inner policy. After that time it returns
    /// [Exhausted][RetryResult::Exhausted] if the inner policy returns
    /// [Continue][RetryResult::Continue].
    fn with_time_limit(self, maximum_duration: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    /// Decorate a [RetryPolicy] to limit the number of attempts.
    ///
    /// The policy passes through the results from the inner policy as long as
    /// `attempt_count < maximum_attempts`. Once the maximum number of attempts
    /// is reached, the policy returns [Exhausted][RetryResult::Exhausted] if
    /// the inner policy returns [Continue][RetryResult::Continue].
    ///
    /// # Example
    /// ```
    /// # use storage_gax::retry_policy::*;
    /// # use storage_gax::retry_state::RetryState;
    /// # use storage_gax::error::Status;
    /// let policy = AlwaysRetry.with_attempt_limit(3);
    /// let state = RetryState::new().set_attempt_count(2_u32);
    /// assert!(policy.on_error(&state, Status::http(503, "")).is_continue());
    /// let state = RetryState::new().set_attempt_count(3_u32);
    /// assert!(policy.on_error(&state, Status::http(503, "")).is_exhausted());
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: RetryPolicy> RetryPolicyExt for T {}

/// A retry policy that retries all errors.
///
/// This policy must be decorated to limit the number of retry attempts or the
/// duration of the retry loop. It is mostly useful in tests.
#[derive(Clone, Debug)]
pub struct AlwaysRetry;

impl RetryPolicy for AlwaysRetry {
    fn on_error(&self, _state: &RetryState, status: Status) -> RetryResult {
        RetryResult::Continue(status)
    }
}

/// A retry policy that never retries.
#[derive(Clone, Debug)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn on_error(&self, _state: &RetryState, status: Status) -> RetryResult {
        RetryResult::Exhausted(status)
    }
}

/// A retry policy decorator that limits the total time in the retry loop.
///
/// The `remaining_time()` function returns the remaining time. This is always
/// [Duration::ZERO] once or after the policy's deadline is reached.
#[derive(Debug)]
pub struct LimitedElapsedTime<P>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_duration: Duration,
}

impl<P> LimitedElapsedTime<P>
where
    P: RetryPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_duration: Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }

    // `None` if the deadline is too far in the future to represent.
    fn deadline(&self, state: &RetryState) -> Option<tokio::time::Instant> {
        state.start.checked_add(self.maximum_duration)
    }
}

impl<P> RetryPolicy for LimitedElapsedTime<P>
where
    P: RetryPolicy + 'static,
{
    fn on_error(&self, state: &RetryState, status: Status) -> RetryResult {
        match self.inner.on_error(state, status) {
            RetryResult::Continue(status)
                if self
                    .deadline(state)
                    .is_some_and(|d| tokio::time::Instant::now() >= d) =>
            {
                RetryResult::Exhausted(status)
            }
            result => result,
        }
    }

    fn remaining_time(&self, state: &RetryState) -> Option<Duration> {
        let Some(deadline) = self.deadline(state) else {
            return self.inner.remaining_time(state);
        };
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match self.inner.remaining_time(state) {
            Some(inner) => Some(std::cmp::min(remaining, inner)),
            None => Some(remaining),
        }
    }
}

/// A retry policy decorator that limits the number of attempts.
#[derive(Debug)]
pub struct LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl<P> LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }
}

impl<P> RetryPolicy for LimitedAttemptCount<P>
where
    P: RetryPolicy + 'static,
{
    fn on_error(&self, state: &RetryState, status: Status) -> RetryResult {
        match self.inner.on_error(state, status) {
            RetryResult::Continue(status) if state.attempt_count >= self.maximum_attempts => {
                RetryResult::Exhausted(status)
            }
            result => result,
        }
    }

    fn remaining_time(&self, state: &RetryState) -> Option<Duration> {
        self.inner.remaining_time(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    mockall::mock! {
        #[derive(Debug)]
        Policy {}
        impl RetryPolicy for Policy {
            fn on_error(&self, state: &RetryState, status: Status) -> RetryResult;
            fn remaining_time(&self, state: &RetryState) -> Option<Duration>;
        }
    }

    fn transient() -> Status {
        Status::http(503, "try again")
    }

    fn state(count: u32) -> RetryState {
        RetryState::new().set_attempt_count(count)
    }

    #[test]
    fn always_and_never() {
        assert!(AlwaysRetry.on_error(&state(1), transient()).is_continue());
        assert!(AlwaysRetry.remaining_time(&state(1)).is_none());
        assert!(NeverRetry.on_error(&state(1), transient()).is_exhausted());
    }

    #[test]
    fn arg_conversions() {
        let arg = RetryPolicyArg::from(AlwaysRetry.with_attempt_limit(3));
        let policy = arg.into_inner();
        assert!(policy.on_error(&state(1), transient()).is_continue());
        assert!(policy.on_error(&state(3), transient()).is_exhausted());

        let policy: Arc<dyn RetryPolicy> = Arc::new(NeverRetry);
        let arg = RetryPolicyArg::from(policy);
        assert!(arg.0.on_error(&state(1), transient()).is_exhausted());
    }

    #[test]
    fn attempt_limit() {
        let policy = AlwaysRetry.with_attempt_limit(3);
        assert!(policy.on_error(&state(1), transient()).is_continue());
        assert!(policy.on_error(&state(2), transient()).is_continue());
        assert!(policy.on_error(&state(3), transient()).is_exhausted());
        assert!(policy.on_error(&state(4), transient()).is_exhausted());
    }

    #[test]
    fn attempt_limit_inner_permanent() {
        let mut mock = MockPolicy::new();
        mock.expect_on_error()
            .times(2)
            .returning(|_, s| RetryResult::Permanent(s));
        let policy = LimitedAttemptCount::custom(mock, 3);
        assert!(policy.on_error(&state(1), transient()).is_permanent());
        assert!(policy.on_error(&state(5), transient()).is_permanent());
    }

    #[test]
    fn attempt_limit_forwards_remaining_time() {
        let mut mock = MockPolicy::new();
        mock.expect_remaining_time()
            .times(1)
            .returning(|_| Some(Duration::from_secs(7)));
        let policy = LimitedAttemptCount::custom(mock, 3);
        assert_eq!(
            policy.remaining_time(&state(1)),
            Some(Duration::from_secs(7))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit() {
        let policy = AlwaysRetry.with_time_limit(Duration::from_secs(60));
        let start = Instant::now();
        let s = RetryState::new().set_start(start).set_attempt_count(1_u32);
        assert!(policy.on_error(&s, transient()).is_continue());
        assert_eq!(policy.remaining_time(&s), Some(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(policy.on_error(&s, transient()).is_continue());
        assert_eq!(policy.remaining_time(&s), Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(policy.on_error(&s, transient()).is_exhausted());
        assert_eq!(policy.remaining_time(&s), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit_unbounded() {
        let policy = AlwaysRetry
            .with_time_limit(Duration::MAX)
            .with_attempt_limit(2);
        let s = RetryState::new().set_attempt_count(1_u32);
        assert!(policy.on_error(&s, transient()).is_continue());
        assert_eq!(policy.remaining_time(&s), None);
        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(policy.on_error(&s, transient()).is_continue());
        let s = RetryState::new().set_attempt_count(2_u32);
        assert!(policy.on_error(&s, transient()).is_exhausted());
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit_inner_permanent() {
        let mut mock = MockPolicy::new();
        mock.expect_on_error()
            .times(1)
            .returning(|_, s| RetryResult::Permanent(s));
        let policy = LimitedElapsedTime::custom(mock, Duration::from_secs(60));
        let s = RetryState::new().set_attempt_count(1_u32);
        tokio::time::advance(Duration::from_secs(120)).await;
        assert!(policy.on_error(&s, transient()).is_permanent());
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit_remaining_inner_shorter() {
        let mut mock = MockPolicy::new();
        mock.expect_remaining_time()
            .times(1)
            .returning(|_| Some(Duration::from_secs(5)));
        let policy = LimitedElapsedTime::custom(mock, Duration::from_secs(60));
        let s = RetryState::new();
        assert_eq!(policy.remaining_time(&s), Some(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn composed() {
        let policy = AlwaysRetry
            .with_time_limit(Duration::from_secs(60))
            .with_attempt_limit(5);
        let s = RetryState::new().set_attempt_count(5_u32);
        assert!(policy.on_error(&s, transient()).is_exhausted());
        let s = RetryState::new().set_attempt_count(2_u32);
        assert!(policy.on_error(&s, transient()).is_continue());
        assert_eq!(policy.remaining_time(&s), Some(Duration::from_secs(60)));
    }
}
