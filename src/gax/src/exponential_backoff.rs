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

//! Exponential backoff with full jitter.
//!
//! After the n-th failure the policy waits for a uniformly distributed
//! duration between zero and `initial_delay * scaling^(n-1)`, capped at
//! `maximum_delay`. Randomizing the whole interval keeps many clients that
//! fail at the same time from retrying in lockstep.

use crate::backoff_policy::BackoffPolicy;
use crate::retry_state::RetryState;
use std::time::Duration;

const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_MAXIMUM_DELAY: Duration = Duration::from_secs(60);
const DEFAULT_SCALING: f64 = 2.0;

// Bounds applied by [ExponentialBackoffBuilder::clamp].
const MIN_INITIAL_DELAY: Duration = Duration::from_millis(1);
const MIN_MAXIMUM_DELAY: Duration = Duration::from_secs(1);
const MAX_MAXIMUM_DELAY: Duration = Duration::from_secs(24 * 60 * 60);
const MAX_SCALING: f64 = 32.0;

/// Invalid [ExponentialBackoffBuilder] parameters.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the scaling factor must be at least 1.0, got {0}")]
    InvalidScalingFactor(f64),
    #[error("the initial delay must be positive, got {0:?}")]
    InvalidInitialDelay(Duration),
    #[error("the maximum delay ({maximum:?}) is shorter than the initial delay ({initial:?})")]
    EmptyRange { maximum: Duration, initial: Duration },
}

/// Collects the parameters of an [ExponentialBackoff].
///
/// ```
/// # use storage_gax::exponential_backoff::{Error, ExponentialBackoffBuilder};
/// use std::time::Duration;
/// let backoff = ExponentialBackoffBuilder::new()
///     .with_initial_delay(Duration::from_millis(250))
///     .with_maximum_delay(Duration::from_secs(30))
///     .with_scaling(3.0)
///     .build()?;
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExponentialBackoffBuilder {
    params: ExponentialBackoff,
}

impl ExponentialBackoffBuilder {
    /// Starts from the defaults: 1s initial delay, 60s maximum, doubling.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.params.initial_delay = v.into();
        self
    }

    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.params.maximum_delay = v.into();
        self
    }

    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.params.scaling = v.into();
        self
    }

    /// Validates the parameters and returns the policy.
    ///
    /// The scaling factor must be at least 1.0, the initial delay must be
    /// positive, and the maximum delay must not be shorter than the initial
    /// delay.
    pub fn build(self) -> Result<ExponentialBackoff, Error> {
        let p = self.params;
        // Negated so NaN is rejected too.
        if !(p.scaling >= 1.0) {
            return Err(Error::InvalidScalingFactor(p.scaling));
        }
        if p.initial_delay.is_zero() {
            return Err(Error::InvalidInitialDelay(p.initial_delay));
        }
        if p.maximum_delay < p.initial_delay {
            return Err(Error::EmptyRange {
                maximum: p.maximum_delay,
                initial: p.initial_delay,
            });
        }
        Ok(p)
    }

    /// Returns a policy with each parameter forced into a usable range.
    ///
    /// The maximum delay lands in `[1s, 24h]`. The initial delay then lands
    /// in `[1ms, maximum_delay]`, and the scaling factor in `[1.0, 32.0]`.
    pub fn clamp(self) -> ExponentialBackoff {
        let p = self.params;
        let maximum_delay = p.maximum_delay.clamp(MIN_MAXIMUM_DELAY, MAX_MAXIMUM_DELAY);
        let initial_delay = p.initial_delay.clamp(MIN_INITIAL_DELAY, maximum_delay);
        let scaling = if p.scaling.is_nan() {
            DEFAULT_SCALING
        } else {
            p.scaling.clamp(1.0, MAX_SCALING)
        };
        ExponentialBackoff {
            initial_delay,
            maximum_delay,
            scaling,
        }
    }
}

/// A [BackoffPolicy] implementing exponential backoff with full jitter.
///
/// Create it with [ExponentialBackoffBuilder], or use [Default] for the 1s to
/// 60s doubling schedule.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            maximum_delay: DEFAULT_MAXIMUM_DELAY,
            scaling: DEFAULT_SCALING,
        }
    }
}

impl ExponentialBackoff {
    /// The longest possible wait after `failures` failed attempts.
    fn ceiling(&self, failures: u32) -> Duration {
        let exponent = i32::try_from(failures.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.scaling.powi(exponent);
        // Compare ratios first, `mul_f64` panics on overflow.
        if factor >= self.maximum_delay.div_duration_f64(self.initial_delay) {
            return self.maximum_delay;
        }
        self.initial_delay.mul_f64(factor)
    }

    fn jittered(&self, failures: u32, rng: &mut impl rand::Rng) -> Duration {
        rng.random_range(Duration::ZERO..=self.ceiling(failures))
    }
}

impl BackoffPolicy for ExponentialBackoff {
    fn on_failure(&self, state: &RetryState) -> Duration {
        self.jittered(state.attempt_count, &mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test_case(secs(1), secs(5), 0.5, "scaling factor"; "scaling too small")]
    #[test_case(secs(1), secs(5), f64::NAN, "scaling factor"; "scaling nan")]
    #[test_case(Duration::ZERO, secs(5), 2.0, "initial delay"; "zero initial delay")]
    #[test_case(secs(10), secs(5), 2.0, "maximum delay"; "inverted range")]
    fn build_rejects(initial: Duration, maximum: Duration, scaling: f64, want: &str) {
        let got = ExponentialBackoffBuilder::new()
            .with_initial_delay(initial)
            .with_maximum_delay(maximum)
            .with_scaling(scaling)
            .build();
        let err = got.unwrap_err();
        assert!(err.to_string().contains(want), "{err}");
    }

    // With a scaling factor of 1.0 the delay never grows.
    #[test_case(Duration::from_nanos(1), Duration::MAX, 1.0, Duration::from_nanos(1))]
    #[test_case(secs(3), secs(3), 1.0, secs(3))]
    #[test_case(secs(1), Duration::MAX, 1e9, Duration::MAX)]
    fn build_accepts(
        initial: Duration,
        maximum: Duration,
        scaling: f64,
        last: Duration,
    ) -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(initial)
            .with_maximum_delay(maximum)
            .with_scaling(scaling)
            .build()?;
        assert_eq!(b.ceiling(1), initial);
        assert_eq!(b.ceiling(u32::MAX), last);
        Ok(())
    }

    #[test_case(1, 1)]
    #[test_case(2, 2)]
    #[test_case(6, 32)]
    #[test_case(7, 60)]
    #[test_case(1000, 60)]
    fn default_schedule(failures: u32, want: u64) -> anyhow::Result<()> {
        assert_eq!(ExponentialBackoff::default().ceiling(failures), secs(want));
        let built = ExponentialBackoffBuilder::new().build()?;
        assert_eq!(built.ceiling(failures), secs(want));
        Ok(())
    }

    #[test]
    fn zero_failures_uses_initial_delay() {
        let b = ExponentialBackoff::default();
        assert_eq!(b.ceiling(0), b.initial_delay);
    }

    #[test]
    fn clamp_bounds() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::ZERO)
            .with_maximum_delay(Duration::ZERO)
            .with_scaling(0.25)
            .clamp();
        assert_eq!(b.initial_delay, MIN_INITIAL_DELAY);
        assert_eq!(b.maximum_delay, MIN_MAXIMUM_DELAY);
        assert_eq!(b.scaling, 1.0);

        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::MAX)
            .with_maximum_delay(Duration::MAX)
            .with_scaling(f64::INFINITY)
            .clamp();
        assert_eq!(b.initial_delay, MAX_MAXIMUM_DELAY);
        assert_eq!(b.maximum_delay, MAX_MAXIMUM_DELAY);
        assert_eq!(b.scaling, MAX_SCALING);

        let b = ExponentialBackoffBuilder::new()
            .with_scaling(f64::NAN)
            .clamp();
        assert_eq!(b.scaling, DEFAULT_SCALING);
    }

    #[test]
    fn clamp_keeps_valid_values() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(200))
            .with_maximum_delay(secs(8))
            .with_scaling(3.0)
            .clamp();
        assert_eq!(b.initial_delay, Duration::from_millis(200));
        assert_eq!(b.maximum_delay, secs(8));
        assert_eq!(b.scaling, 3.0);
    }

    #[test]
    fn on_failure_within_ceiling() -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_maximum_delay(Duration::from_millis(800))
            .build()?;
        for attempt in 1..=10_u32 {
            let state = RetryState::new().set_attempt_count(attempt);
            let got = b.on_failure(&state);
            assert!(got <= b.ceiling(attempt), "attempt={attempt} got={got:?}");
        }
        Ok(())
    }

    #[test]
    fn jitter_spreads_delays() -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(secs(10))
            .with_maximum_delay(secs(10))
            .build()?;
        let mut rng = rand::rng();
        let delays: Vec<_> = (0..200).map(|_| b.jittered(1, &mut rng)).collect();
        assert!(delays.iter().all(|d| *d <= secs(10)), "{delays:?}");
        assert!(delays.iter().any(|d| *d < secs(5)), "{delays:?}");
        assert!(delays.iter().any(|d| *d > secs(5)), "{delays:?}");
        Ok(())
    }
}
