//! Bounded fixed-interval retry policy

use std::time::Duration;

use super::clock::Clock;

/// How long and how often to re-probe a condition.
///
/// A poll stops at whichever comes first: `max_attempts` probes, or the
/// `deadline` measured from the start of the poll. Every probe is preceded
/// by a sleep of `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub deadline: Duration,
}

/// Result of a completed poll
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    /// The acceptance predicate matched
    Accepted {
        value: T,
        attempts: u32,
        elapsed: Duration,
    },
    /// The budget ran out before the predicate matched
    Exhausted {
        last: Option<T>,
        attempts: u32,
        elapsed: Duration,
    },
}

impl<T> PollOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PollOutcome::Accepted { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Accepted { attempts, .. } | PollOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    /// Most recent probed value, accepted or not
    pub fn last_value(&self) -> Option<&T> {
        match self {
            PollOutcome::Accepted { value, .. } => Some(value),
            PollOutcome::Exhausted { last, .. } => last.as_ref(),
        }
    }
}

impl RetryPolicy {
    /// Policy whose attempt budget is derived from the deadline
    pub fn new(interval: Duration, deadline: Duration) -> Self {
        let max_attempts = if interval.is_zero() {
            1
        } else {
            let per = interval.as_millis().max(1);
            u32::try_from(deadline.as_millis().div_ceil(per)).unwrap_or(u32::MAX)
        };
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            deadline,
        }
    }

    /// Wait once, probe once.
    ///
    /// The attempt budget alone bounds the poll, so a zero `wait` still
    /// probes.
    pub fn single(wait: Duration) -> Self {
        Self {
            max_attempts: 1,
            interval: wait,
            deadline: Duration::MAX,
        }
    }

    /// Probe until `accept` matches or the budget is spent.
    ///
    /// `probe` receives the 1-based attempt number. A probe error aborts the
    /// poll and is returned as-is.
    pub fn poll<T, E, P, A>(
        &self,
        clock: &dyn Clock,
        mut probe: P,
        accept: A,
    ) -> Result<PollOutcome<T>, E>
    where
        P: FnMut(u32) -> Result<T, E>,
        A: Fn(&T) -> bool,
    {
        let start = clock.now();
        let mut attempts = 0;
        let mut last = None;

        while attempts < self.max_attempts
            && clock.now().saturating_duration_since(start) < self.deadline
        {
            clock.sleep(self.interval);
            attempts += 1;

            let value = probe(attempts)?;
            if accept(&value) {
                return Ok(PollOutcome::Accepted {
                    value,
                    attempts,
                    elapsed: clock.now().saturating_duration_since(start),
                });
            }
            last = Some(value);
        }

        Ok(PollOutcome::Exhausted {
            last,
            attempts,
            elapsed: clock.now().saturating_duration_since(start),
        })
    }
}
