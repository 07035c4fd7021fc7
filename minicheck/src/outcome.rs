//! The result of a run, and the marker a target uses to reject its input.

use crate::error::{Fault, TargetFailure};

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome<T> {
    /// Every trial that was not discarded held
    Success {
        /// Number of trials executed, discarded ones included
        trials: usize,
        /// Number of trials whose input the target rejected
        discarded: usize,
    },
    /// Every trial was discarded; `input` is the last rejected input
    Discard { input: T },
    /// A trial failed; the failure carries the minimized input
    Failure(TargetFailure<T>),
}

impl<T> TestOutcome<T> {
    /// Check if the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, TestOutcome::Success { .. })
    }

    /// Check if the run found a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, TestOutcome::Failure(_))
    }

    /// Check if every trial was discarded
    pub fn is_discard(&self) -> bool {
        matches!(self, TestOutcome::Discard { .. })
    }

    /// The input attached to this outcome: the minimized failing input, or
    /// the last discarded one
    pub fn input(&self) -> Option<&T> {
        match self {
            TestOutcome::Success { .. } => None,
            TestOutcome::Discard { input } => Some(input),
            TestOutcome::Failure(failure) => Some(&failure.input),
        }
    }

    /// The failure record, if the run failed
    pub fn failure(&self) -> Option<&TargetFailure<T>> {
        match self {
            TestOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// The fault raised by the target on the minimized input, if any
    pub fn fault(&self) -> Option<&Fault> {
        self.failure().and_then(|failure| failure.fault.as_ref())
    }

    /// Consume the outcome, returning the failure record if the run failed
    pub fn into_failure(self) -> Option<TargetFailure<T>> {
        match self {
            TestOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Panic payload used by [`discard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Discarded;

/// Reject the current input from inside a target.
///
/// The trial counts as discarded instead of passing or failing. During
/// shrinking, a discarded candidate does not reproduce the failure.
///
/// Must only be called from a target run by a
/// [`Checker`](crate::checker::Checker); anywhere else it unwinds like a
/// panic.
pub fn discard() -> ! {
    std::panic::resume_unwind(Box::new(Discarded))
}
