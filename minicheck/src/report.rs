//! Human-readable rendering of run outcomes.

use std::fmt;

use crate::config::CheckerConfig;
use crate::outcome::TestOutcome;

impl<T: fmt::Debug> fmt::Display for TestOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Success { .. } => write!(f, "Test succeeded."),
            TestOutcome::Discard { input } => write!(f, "Input '{:?}' was discarded.", input),
            TestOutcome::Failure(failure) => {
                write!(f, "Test failed with input '{:?}'.", failure.input)
            }
        }
    }
}

/// Format an outcome as a multi-line report.
///
/// The first line is the one-line summary. Failures add the original input,
/// the shrink step count, the fault and, for seeded sessions, the seed that
/// reproduces them.
pub fn format_outcome<T: fmt::Debug>(outcome: &TestOutcome<T>, config: &CheckerConfig) -> String {
    let mut output = outcome.to_string();

    match outcome {
        TestOutcome::Success { trials, discarded } => {
            output.push_str(&format!("\nTrials: {} ({} discarded)", trials, discarded));
        }
        TestOutcome::Discard { .. } => {
            output.push_str(&format!(
                "\nAll {} trials were discarded",
                config.iterations
            ));
        }
        TestOutcome::Failure(failure) => {
            output.push_str(&format!(
                "\nOriginal failing input: {:?} (trial {})",
                failure.original, failure.trial
            ));

            if failure.was_shrunk() {
                output.push_str(&format!(
                    "\nMinimal failing input: {:?} (found after {} shrinking steps)",
                    failure.input, failure.shrink_steps
                ));
            }

            match &failure.fault {
                Some(fault) => output.push_str(&format!("\nFault: {}", fault)),
                None => output.push_str("\nFault: none (the output was rejected by validation)"),
            }
        }
    }

    if let Some(seed) = config.seed {
        output.push_str(&format!("\nSeed: {}", seed));
        if outcome.is_failure() {
            output.push_str(" (use this to reproduce the failure)");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Fault, TargetFailure};

    fn failure(shrink_steps: usize, fault: Option<Fault>) -> TestOutcome<i32> {
        TestOutcome::Failure(TargetFailure {
            input: 2,
            original: 17244,
            fault,
            shrink_steps,
            trial: 4,
        })
    }

    #[test]
    fn test_one_line_summaries() {
        let success: TestOutcome<i32> = TestOutcome::Success {
            trials: 10,
            discarded: 1,
        };
        assert_eq!(success.to_string(), "Test succeeded.");

        let discard = TestOutcome::Discard {
            input: "abc".to_string(),
        };
        assert_eq!(discard.to_string(), "Input '\"abc\"' was discarded.");

        assert_eq!(
            failure(3, None).to_string(),
            "Test failed with input '2'."
        );
    }

    #[test]
    fn test_failure_report() {
        let config = CheckerConfig::default().with_seed(42);
        let report = format_outcome(&failure(6, Some(Fault::new("even"))), &config);

        assert_eq!(
            report,
            "Test failed with input '2'.\n\
             Original failing input: 17244 (trial 4)\n\
             Minimal failing input: 2 (found after 6 shrinking steps)\n\
             Fault: even\n\
             Seed: 42 (use this to reproduce the failure)"
        );
    }

    #[test]
    fn test_unshrunk_rejection_report() {
        let report = format_outcome(&failure(0, None), &CheckerConfig::default());

        assert!(report.contains("Original failing input: 17244"));
        assert!(!report.contains("Minimal failing input"));
        assert!(report.contains("rejected by validation"));
        assert!(!report.contains("Seed"));
    }

    #[test]
    fn test_success_report() {
        let config = CheckerConfig::default().with_seed(7);
        let success: TestOutcome<i32> = TestOutcome::Success {
            trials: 100,
            discarded: 5,
        };

        assert_eq!(
            format_outcome(&success, &config),
            "Test succeeded.\nTrials: 100 (5 discarded)\nSeed: 7"
        );
    }
}
