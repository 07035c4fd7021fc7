//! # minicheck - Property-Based Testing with Bisecting Shrinkers
//!
//! minicheck runs a target function against randomly generated inputs and,
//! when the target fails, searches for the smallest input that still makes it
//! fail. Shrinking is deterministic: integers bisect toward zero, sequences
//! drop windows and then shrink element by element, and composites shrink one
//! component at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use minicheck::{Checker, CheckerConfig, TestOutcome};
//!
//! let config = CheckerConfig::default().with_seed(42).with_iterations(500);
//! let mut checker = Checker::with_config(config).unwrap();
//!
//! // Passes for every input
//! let outcome = checker.run(|x: i64| x.wrapping_mul(2) % 2 == 0).unwrap();
//! assert!(outcome.is_success());
//!
//! // Fails for most inputs; the failure is shrunk before it is reported
//! let outcome = checker
//!     .run_with(|x: i32| x, |y: &i32| *y < 1000)
//!     .unwrap();
//! assert_eq!(outcome.input(), Some(&1000));
//! println!("{}", outcome);
//! ```
//!
//! Custom types plug in by implementing [`Generator`] and registering the
//! generator with [`Checker::add_generator`].

pub mod checker;
pub mod collections;
pub mod composite;
pub mod config;
pub mod error;
pub mod generator;
pub mod outcome;
pub mod primitives;
pub mod report;
pub mod rng;
pub mod shrink;

// Re-export the main public API
pub use checker::{Checker, RunState};
pub use collections::{BufferGenerator, SequenceGenerator, VecGenerator};
pub use composite::{DEFAULT_NONE_PROBABILITY, OptionGenerator, TupleGenerator};
pub use config::{CheckerConfig, ConfigError, DEFAULT_ITERATIONS, DEFAULT_MAX_SIZE};
pub use error::{CheckError, Fault, TargetFailure};
pub use generator::{Generator, GeneratorRegistry, SharedGenerator};
pub use outcome::{TestOutcome, discard};
pub use primitives::*;
pub use report::format_outcome;
pub use rng::{DefaultRngProvider, RngProvider, session_rng};
pub use shrink::{
    SequenceShrinker, Shrinks, SignedShrinker, UnsignedShrinker, shrink_signed, shrink_unsigned,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.effective_max_size(), DEFAULT_MAX_SIZE);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_public_api_round_trip() {
        let mut checker = Checker::with_config(CheckerConfig::default().with_seed(1)).unwrap();
        checker
            .add_generator::<Option<i32>, _>(OptionGenerator::new(SignedIntGenerator::<i32>::new()))
            .unwrap();

        let outcome = checker
            .run(|x: Option<i32>| {
                assert!(x.is_none(), "got a value");
            })
            .unwrap();

        // None passes, so the smallest failing input is Some(0)
        assert_eq!(outcome.input(), Some(&Some(0)));
        assert_eq!(outcome.to_string(), "Test failed with input 'Some(0)'.");
    }

    #[test]
    fn test_shrinkers_are_reusable() {
        assert_eq!(shrink_signed(4_i32).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(shrink_unsigned(4_u32).collect::<Vec<_>>(), vec![0, 2, 1]);

        let generator = BoolGenerator;
        let shrinks: Vec<Vec<bool>> =
            SequenceShrinker::<_, Vec<bool>, _>::new(vec![true], &generator).collect();
        assert_eq!(shrinks, vec![vec![], vec![false]]);
    }
}
