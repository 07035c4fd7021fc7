//! End-to-end tests of checking sessions: campaigns, shrinking, errors and determinism.

use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};

use minicheck::{
    CheckError, Checker, CheckerConfig, Generator, OptionGenerator, RunState, Shrinks,
    SignedIntGenerator, TestOutcome, discard, format_outcome, shrink_signed,
};

/// Generates the same integer every time and shrinks it like any `i32`
struct FixedStart(i32);

impl Generator<i32> for FixedStart {
    fn generate(&self, _rng: &mut dyn rand::RngCore) -> i32 {
        self.0
    }

    fn shrink(&self, value: &i32) -> Shrinks<'_, i32> {
        Box::new(shrink_signed(*value))
    }
}

/// Always yields the same pair and never shrinks it
struct FixedPair(i32, i32);

impl Generator<(i32, i32)> for FixedPair {
    fn generate(&self, _rng: &mut dyn rand::RngCore) -> (i32, i32) {
        (self.0, self.1)
    }

    fn shrink(&self, _value: &(i32, i32)) -> Shrinks<'_, (i32, i32)> {
        Box::new(std::iter::empty())
    }
}

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn seeded(seed: u64) -> Checker {
    Checker::with_config(CheckerConfig::default().with_seed(seed)).unwrap()
}

fn fails_on_nonzero_even(x: i32) {
    if x != 0 && x % 2 == 0 {
        panic!("{} is even", x);
    }
}

#[test]
fn test_unary_even_failure_shrinks_to_two() {
    for start in [17244, 1000, 100, 64, 40, 8, 123456, 1 << 30, -(1 << 30)] {
        let mut checker = Checker::empty();
        checker.add_generator::<i32, _>(FixedStart(start)).unwrap();

        let outcome = checker.run(fails_on_nonzero_even).unwrap();
        let failure = outcome.into_failure().unwrap();

        assert_eq!(failure.input, 2, "start = {}", start);
        assert_eq!(failure.original, start);
        assert_eq!(
            failure.fault.as_ref().map(|fault| fault.message()),
            Some("2 is even")
        );
    }
}

#[test]
fn test_random_even_failure_stays_even() {
    for seed in 0..10 {
        let mut checker = seeded(seed);
        let outcome = checker.run(fails_on_nonzero_even).unwrap();

        let input = *outcome.input().unwrap();
        assert!(input != 0 && input % 2 == 0, "seed = {}, input = {}", seed, input);
        assert!(input.unsigned_abs() <= outcome.failure().unwrap().original.unsigned_abs());
    }
}

#[test]
fn test_binary_even_failure_shrinks_to_even_pair() {
    let mut checker = seeded(2024);
    let outcome = checker
        .run2(|a: i32, b: i32| {
            if a != 0 && b != 0 && a % 2 == 0 && b % 2 == 0 {
                panic!("both even");
            }
        })
        .unwrap();

    let (a, b) = *outcome.input().unwrap();
    assert!(a != 0 && a % 2 == 0, "a = {}", a);
    assert!(b != 0 && b % 2 == 0, "b = {}", b);
    assert_eq!(checker.state(), RunState::Failed);
}

#[test]
fn test_division_by_zero_is_a_fault() {
    let mut checker = seeded(7);
    let outcome = checker.run2(|a: i32, b: i32| a / b).unwrap();

    let failure = outcome.into_failure().unwrap();
    assert_eq!(failure.input, (0, 0));
    assert!(
        failure
            .fault
            .as_ref()
            .is_some_and(|fault| fault.message().contains("divide by zero"))
    );
}

#[test]
fn test_same_seed_replays_same_session() {
    fn record(seed: u64) -> (Vec<i32>, TestOutcome<i32>) {
        let seen = RefCell::new(Vec::new());
        let mut checker = seeded(seed);
        let outcome = checker
            .run(|x: i32| {
                seen.borrow_mut().push(x);
                assert!(x.rem_euclid(7) != 3, "bad residue");
            })
            .unwrap();
        (seen.into_inner(), outcome)
    }

    let (inputs1, outcome1) = record(4242);
    let (inputs2, outcome2) = record(4242);
    assert_eq!(inputs1, inputs2);
    assert_eq!(outcome1, outcome2);
    assert!(outcome1.is_failure());

    let (inputs3, _) = record(4343);
    assert_ne!(inputs1, inputs3);
}

#[test]
fn test_missing_generator_is_reported() {
    let mut checker = Checker::empty();
    let error = checker.run(|x: i32| x).unwrap_err();
    assert_eq!(error, CheckError::MissingGenerator { type_name: "i32" });
    assert!(error.to_string().contains("No generator is registered for type 'i32'"));
}

#[test]
fn test_duplicate_generator_is_rejected() {
    let mut checker = Checker::new();
    let error = checker
        .add_generator::<i32, _>(SignedIntGenerator::<i32>::new())
        .unwrap_err();
    assert_eq!(error, CheckError::DuplicateGenerator { type_name: "i32" });

    assert!(!checker.try_add_generator::<i32, _>(FixedStart(3)));
    assert!(checker.try_add_generator::<Option<i32>, _>(OptionGenerator::new(FixedStart(3))));
}

#[test]
fn test_throwing_validation_is_fatal() {
    let mut checker = seeded(1);
    let error = checker
        .run_with(|x: u8| x, |_: &u8| -> bool { panic!("cannot validate") })
        .unwrap_err();

    match error {
        CheckError::ValidationFunctionThrew { message, .. } => {
            assert_eq!(message, "cannot validate");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(checker.state(), RunState::Failed);
}

#[test]
fn test_every_trial_discarded() {
    let mut checker =
        Checker::with_config(CheckerConfig::default().with_seed(5).with_iterations(20)).unwrap();
    let outcome = checker
        .run(|c: char| {
            if c != '\0' {
                discard();
            }
        })
        .unwrap();

    assert!(outcome.is_discard());
    assert!(outcome.to_string().ends_with("was discarded."));
}

#[test]
fn test_double_reverse_holds_for_vectors() {
    let mut checker = seeded(12);
    checker.add_vec_generator::<i32>().unwrap();

    let outcome = checker
        .run_with(
            |v: Vec<i32>| {
                let mut twice = v.clone();
                twice.reverse();
                twice.reverse();
                (v, twice)
            },
            |(original, twice): &(Vec<i32>, Vec<i32>)| original == twice,
        )
        .unwrap();
    assert!(outcome.is_success());
}

#[test]
fn test_single_reverse_shrinks_to_smallest_non_palindrome() {
    let mut checker = seeded(13);
    checker.add_vec_generator::<i32>().unwrap();

    let outcome = checker
        .run_with(
            |v: Vec<i32>| {
                let mut reversed = v.clone();
                reversed.reverse();
                (v, reversed)
            },
            |(original, reversed): &(Vec<i32>, Vec<i32>)| original == reversed,
        )
        .unwrap();

    let failure = outcome.into_failure().unwrap();
    let minimal = &failure.input;
    assert!(
        minimal == &vec![0, 1] || minimal == &vec![1, 0],
        "minimal = {:?}",
        minimal
    );
    assert!(failure.fault.is_none());
}

#[test]
fn test_failure_report_mentions_seed() {
    let mut checker = Checker::with_config(CheckerConfig::default().with_seed(99)).unwrap();

    let outcome = checker.run(|x: i64| assert!(x < 100, "too large")).unwrap();
    let report = format_outcome(&outcome, checker.config());

    assert!(report.starts_with("Test failed with input '100'."));
    assert!(report.contains("Fault: too large"));
    assert!(report.ends_with("Seed: 99 (use this to reproduce the failure)"));
}

#[test]
fn test_ternary_failure_shrinks_and_unpacks_triple() {
    let mut checker = seeded(3);
    let outcome = checker
        .run3(|a: u8, b: u8, c: u8| {
            assert!(c < 128, "{} is too large", c);
            (a, b)
        })
        .unwrap();

    let failure = outcome.into_failure().unwrap();
    let (a, b, c) = failure.input;
    let (original_a, original_b, original_c) = failure.original;

    assert_eq!((a, b), (0, 0));
    assert!((128..=original_c).contains(&c), "c = {}", c);
    assert!(original_a > a || original_b > b || original_c > c);
    assert!(failure.was_shrunk());
    assert!(failure.fault.is_some_and(|fault| fault.message().ends_with("is too large")));
    assert_eq!(checker.state(), RunState::Failed);
}

#[test]
fn test_registered_pair_generator_takes_precedence() {
    let mut checker = seeded(21);
    checker.add_generator::<(i32, i32), _>(FixedPair(40, 60)).unwrap();
    let registered = checker.registry().len();

    let outcome = checker
        .run2(|a: i32, b: i32| assert!(a + b != 100, "sums to 100"))
        .unwrap();

    let failure = outcome.into_failure().unwrap();
    assert_eq!(failure.input, (40, 60));
    assert_eq!(failure.trial, 0);
    assert!(!failure.was_shrunk());
    assert_eq!(checker.registry().len(), registered);
}

#[test]
fn test_missing_component_run_passes_through_running() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let mut checker = Checker::new();
    let error = tracing::subscriber::with_default(subscriber, || {
        checker.run3(|_: i32, _: bool, _: u128| ()).unwrap_err()
    });

    assert_eq!(error, CheckError::MissingGenerator { type_name: "u128" });
    assert_eq!(checker.state(), RunState::Failed);

    let logs = logs.contents();
    assert!(logs.contains("from=Idle to=Running"), "{}", logs);
    assert!(logs.contains("from=Running to=Failed"), "{}", logs);
    assert!(!logs.contains("from=Idle to=Failed"), "{}", logs);
}
