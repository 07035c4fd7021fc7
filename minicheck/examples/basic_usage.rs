//! Basic usage: run a few properties and print their reports.
//!
//! Set `RUST_LOG=minicheck=debug` to watch every state transition and shrink step.

use minicheck::{
    Checker, CheckerConfig, Generator, OptionGenerator, Shrinks, format_outcome, shrink_unsigned,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const WEEK: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Picks a random weekday and shrinks toward Monday
struct WeekdayGenerator;

impl Generator<Weekday> for WeekdayGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Weekday {
        self.choose(rng, &WEEK).unwrap_or(Weekday::Monday)
    }

    fn shrink(&self, value: &Weekday) -> Shrinks<'_, Weekday> {
        let index = WEEK.iter().position(|day| day == value).unwrap_or(0);
        Box::new(shrink_unsigned(index).map(|smaller| WEEK[smaller]))
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Saturday | Weekday::Sunday)
}

fn main() -> Result<(), minicheck::CheckError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = CheckerConfig::default().with_seed(2024).with_iterations(1_000);
    let mut checker = Checker::with_config(config)?;
    checker.add_generator::<Weekday, _>(WeekdayGenerator)?;
    checker.add_generator::<Option<u16>, _>(OptionGenerator::new(
        minicheck::UnsignedIntGenerator::<u16>::new(),
    ))?;
    checker.add_vec_generator::<i32>()?;

    println!("Property: reverse(reverse(v)) == v");
    let outcome = checker.run_with(
        |v: Vec<i32>| {
            let mut twice = v.clone();
            twice.reverse();
            twice.reverse();
            (v, twice)
        },
        |(original, twice): &(Vec<i32>, Vec<i32>)| original == twice,
    )?;
    println!("{}\n", format_outcome(&outcome, checker.config()));

    println!("Property: a + b never overflows (it does)");
    let outcome = checker.run2(|a: i32, b: i32| {
        assert!(a.checked_add(b).is_some(), "{} + {} overflows", a, b);
    })?;
    println!("{}\n", format_outcome(&outcome, checker.config()));

    println!("Property: a + b == b + a, checked with a validation function");
    let outcome = checker.run2_with(
        |a: i32, b: i32| (a.wrapping_add(b), b.wrapping_add(a)),
        |(left, right): &(i32, i32)| left == right,
    )?;
    println!("{}\n", format_outcome(&outcome, checker.config()));

    println!("Property: no meetings on the weekend");
    let outcome = checker.run(|day: Weekday| {
        assert!(!is_weekend(day), "{:?} is a weekend day", day);
    })?;
    println!("{}\n", format_outcome(&outcome, checker.config()));

    println!("Property: an optional port is always below 1024");
    let outcome = checker.run_with(|port: Option<u16>| port, |port: &Option<u16>| {
        port.is_none_or(|port| port < 1024)
    })?;
    println!("{}", format_outcome(&outcome, checker.config()));

    Ok(())
}
