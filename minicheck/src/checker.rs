//! The checking session: generator registry, random source and the
//! run/shrink driver.

use std::any::type_name;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::collections::VecGenerator;
use crate::composite::TupleGenerator;
use crate::config::CheckerConfig;
use crate::error::{CheckError, Fault, TargetFailure, panic_message};
use crate::generator::{Generator, GeneratorRegistry, SharedGenerator};
use crate::outcome::{Discarded, TestOutcome};
use crate::primitives::{
    BoolGenerator, CharGenerator, SignedIntGenerator, StringGenerator, UnsignedIntGenerator,
};
use crate::rng::session_rng;

/// Lifecycle of the most recent run of a [`Checker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has started yet
    Idle,
    /// Trials are being generated and executed
    Running,
    /// A failure was found and is being minimized
    Shrinking,
    /// The last run ended without a failure
    Succeeded,
    /// The last run found a failure or was aborted by an error
    Failed,
}

/// What a single execution of the target amounted to
enum Verdict {
    Pass,
    Discard,
    Fail(Option<Fault>),
}

/// A property checking session.
///
/// A session owns its generator registry and a single random source. All
/// runs of a session draw from that source in order, so two sessions built
/// with the same seed and the same registrations replay identical trials and
/// reach identical minimized failures.
pub struct Checker {
    registry: GeneratorRegistry,
    config: CheckerConfig,
    rng: StdRng,
    state: RunState,
}

impl Checker {
    /// Create a session with the default configuration and the built-in generators
    pub fn new() -> Self {
        let mut checker = Self::empty();
        checker.register_builtins(StringGenerator::default());
        checker
    }

    /// Create a session with the built-in generators, sized after `config`
    pub fn with_config(config: CheckerConfig) -> Result<Self, CheckError> {
        let mut checker = Self::empty_with_config(config)?;
        let strings = StringGenerator::new(checker.config.effective_max_size())?;
        checker.register_builtins(strings);
        Ok(checker)
    }

    /// Create a session with the default configuration and no generators
    pub fn empty() -> Self {
        let config = CheckerConfig::default();
        Self {
            registry: GeneratorRegistry::new(),
            rng: session_rng(config.seed),
            config,
            state: RunState::Idle,
        }
    }

    /// Create a session with no generators
    pub fn empty_with_config(config: CheckerConfig) -> Result<Self, CheckError> {
        config.validate()?;
        Ok(Self {
            registry: GeneratorRegistry::new(),
            rng: session_rng(config.seed),
            config,
            state: RunState::Idle,
        })
    }

    fn register_builtins(&mut self, strings: StringGenerator) {
        self.registry.try_add::<bool, _>(BoolGenerator);
        self.registry.try_add::<i8, _>(SignedIntGenerator::<i8>::new());
        self.registry.try_add::<i16, _>(SignedIntGenerator::<i16>::new());
        self.registry.try_add::<i32, _>(SignedIntGenerator::<i32>::new());
        self.registry.try_add::<i64, _>(SignedIntGenerator::<i64>::new());
        self.registry.try_add::<u8, _>(UnsignedIntGenerator::<u8>::new());
        self.registry.try_add::<u16, _>(UnsignedIntGenerator::<u16>::new());
        self.registry.try_add::<u32, _>(UnsignedIntGenerator::<u32>::new());
        self.registry.try_add::<u64, _>(UnsignedIntGenerator::<u64>::new());
        self.registry.try_add::<char, _>(CharGenerator);
        self.registry.try_add::<String, _>(strings);
    }

    /// Register a generator for `T`, failing if one is already registered
    pub fn add_generator<T, G>(&mut self, generator: G) -> Result<(), CheckError>
    where
        T: 'static,
        G: Generator<T> + Send + Sync + 'static,
    {
        self.registry.add::<T, G>(generator)
    }

    /// Register a generator for `T` unless one is already registered
    pub fn try_add_generator<T, G>(&mut self, generator: G) -> bool
    where
        T: 'static,
        G: Generator<T> + Send + Sync + 'static,
    {
        self.registry.try_add::<T, G>(generator)
    }

    /// Register a `Vec<T>` generator built on the registered generator for `T`.
    ///
    /// Uses the session's maximum size. Returns `false` if `Vec<T>` is
    /// already covered.
    pub fn add_vec_generator<T>(&mut self) -> Result<bool, CheckError>
    where
        T: Clone + 'static,
    {
        if self.registry.contains::<Vec<T>>() {
            return Ok(false);
        }

        let element = self.registry.require::<T>()?;
        let generator =
            VecGenerator::<T, _>::with_max_size(element, self.config.effective_max_size())?;
        Ok(self.registry.try_add::<Vec<T>, _>(generator))
    }

    /// The generators known to this session
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// The session configuration
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// State of the most recent run
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run `target` against random inputs until it panics or the trials run out.
    ///
    /// A panicking target is a failure; its input is then shrunk to a local
    /// minimum that still panics.
    pub fn run<T, O, F>(&mut self, target: F) -> Result<TestOutcome<T>, CheckError>
    where
        T: Clone + Debug + 'static,
        F: Fn(T) -> O,
    {
        self.check(&target, None)
    }

    /// Like [`run`](Self::run), but outputs for which `validate` returns
    /// `false` are failures too.
    ///
    /// A panic inside `validate` aborts the run with
    /// [`CheckError::ValidationFunctionThrew`].
    pub fn run_with<T, O, F, V>(
        &mut self,
        target: F,
        validate: V,
    ) -> Result<TestOutcome<T>, CheckError>
    where
        T: Clone + Debug + 'static,
        F: Fn(T) -> O,
        V: Fn(&O) -> bool,
    {
        self.check(&target, Some(&validate))
    }

    /// Run a two-argument target; inputs and failures are reported as pairs
    pub fn run2<A, B, O, F>(&mut self, target: F) -> Result<TestOutcome<(A, B)>, CheckError>
    where
        A: Clone + Debug + 'static,
        B: Clone + Debug + 'static,
        F: Fn(A, B) -> O,
    {
        self.register_pair::<A, B>()?;
        self.run(move |(a, b): (A, B)| target(a, b))
    }

    /// Two-argument form of [`run_with`](Self::run_with)
    pub fn run2_with<A, B, O, F, V>(
        &mut self,
        target: F,
        validate: V,
    ) -> Result<TestOutcome<(A, B)>, CheckError>
    where
        A: Clone + Debug + 'static,
        B: Clone + Debug + 'static,
        F: Fn(A, B) -> O,
        V: Fn(&O) -> bool,
    {
        self.register_pair::<A, B>()?;
        self.run_with(move |(a, b): (A, B)| target(a, b), validate)
    }

    /// Run a three-argument target; inputs and failures are reported as triples
    pub fn run3<A, B, C, O, F>(
        &mut self,
        target: F,
    ) -> Result<TestOutcome<(A, B, C)>, CheckError>
    where
        A: Clone + Debug + 'static,
        B: Clone + Debug + 'static,
        C: Clone + Debug + 'static,
        F: Fn(A, B, C) -> O,
    {
        self.register_triple::<A, B, C>()?;
        self.run(move |(a, b, c): (A, B, C)| target(a, b, c))
    }

    /// Three-argument form of [`run_with`](Self::run_with)
    pub fn run3_with<A, B, C, O, F, V>(
        &mut self,
        target: F,
        validate: V,
    ) -> Result<TestOutcome<(A, B, C)>, CheckError>
    where
        A: Clone + Debug + 'static,
        B: Clone + Debug + 'static,
        C: Clone + Debug + 'static,
        F: Fn(A, B, C) -> O,
        V: Fn(&O) -> bool,
    {
        self.register_triple::<A, B, C>()?;
        self.run_with(move |(a, b, c): (A, B, C)| target(a, b, c), validate)
    }

    // A tuple generator registered by the user, or by an earlier run, wins.
    fn register_pair<A, B>(&mut self) -> Result<(), CheckError>
    where
        A: Clone + 'static,
        B: Clone + 'static,
    {
        if self.registry.contains::<(A, B)>() {
            return Ok(());
        }

        self.transition(RunState::Running);
        let components = (self.component::<A>()?, self.component::<B>()?);
        self.registry
            .try_add::<(A, B), _>(TupleGenerator::new(components));
        Ok(())
    }

    fn register_triple<A, B, C>(&mut self) -> Result<(), CheckError>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Clone + 'static,
    {
        if self.registry.contains::<(A, B, C)>() {
            return Ok(());
        }

        self.transition(RunState::Running);
        let components = (
            self.component::<A>()?,
            self.component::<B>()?,
            self.component::<C>()?,
        );
        self.registry
            .try_add::<(A, B, C), _>(TupleGenerator::new(components));
        Ok(())
    }

    fn component<T: 'static>(&mut self) -> Result<SharedGenerator<T>, CheckError> {
        self.registry
            .require::<T>()
            .map_err(|error| self.abort(error))
    }

    fn abort(&mut self, error: CheckError) -> CheckError {
        self.transition(RunState::Failed);
        error
    }

    fn transition(&mut self, next: RunState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "run state transition");
        self.state = next;
    }

    fn check<T, O>(
        &mut self,
        target: &dyn Fn(T) -> O,
        validate: Option<&dyn Fn(&O) -> bool>,
    ) -> Result<TestOutcome<T>, CheckError>
    where
        T: Clone + Debug + 'static,
    {
        self.transition(RunState::Running);
        let result = self.campaign(target, validate);

        match &result {
            Ok(TestOutcome::Failure(_)) | Err(_) => self.transition(RunState::Failed),
            Ok(_) => self.transition(RunState::Succeeded),
        }
        result
    }

    fn campaign<T, O>(
        &mut self,
        target: &dyn Fn(T) -> O,
        validate: Option<&dyn Fn(&O) -> bool>,
    ) -> Result<TestOutcome<T>, CheckError>
    where
        T: Clone + Debug + 'static,
    {
        let generator = self.registry.require::<T>()?;
        let iterations = self.config.iterations;

        info!(
            input_type = type_name::<T>(),
            iterations,
            seed = ?self.config.seed,
            "starting property check"
        );

        let mut discarded = 0;
        let mut last_discarded = None;

        for trial in 0..iterations {
            let input = generator.generate(&mut self.rng);

            match execute(target, validate, &input)? {
                Verdict::Pass => {}
                Verdict::Discard => {
                    discarded += 1;
                    last_discarded = Some(input);
                }
                Verdict::Fail(fault) => {
                    debug!(trial, input = ?input, "trial failed");
                    let failure =
                        self.minimize(&*generator, target, validate, input, fault, trial)?;
                    info!(
                        trial,
                        shrink_steps = failure.shrink_steps,
                        input = ?failure.input,
                        "property failed"
                    );
                    return Ok(TestOutcome::Failure(failure));
                }
            }
        }

        if discarded == iterations
            && let Some(input) = last_discarded
        {
            info!(discarded, "every trial was discarded");
            return Ok(TestOutcome::Discard { input });
        }

        info!(trials = iterations, discarded, "property held");
        Ok(TestOutcome::Success {
            trials: iterations,
            discarded,
        })
    }

    /// Depth-first descent: the first candidate that still fails replaces the
    /// current input, and its own shrinks are searched next. Ends when no
    /// candidate of the current input fails.
    fn minimize<T, O>(
        &mut self,
        generator: &dyn Generator<T>,
        target: &dyn Fn(T) -> O,
        validate: Option<&dyn Fn(&O) -> bool>,
        original: T,
        fault: Option<Fault>,
        trial: usize,
    ) -> Result<TargetFailure<T>, CheckError>
    where
        T: Clone + Debug,
    {
        self.transition(RunState::Shrinking);

        let mut current = original.clone();
        let mut current_fault = fault;
        let mut shrink_steps = 0;

        'descent: loop {
            for candidate in generator.shrink(&current) {
                match execute(target, validate, &candidate)? {
                    Verdict::Fail(fault) => {
                        shrink_steps += 1;
                        debug!(step = shrink_steps, input = ?candidate, "shrunk failing input");
                        current = candidate;
                        current_fault = fault;
                        continue 'descent;
                    }
                    Verdict::Pass | Verdict::Discard => {
                        trace!(input = ?candidate, "candidate does not reproduce the failure");
                    }
                }
            }
            break;
        }

        Ok(TargetFailure {
            input: current,
            original,
            fault: current_fault,
            shrink_steps,
            trial,
        })
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

/// Run the target once on a copy of `input`, then the validation predicate
/// on its output.
fn execute<T, O>(
    target: &dyn Fn(T) -> O,
    validate: Option<&dyn Fn(&O) -> bool>,
    input: &T,
) -> Result<Verdict, CheckError>
where
    T: Clone + Debug,
{
    let output = match panic::catch_unwind(AssertUnwindSafe(|| target(input.clone()))) {
        Ok(output) => output,
        Err(payload) if payload.is::<Discarded>() => return Ok(Verdict::Discard),
        Err(payload) => return Ok(Verdict::Fail(Some(Fault::from_panic(&*payload)))),
    };

    let Some(validate) = validate else {
        return Ok(Verdict::Pass);
    };

    match panic::catch_unwind(AssertUnwindSafe(|| validate(&output))) {
        Ok(true) => Ok(Verdict::Pass),
        Ok(false) => Ok(Verdict::Fail(None)),
        Err(payload) if payload.is::<Discarded>() => Ok(Verdict::Discard),
        Err(payload) => Err(CheckError::ValidationFunctionThrew {
            input: format!("{:?}", input),
            message: panic_message(&*payload),
        }),
    }
}
