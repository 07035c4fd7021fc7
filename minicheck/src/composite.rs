//! Composite generators: optional values and tuples built from other generators.

use rand::Rng;

use crate::error::CheckError;
use crate::generator::Generator;
use crate::shrink::Shrinks;

/// Probability of generating `None` unless configured otherwise
pub const DEFAULT_NONE_PROBABILITY: f64 = 0.25;

/// Generator for `Option<T>`, wrapping a generator for `T`.
///
/// Shrinking `Some(v)` tries `None` first, then every shrink of `v`.
#[derive(Debug, Clone)]
pub struct OptionGenerator<G> {
    inner: G,
    none_probability: f64,
}

impl<G> OptionGenerator<G> {
    /// Create an option generator producing `None` a quarter of the time
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            none_probability: DEFAULT_NONE_PROBABILITY,
        }
    }

    /// Create an option generator with a custom probability of `None`
    pub fn with_none_probability(inner: G, none_probability: f64) -> Result<Self, CheckError> {
        if !(0.0..=1.0).contains(&none_probability) {
            return Err(CheckError::invalid_argument(format!(
                "none probability must be within [0, 1], got {}",
                none_probability
            )));
        }

        Ok(Self {
            inner,
            none_probability,
        })
    }

    /// Probability that `generate` returns `None`
    pub fn none_probability(&self) -> f64 {
        self.none_probability
    }
}

impl<T, G> Generator<Option<T>> for OptionGenerator<G>
where
    T: 'static,
    G: Generator<T>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Option<T> {
        let roll: f64 = rng.r#gen();
        if roll < self.none_probability {
            None
        } else {
            Some(self.inner.generate(rng))
        }
    }

    fn shrink(&self, value: &Option<T>) -> Shrinks<'_, Option<T>> {
        match value {
            None => Box::new(std::iter::empty()),
            Some(inner) => Box::new(std::iter::once(None).chain(self.inner.shrink(inner).map(Some))),
        }
    }
}

/// Generator for tuples, holding one generator per component.
///
/// Components are generated left to right. Shrinking tries every shrink of
/// the first component with the others held fixed, then the second, and so
/// on, so the candidate count is the sum of the components' counts.
#[derive(Debug, Clone)]
pub struct TupleGenerator<Gs> {
    generators: Gs,
}

impl<Gs> TupleGenerator<Gs> {
    /// Create a tuple generator from a tuple of component generators
    pub fn new(generators: Gs) -> Self {
        Self { generators }
    }
}

impl<A, B, GA, GB> Generator<(A, B)> for TupleGenerator<(GA, GB)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    GA: Generator<A>,
    GB: Generator<B>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> (A, B) {
        let (ga, gb) = &self.generators;
        let a = ga.generate(rng);
        let b = gb.generate(rng);
        (a, b)
    }

    fn shrink(&self, value: &(A, B)) -> Shrinks<'_, (A, B)> {
        let (ga, gb) = &self.generators;
        let (a, b) = value.clone();

        let first = {
            let b = b.clone();
            ga.shrink(&value.0).map(move |shrunk| (shrunk, b.clone()))
        };
        let second = gb.shrink(&value.1).map(move |shrunk| (a.clone(), shrunk));

        Box::new(first.chain(second))
    }
}

impl<A, B, C, GA, GB, GC> Generator<(A, B, C)> for TupleGenerator<(GA, GB, GC)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    GA: Generator<A>,
    GB: Generator<B>,
    GC: Generator<C>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> (A, B, C) {
        let (ga, gb, gc) = &self.generators;
        let a = ga.generate(rng);
        let b = gb.generate(rng);
        let c = gc.generate(rng);
        (a, b, c)
    }

    fn shrink(&self, value: &(A, B, C)) -> Shrinks<'_, (A, B, C)> {
        let (ga, gb, gc) = &self.generators;
        let (a, b, c) = value.clone();

        let first = {
            let (b, c) = (b.clone(), c.clone());
            ga.shrink(&value.0)
                .map(move |shrunk| (shrunk, b.clone(), c.clone()))
        };
        let second = {
            let (a, c) = (a.clone(), c);
            gb.shrink(&value.1)
                .map(move |shrunk| (a.clone(), shrunk, c.clone()))
        };
        let third = gc
            .shrink(&value.2)
            .map(move |shrunk| (a.clone(), b.clone(), shrunk));

        Box::new(first.chain(second).chain(third))
    }
}
