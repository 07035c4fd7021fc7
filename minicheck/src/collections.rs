//! Generators for sequences: `Vec<T>` and boxed slices.

use std::marker::PhantomData;

use rand::Rng;

use crate::config::DEFAULT_MAX_SIZE;
use crate::error::CheckError;
use crate::generator::Generator;
use crate::shrink::{SequenceShrinker, Shrinks};

/// Generator for a sequence container `C` of elements `T`.
///
/// Lengths are uniform in `[0, max_size)`. Shrinking goes through
/// [`SequenceShrinker`]: window deletions first, then elementwise shrinks
/// using the element generator.
pub struct SequenceGenerator<C, T, G> {
    element_generator: G,
    max_size: usize,
    _marker: PhantomData<fn() -> (C, T)>,
}

/// Generator for `Vec<T>`
pub type VecGenerator<T, G> = SequenceGenerator<Vec<T>, T, G>;

/// Generator for fixed-length buffers (`Box<[T]>`)
pub type BufferGenerator<T, G> = SequenceGenerator<Box<[T]>, T, G>;

impl<C, T, G> SequenceGenerator<C, T, G> {
    /// Create a sequence generator with the default maximum size
    pub fn new(element_generator: G) -> Self {
        Self {
            element_generator,
            max_size: DEFAULT_MAX_SIZE,
            _marker: PhantomData,
        }
    }

    /// Create a sequence generator bounded by `max_size`, which must be positive
    pub fn with_max_size(element_generator: G, max_size: usize) -> Result<Self, CheckError> {
        if max_size == 0 {
            return Err(CheckError::invalid_argument(
                "sequence generator maximum size must be greater than 0",
            ));
        }

        Ok(Self {
            element_generator,
            max_size,
            _marker: PhantomData,
        })
    }

    /// The exclusive upper bound on generated lengths
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<C, T, G: std::fmt::Debug> std::fmt::Debug for SequenceGenerator<C, T, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceGenerator")
            .field("element_generator", &self.element_generator)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl<C, T, G> Generator<C> for SequenceGenerator<C, T, G>
where
    C: AsRef<[T]> + FromIterator<T> + 'static,
    T: Clone + 'static,
    G: Generator<T>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> C {
        let length = rng.gen_range(0..self.max_size);
        (0..length)
            .map(|_| self.element_generator.generate(rng))
            .collect()
    }

    fn shrink(&self, value: &C) -> Shrinks<'_, C> {
        let elements = value.as_ref();
        if elements.is_empty() {
            return Box::new(std::iter::empty());
        }

        Box::new(SequenceShrinker::<T, C, G>::new(
            elements.to_vec(),
            &self.element_generator,
        ))
    }
}
