//! Generators for primitive types: booleans, integers, characters and strings.

use std::marker::PhantomData;

use num_traits::{PrimInt, Signed, Unsigned};
use rand::Rng;
use rand::distributions::{Distribution, Standard};

use crate::config::DEFAULT_MAX_SIZE;
use crate::error::CheckError;
use crate::generator::Generator;
use crate::shrink::{SequenceShrinker, Shrinks, shrink_signed, shrink_unsigned};

/// One in this many integers is drawn from the type's boundary values
const EDGE_CASE_ODDS: u32 = 10;

/// Generator for boolean values
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolGenerator;

impl Generator<bool> for BoolGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> bool {
        rng.gen_bool(0.5)
    }

    fn shrink(&self, value: &bool) -> Shrinks<'_, bool> {
        if *value {
            Box::new(std::iter::once(false))
        } else {
            Box::new(std::iter::empty())
        }
    }
}

/// Generator for signed integers over the whole domain of `T`.
///
/// `MIN`, `0` and `MAX` are drawn far more often than uniform sampling
/// would, since they are the usual suspects for overflow bugs.
#[derive(Debug, Clone, Copy)]
pub struct SignedIntGenerator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SignedIntGenerator<T> {
    /// Create a new signed integer generator
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SignedIntGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Generator<T> for SignedIntGenerator<T>
where
    T: PrimInt + Signed + 'static,
    Standard: Distribution<T>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> T {
        if rng.gen_range(0..EDGE_CASE_ODDS) == 0
            && let Ok(edge) = self.choose(rng, &[T::min_value(), T::zero(), T::max_value()])
        {
            return edge;
        }
        rng.r#gen()
    }

    fn shrink(&self, value: &T) -> Shrinks<'_, T> {
        Box::new(shrink_signed(*value))
    }
}

/// Generator for unsigned integers over the whole domain of `T`, favouring
/// `0`, `1` and `MAX`
#[derive(Debug, Clone, Copy)]
pub struct UnsignedIntGenerator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> UnsignedIntGenerator<T> {
    /// Create a new unsigned integer generator
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for UnsignedIntGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Generator<T> for UnsignedIntGenerator<T>
where
    T: PrimInt + Unsigned + 'static,
    Standard: Distribution<T>,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> T {
        if rng.gen_range(0..EDGE_CASE_ODDS) == 0
            && let Ok(edge) = self.choose(rng, &[T::zero(), T::one(), T::max_value()])
        {
            return edge;
        }
        rng.r#gen()
    }

    fn shrink(&self, value: &T) -> Shrinks<'_, T> {
        Box::new(shrink_unsigned(*value))
    }
}

/// Generator for Unicode scalar values.
///
/// Shrinks by bisecting the code point toward `'\0'`; candidates that land
/// in the surrogate range are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharGenerator;

impl CharGenerator {
    /// Create a new character generator
    pub fn new() -> Self {
        Self
    }
}

impl Generator<char> for CharGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> char {
        rng.r#gen()
    }

    fn shrink(&self, value: &char) -> Shrinks<'_, char> {
        Box::new(shrink_unsigned(u32::from(*value)).filter_map(char::from_u32))
    }
}

/// Generator for strings of up to `max_size - 1` characters
#[derive(Debug, Clone)]
pub struct StringGenerator {
    char_generator: CharGenerator,
    max_size: usize,
}

impl StringGenerator {
    /// Create a string generator bounded by `max_size`, which must be positive
    pub fn new(max_size: usize) -> Result<Self, CheckError> {
        if max_size == 0 {
            return Err(CheckError::invalid_argument(
                "string generator maximum size must be greater than 0",
            ));
        }

        Ok(Self {
            char_generator: CharGenerator,
            max_size,
        })
    }

    /// The exclusive upper bound on generated lengths, in characters
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for StringGenerator {
    fn default() -> Self {
        Self {
            char_generator: CharGenerator,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl Generator<String> for StringGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> String {
        let length = rng.gen_range(0..self.max_size);
        (0..length)
            .map(|_| self.char_generator.generate(rng))
            .collect()
    }

    fn shrink(&self, value: &String) -> Shrinks<'_, String> {
        let chars: Vec<char> = value.chars().collect();
        Box::new(SequenceShrinker::<char, String, _>::new(
            chars,
            &self.char_generator,
        ))
    }
}
