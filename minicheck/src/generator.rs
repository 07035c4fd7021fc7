//! Core generator infrastructure and registry system.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::error::CheckError;
use crate::shrink::Shrinks;

/// Core generator trait for creating random test data and shrinking it.
///
/// Implementations must keep `shrink` finite and must never yield the value
/// being shrunk. An already minimal value shrinks to an empty stream.
pub trait Generator<T> {
    /// Generate a random value, consuming only the provided random source
    fn generate(&self, rng: &mut dyn rand::RngCore) -> T;

    /// Pick one of `options` uniformly at random
    fn choose(&self, rng: &mut dyn rand::RngCore, options: &[T]) -> Result<T, CheckError>
    where
        T: Clone,
    {
        options
            .choose(rng)
            .cloned()
            .ok_or_else(|| CheckError::invalid_argument("cannot choose from an empty set of options"))
    }

    /// Create a lazy stream of values smaller than `value`, most reduced first
    fn shrink(&self, value: &T) -> Shrinks<'_, T>;
}

impl<T, G> Generator<T> for Arc<G>
where
    G: Generator<T> + ?Sized,
{
    fn generate(&self, rng: &mut dyn rand::RngCore) -> T {
        (**self).generate(rng)
    }

    fn shrink(&self, value: &T) -> Shrinks<'_, T> {
        (**self).shrink(value)
    }
}

/// A generator handle that can be shared between the registry and composite generators
pub type SharedGenerator<T> = Arc<dyn Generator<T> + Send + Sync>;

/// Type-safe registry holding at most one generator per generated type
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl GeneratorRegistry {
    /// Create a new empty generator registry
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Register a generator for `T`, failing if one is already registered
    pub fn add<T, G>(&mut self, generator: G) -> Result<(), CheckError>
    where
        T: 'static,
        G: Generator<T> + Send + Sync + 'static,
    {
        if self.try_add::<T, G>(generator) {
            Ok(())
        } else {
            Err(CheckError::duplicate_generator::<T>())
        }
    }

    /// Register a generator for `T` unless one is already registered.
    ///
    /// Returns `false` and leaves the existing registration in place when
    /// the type is already covered.
    pub fn try_add<T, G>(&mut self, generator: G) -> bool
    where
        T: 'static,
        G: Generator<T> + Send + Sync + 'static,
    {
        let shared: SharedGenerator<T> = Arc::new(generator);
        self.try_add_shared(shared)
    }

    /// Register an already shared generator for `T` unless one is already registered
    pub fn try_add_shared<T: 'static>(&mut self, generator: SharedGenerator<T>) -> bool {
        match self.generators.entry(TypeId::of::<T>()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(Box::new(generator));
                true
            }
        }
    }

    /// Get the generator for a specific type
    pub fn get<T: 'static>(&self) -> Option<SharedGenerator<T>> {
        self.generators
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<SharedGenerator<T>>())
            .cloned()
    }

    /// Get the generator for a specific type, or a `MissingGenerator` error
    pub fn require<T: 'static>(&self) -> Result<SharedGenerator<T>, CheckError> {
        self.get::<T>()
            .ok_or_else(CheckError::missing_generator::<T>)
    }

    /// Check if a generator is registered for a specific type
    pub fn contains<T: 'static>(&self) -> bool {
        self.generators.contains_key(&TypeId::of::<T>())
    }

    /// Get the number of registered generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("len", &self.generators.len())
            .finish()
    }
}
