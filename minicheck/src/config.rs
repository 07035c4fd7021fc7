//! Configuration types for controlling a checking session.

/// Default number of trials run by a session
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Default upper bound (exclusive) on the length of generated collections and strings
pub const DEFAULT_MAX_SIZE: usize = 64;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid number of iterations (must be > 0)
    #[error("Invalid iterations count: {0} (must be > 0)")]
    InvalidIterations(usize),
    /// Invalid maximum size (must be > 0)
    #[error("Invalid maximum size: {0} (must be > 0)")]
    InvalidMaxSize(usize),
}

/// Configuration for a [`Checker`](crate::Checker) session.
///
/// The configuration is fixed once the session is built. `max_size` only
/// applies to the size-bounded built-in generators; custom generators are
/// configured before they are registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Number of random trials to run against the target
    pub iterations: usize,
    /// Optional seed for reproducible sessions
    pub seed: Option<u64>,
    /// Optional override of the maximum size used by built-in collection generators
    pub max_size: Option<usize>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            max_size: None,
        }
    }
}

impl CheckerConfig {
    /// Create a new configuration with validation
    pub fn new(
        iterations: usize,
        seed: Option<u64>,
        max_size: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            iterations,
            seed,
            max_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the number of trials
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fix the seed of the session random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the maximum size of built-in collection generators
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// The maximum size built-in generators should use
    pub fn effective_max_size(&self) -> usize {
        self.max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if let Some(0) = self.max_size {
            return Err(ConfigError::InvalidMaxSize(0));
        }
        Ok(())
    }
}
