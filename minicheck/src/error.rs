//! Error types and failure records for property checking.

use std::any::Any;
use std::fmt;

use crate::config::ConfigError;

/// Fatal errors raised by the harness itself.
///
/// None of these describe a property of the code under test: they signal a
/// misuse of the harness, so they are returned to the caller instead of being
/// shrunk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// No generator is registered for a type the run needs
    #[error(
        "No generator is registered for type '{type_name}'. Add one to your checker before running."
    )]
    MissingGenerator { type_name: &'static str },

    /// A generator is already registered for this type
    #[error("A generator for type '{type_name}' is already registered")]
    DuplicateGenerator { type_name: &'static str },

    /// The validation predicate panicked while checking the target's output
    #[error(
        "The provided validation function panicked on the output of the target with input '{input}': {message}"
    )]
    ValidationFunctionThrew { input: String, message: String },

    /// An argument passed to a generator was out of its domain
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The session configuration failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CheckError {
    pub(crate) fn missing_generator<T: 'static>() -> Self {
        Self::MissingGenerator {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn duplicate_generator<T: 'static>() -> Self {
        Self::DuplicateGenerator {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// The fault raised by a target: the message of the panic it unwound with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    message: String,
}

impl Fault {
    /// Create a fault with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a fault from a panic payload
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self::new(panic_message(payload))
    }

    /// The panic message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// A property violation found by a run, after shrinking.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetFailure<T> {
    /// Smallest failing input found by the shrink search
    pub input: T,
    /// Input of the trial that first failed
    pub original: T,
    /// Panic raised by the target, or `None` when the validation predicate rejected its output
    pub fault: Option<Fault>,
    /// Number of successful shrink steps between `original` and `input`
    pub shrink_steps: usize,
    /// Zero-based index of the trial that first failed
    pub trial: usize,
}

impl<T> TargetFailure<T> {
    /// Whether shrinking found an input smaller than the original one
    pub fn was_shrunk(&self) -> bool {
        self.shrink_steps > 0
    }

    /// Get a concise summary of the failure
    pub fn summary(&self) -> String
    where
        T: fmt::Debug,
    {
        if self.was_shrunk() {
            format!(
                "Property failed with input {:?} (shrunk from {:?}) on trial {}",
                self.input, self.original, self.trial
            )
        } else {
            format!(
                "Property failed with input {:?} on trial {}",
                self.input, self.trial
            )
        }
    }
}

impl<T: fmt::Debug> fmt::Display for TargetFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
