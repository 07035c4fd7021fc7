//! Shrinking functionality for minimizing failing test cases.
//!
//! Every shrinker here is a lazy iterator. Callers usually stop pulling
//! candidates as soon as one of them still fails, so nothing past that point
//! is ever computed.

mod integer;
mod sequence;

pub use integer::{SignedShrinker, UnsignedShrinker, shrink_signed, shrink_unsigned};
pub use sequence::SequenceShrinker;

/// A lazy, finite, forward-only stream of shrink candidates
pub type Shrinks<'a, T> = Box<dyn Iterator<Item = T> + 'a>;
