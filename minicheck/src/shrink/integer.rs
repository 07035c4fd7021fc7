//! Bisecting shrinkers for signed and unsigned integers.

use num_traits::{PrimInt, Signed, Unsigned};

/// Shrink a signed integer toward zero.
///
/// Yields `0`, then the positive mirror of a negative value (except for
/// `MIN`, whose mirror is not representable), then `from - delta` for
/// `delta = from / 2, from / 4, ...` until `delta` reaches zero. `from` itself
/// is never yielded.
pub fn shrink_signed<T: PrimInt + Signed>(from: T) -> SignedShrinker<T> {
    SignedShrinker::new(from)
}

/// Shrink an unsigned integer toward zero.
///
/// Yields `0`, then repeatedly subtracts a halving `delta` from a running
/// value, starting from `delta = from / 2`.
pub fn shrink_unsigned<T: PrimInt + Unsigned>(from: T) -> UnsignedShrinker<T> {
    UnsignedShrinker::new(from)
}

/// Iterator returned by [`shrink_signed`]
#[derive(Debug, Clone)]
pub struct SignedShrinker<T> {
    from: T,
    delta: T,
    emit_zero: bool,
    mirror: Option<T>,
}

impl<T: PrimInt + Signed> SignedShrinker<T> {
    fn new(from: T) -> Self {
        let two = T::one() + T::one();
        let mirror = if from < T::zero() {
            // MIN has no positive mirror
            T::zero().checked_sub(&from)
        } else {
            None
        };

        Self {
            from,
            delta: from / two,
            emit_zero: !from.is_zero(),
            mirror,
        }
    }
}

impl<T: PrimInt + Signed> Iterator for SignedShrinker<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.emit_zero {
            self.emit_zero = false;
            return Some(T::zero());
        }

        if let Some(mirror) = self.mirror.take() {
            return Some(mirror);
        }

        // `delta` has the sign of `from` and at most half its magnitude, so
        // the subtraction cannot overflow, even for MIN.
        if self.delta.is_zero() {
            return None;
        }

        let candidate = self.from - self.delta;
        self.delta = self.delta / (T::one() + T::one());
        Some(candidate)
    }
}

/// Iterator returned by [`shrink_unsigned`]
#[derive(Debug, Clone)]
pub struct UnsignedShrinker<T> {
    current: T,
    delta: T,
    emit_zero: bool,
}

impl<T: PrimInt + Unsigned> UnsignedShrinker<T> {
    fn new(from: T) -> Self {
        Self {
            current: from,
            delta: from / (T::one() + T::one()),
            emit_zero: !from.is_zero(),
        }
    }
}

impl<T: PrimInt + Unsigned> Iterator for UnsignedShrinker<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.emit_zero {
            self.emit_zero = false;
            return Some(T::zero());
        }

        if self.delta.is_zero() {
            return None;
        }

        self.current = self.current - self.delta;
        self.delta = self.delta / (T::one() + T::one());
        Some(self.current)
    }
}
