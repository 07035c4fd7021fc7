//! Two-phase shrinker for sequences: window deletion, then elementwise shrinking.

use std::marker::PhantomData;

use crate::generator::Generator;
use crate::shrink::Shrinks;

/// Lazily shrinks a nonempty sequence into smaller sequences of type `C`.
///
/// The first candidate is always the empty sequence. Then windows of
/// `len / 2`, `len / 4`, ... elements are removed at every aligned offset,
/// ddmin style. Once the window size reaches zero, each position in turn is
/// replaced by the candidates of its element generator, all other elements
/// unchanged. Candidates never grow and never equal the input.
///
/// `C` is the container built for each candidate, so the same shrinker serves
/// `Vec<T>`, `Box<[T]>` and `String` (as a sequence of `char`).
pub struct SequenceShrinker<'a, T, C, G: ?Sized> {
    from: Vec<T>,
    generator: &'a G,
    phase: Phase<'a, T>,
    _container: PhantomData<fn() -> C>,
}

enum Phase<'a, T> {
    Empty,
    Delete { size: usize, offset: usize },
    Elements { position: usize, candidates: Shrinks<'a, T> },
    Done,
}

impl<'a, T, C, G> SequenceShrinker<'a, T, C, G>
where
    T: Clone,
    C: FromIterator<T>,
    G: Generator<T> + ?Sized,
{
    /// Create a shrinker over `from`, shrinking elements with `generator`
    pub fn new(from: Vec<T>, generator: &'a G) -> Self {
        let phase = if from.is_empty() {
            Phase::Done
        } else {
            Phase::Empty
        };

        Self {
            from,
            generator,
            phase,
            _container: PhantomData,
        }
    }

    fn element_phase(&self, position: usize) -> Phase<'a, T> {
        let generator: &'a G = self.generator;
        match self.from.get(position) {
            Some(element) => Phase::Elements {
                position,
                candidates: generator.shrink(element),
            },
            None => Phase::Done,
        }
    }

    fn without(&self, start: usize, end: usize) -> C {
        self.from[..start]
            .iter()
            .chain(&self.from[end..])
            .cloned()
            .collect()
    }

    fn replaced(&self, position: usize, value: T) -> C {
        self.from[..position]
            .iter()
            .cloned()
            .chain(std::iter::once(value))
            .chain(self.from[position + 1..].iter().cloned())
            .collect()
    }
}

impl<'a, T, C, G> Iterator for SequenceShrinker<'a, T, C, G>
where
    T: Clone,
    C: FromIterator<T>,
    G: Generator<T> + ?Sized,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        loop {
            match &mut self.phase {
                Phase::Empty => {
                    let size = self.from.len() / 2;
                    self.phase = Phase::Delete { size, offset: size };
                    return Some(std::iter::empty::<T>().collect());
                }
                Phase::Delete { size, offset } => {
                    if *size == 0 {
                        self.phase = self.element_phase(0);
                        continue;
                    }

                    let (start, end) = (*offset - *size, *offset);
                    *offset += *size;
                    if *offset > self.from.len() {
                        *size /= 2;
                        *offset = *size;
                    }
                    return Some(self.without(start, end));
                }
                Phase::Elements {
                    position,
                    candidates,
                } => {
                    let position = *position;
                    if let Some(value) = candidates.next() {
                        return Some(self.replaced(position, value));
                    }
                    self.phase = self.element_phase(position + 1);
                }
                Phase::Done => return None,
            }
        }
    }
}
