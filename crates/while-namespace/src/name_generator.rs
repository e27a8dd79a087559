//! Component C9: a deterministic `A, B, …, Z, AA, AB, …`
//! enumeration. Follows `Assigner`'s shape
//! (`compiler/passes/src/common/assigner/mod.rs`) for the split between a
//! `RefCell`-wrapped public handle and a plain inner counter — except the
//! counter here is a base-26 digit string, not an integer.

use std::cell::RefCell;

/// A strictly increasing stream of alphabetic names. `RefCell`-wrapped so
/// callers can share one generator without threading `&mut` through the
/// whole program manager, the same interior-mutability idiom used for its
/// own counters elsewhere in this toolchain.
#[derive(Debug, Default)]
pub struct NameGenerator {
    inner: RefCell<NameGeneratorInner>,
}

impl NameGenerator {
    /// The first name emitted is `A` repeated `max(1, min_length)` times.
    pub fn new(min_length: usize) -> Self {
        Self { inner: RefCell::new(NameGeneratorInner::new(min_length)) }
    }

    /// Returns the current name, advancing the generator first if
    /// `increment` is set.
    pub fn next(&self, increment: bool) -> String {
        self.inner.borrow_mut().next(increment)
    }

    /// The name `skip + 1` advances from now, without consuming any of
    /// them — computed against a private clone of the counter state.
    pub fn peek_ahead(&self, skip: usize) -> String {
        let mut probe = self.inner.borrow().clone();
        for _ in 0..skip {
            probe.next(true);
        }
        probe.next(false)
    }
}

#[derive(Debug, Clone)]
struct NameGeneratorInner {
    // Base-26 digits, most significant first; each in 0..=25 standing for 'A'..='Z'.
    digits: Vec<u8>,
}

impl NameGeneratorInner {
    fn new(min_length: usize) -> Self {
        Self { digits: vec![0; min_length.max(1)] }
    }

    fn next(&mut self, increment: bool) -> String {
        let name = render(&self.digits);
        if increment {
            advance(&mut self.digits);
        }
        name
    }
}

impl Default for NameGeneratorInner {
    fn default() -> Self {
        Self::new(1)
    }
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'A' + d) as char).collect()
}

/// Overflow at any position carries to the position on its left; overflow
/// at the leftmost position extends the string with a new leading `A`.
fn advance(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 25 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_single_letters_first() {
        let gen = NameGenerator::new(0);
        assert_eq!(gen.next(true), "A");
        assert_eq!(gen.next(true), "B");
    }

    #[test]
    fn rolls_over_from_z_to_aa() {
        let gen = NameGenerator::new(0);
        for _ in 0..25 {
            gen.next(true);
        }
        assert_eq!(gen.next(true), "Z");
        assert_eq!(gen.next(true), "AA");
        assert_eq!(gen.next(true), "AB");
    }

    #[test]
    fn min_length_pads_the_first_name() {
        let gen = NameGenerator::new(3);
        assert_eq!(gen.next(true), "AAA");
        assert_eq!(gen.next(true), "AAB");
    }

    #[test]
    fn no_increment_peeks_without_advancing() {
        let gen = NameGenerator::new(0);
        assert_eq!(gen.next(false), "A");
        assert_eq!(gen.next(false), "A");
        assert_eq!(gen.next(true), "A");
        assert_eq!(gen.next(false), "B");
    }

    #[test]
    fn carries_past_a_full_run_of_z() {
        let digits = vec![25, 25];
        let mut digits = digits;
        advance(&mut digits);
        assert_eq!(render(&digits), "AAA");
    }
}
