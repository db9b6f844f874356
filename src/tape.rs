use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::slice::SliceIndex;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_TAPE_LEN: usize = 8;

/// A circular tape of 1-bit cells with a single head.
///
/// The head wraps modulo the tape length in both directions, so no tape
/// operation can fail once the tape exists. Length is fixed at construction
/// and must be positive.
///
/// Equality and hashing look at the cells only, not the head.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<bool>,
    head: usize,
}

impl Tape {
    /// All-zero tape of `len` cells.
    pub fn new(len: usize) -> Result<Self> {
        Self::from_bits(vec![false; len])
    }

    pub fn from_bits(cells: Vec<bool>) -> Result<Self> {
        if cells.is_empty() {
            return Err(Error::EmptyTape);
        }
        Ok(Self { cells, head: 0 })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed tape.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.cells.get(index).copied()
    }

    /// The bit under the head.
    pub fn bit(&self) -> bool {
        self.cells[self.head]
    }

    pub fn toggle(&mut self) {
        self.cells[self.head] ^= true;
    }

    /// Move the head `n` cells right, wrapping at the end.
    ///
    /// Lands where `n` single wrapping moves would; any `n` is fine, and
    /// `n % len` is taken first so large counts cost nothing extra.
    pub fn move_right(&mut self, n: usize) {
        let len = self.len();
        self.head = (self.head + n % len) % len;
    }

    /// Move the head `n` cells left, wrapping at the start.
    ///
    /// Lands where `n` single wrapping moves would, as with
    /// [`Tape::move_right`].
    pub fn move_left(&mut self, n: usize) {
        let len = self.len();
        self.head = (self.head + len - n % len) % len;
    }

    /// Clear every cell and return the head to 0.
    pub fn reset(&mut self) {
        self.cells.fill(false);
        self.head = 0;
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self {
            cells: vec![false; DEFAULT_TAPE_LEN],
            head: 0,
        }
    }
}

impl<I: SliceIndex<[bool]>> Index<I> for Tape {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.cells[index]
    }
}

impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Tape {}

/// Matches the hash of the bit-string rendering.
impl Hash for Tape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq<[bool]> for Tape {
    fn eq(&self, other: &[bool]) -> bool {
        self.cells == other
    }
}

impl PartialEq<str> for Tape {
    fn eq(&self, other: &str) -> bool {
        self.len() == other.len()
            && self
                .cells
                .iter()
                .zip(other.chars())
                .all(|(&cell, c)| matches!((cell, c), (true, '1') | (false, '0')))
    }
}

impl PartialEq<&str> for Tape {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl TryFrom<usize> for Tape {
    type Error = Error;

    fn try_from(len: usize) -> Result<Self> {
        Tape::new(len)
    }
}

impl TryFrom<Vec<bool>> for Tape {
    type Error = Error;

    fn try_from(cells: Vec<bool>) -> Result<Self> {
        Tape::from_bits(cells)
    }
}

impl TryFrom<&str> for Tape {
    type Error = Error;

    fn try_from(bits: &str) -> Result<Self> {
        bits.parse()
    }
}

impl FromStr for Tape {
    type Err = Error;

    /// Parse a string of `0`/`1`, one cell per character, head at 0.
    fn from_str(s: &str) -> Result<Self> {
        let cells = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidTapeBit(other)),
            })
            .collect::<Result<Vec<_>>>()?;
        Tape::from_bits(cells)
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            f.write_str(if cell { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::DefaultHasher;

    fn tape() -> Tape {
        Tape::new(8).unwrap()
    }

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_is_zeroed() {
        let tape = tape();
        assert_eq!(tape.len(), 8);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.cells(), &[false; 8]);
        assert_eq!(tape.to_string(), "00000000");
    }

    #[test]
    fn test_empty_tape_rejected() {
        assert_eq!(Tape::new(0), Err(Error::EmptyTape));
        assert_eq!("".parse::<Tape>(), Err(Error::EmptyTape));
        assert_eq!(Tape::try_from(Vec::<bool>::new()), Err(Error::EmptyTape));
    }

    #[test]
    fn test_parse() {
        let tape: Tape = "10101010".parse().unwrap();
        assert_eq!(tape, "10101010");
        assert!(tape == [true, false, true, false, true, false, true, false][..]);
        assert_eq!(tape.head(), 0);
        assert_eq!("1021".parse::<Tape>(), Err(Error::InvalidTapeBit('2')));
    }

    #[test]
    fn test_str_equality_needs_matching_length() {
        let tape: Tape = "101".parse().unwrap();
        assert_ne!(tape, "1010");
        assert_ne!(tape, "10");
        assert_ne!(tape, "1x1");
    }

    #[test]
    fn test_indexing() {
        let tape: Tape = "0110".parse().unwrap();
        assert!(!tape[0]);
        assert!(tape[1]);
        assert_eq!(&tape[1..3], &[true, true]);
        assert_eq!(tape.get(3), Some(false));
        assert_eq!(tape.get(4), None);
    }

    #[test]
    fn test_toggle() {
        let mut tape = tape();
        assert!(!tape.bit());
        tape.toggle();
        assert!(tape.bit());
        assert!(tape[0]);
        tape.toggle();
        assert!(!tape.bit());
    }

    #[test]
    fn test_move_wraps() {
        let mut tape = tape();
        for i in 0..7 {
            assert_eq!(tape.head(), i);
            tape.move_right(1);
        }
        assert_eq!(tape.head(), 7);
        tape.move_right(1);
        assert_eq!(tape.head(), 0);
        tape.move_left(1);
        assert_eq!(tape.head(), 7);
        for i in (1..=7).rev() {
            assert_eq!(tape.head(), i);
            tape.move_left(1);
        }
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_move_more_than_length() {
        let mut tape = tape();
        tape.move_right(19);
        assert_eq!(tape.head(), 3);
        tape.move_left(20);
        assert_eq!(tape.head(), 7);
    }

    #[test]
    fn test_reset() {
        let mut tape = tape();
        tape.move_right(3);
        tape.toggle();
        assert_eq!(tape.head(), 3);
        tape.reset();
        assert_eq!(tape.head(), 0);
        assert_eq!(tape, "00000000");
    }

    #[test]
    fn test_clone_keeps_head() {
        let mut tape = tape();
        tape.move_right(5);
        let copy = tape.clone();
        assert_eq!(copy, tape);
        assert_eq!(copy.head(), 5);
    }

    #[test]
    fn test_equality_ignores_head() {
        let a = tape();
        let mut b = tape();
        b.move_right(2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_matches_rendering() {
        let a = tape();
        let mut b: Tape = "00000000".parse().unwrap();
        b.move_right(5);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&a), hash_of("00000000"));
        b.toggle();
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_try_from_str() {
        assert_eq!(Tape::try_from("011").unwrap(), "011");
        assert_eq!(Tape::try_from("01a"), Err(Error::InvalidTapeBit('a')));
    }

    #[test]
    fn test_default_len() {
        assert_eq!(Tape::default().len(), DEFAULT_TAPE_LEN);
    }
}
