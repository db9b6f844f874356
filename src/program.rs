use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::opcode::Opcode;

/// A bracket-balanced RBF program with a pointer and a step counter.
///
/// The opcode sequence is validated once at construction and never changes.
/// Unlike the tape, the pointer does not wrap: moving outside `[0, len)`
/// returns [`Error::PointerRange`], which is how a run ends.
///
/// Equality and hashing use the opcode sequence only (hashing matches the
/// hash of the canonical source string). `Clone` copies pointer and steps.
#[derive(Debug, Clone)]
pub struct Program {
    opcodes: Vec<Opcode>,
    pointer: usize,
    steps: usize,
}

/// Check that loop brackets nest and pair off.
pub fn validate(opcodes: &[Opcode]) -> Result<()> {
    let mut depth: usize = 0;
    for &op in opcodes {
        match op {
            Opcode::LoopStart => depth += 1,
            Opcode::LoopEnd => {
                depth = depth.checked_sub(1).ok_or(Error::UnmatchedLoopEnd)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::UnmatchedLoopStart);
    }
    Ok(())
}

impl Program {
    pub fn new(opcodes: Vec<Opcode>) -> Result<Self> {
        validate(&opcodes)?;
        Ok(Self::from_validated(opcodes))
    }

    /// Caller guarantees `opcodes` is balanced.
    pub(crate) fn from_validated(opcodes: Vec<Opcode>) -> Self {
        Self {
            opcodes,
            pointer: 0,
            steps: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn get(&self, index: usize) -> Option<Opcode> {
        self.opcodes.get(index).copied()
    }

    /// 0-based index of the current opcode.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The opcode under the pointer. Fails only for an empty program.
    pub fn current_opcode(&self) -> Result<Opcode> {
        self.opcodes
            .get(self.pointer)
            .copied()
            .ok_or_else(|| self.out_of_range())
    }

    /// Zero the pointer and step counter. The opcodes are untouched.
    pub fn reset(&mut self) {
        self.pointer = 0;
        self.steps = 0;
    }

    /// Move the pointer right `n` times. Every attempt counts as a step,
    /// including one that fails.
    pub fn move_right(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.steps += 1;
            self.step_right()?;
        }
        Ok(())
    }

    /// Move the pointer left `n` times. Every attempt counts as a step,
    /// including one that fails.
    pub fn move_left(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.steps += 1;
            self.step_left()?;
        }
        Ok(())
    }

    /// Execute the `(` under the pointer.
    ///
    /// With `current_bit` set this only advances past the bracket. Otherwise
    /// the pointer scans right to the matching `)` and then advances past it.
    /// Either way one step is spent. If the bracket being left is the last
    /// opcode the final advance returns [`Error::PointerRange`].
    pub fn loop_start(&mut self, current_bit: bool) -> Result<()> {
        self.expect_current(Opcode::LoopStart)?;
        // Counted up front so a failing advance still spends the step.
        self.steps += 1;

        if !current_bit {
            let mut depth: usize = 1;
            while depth > 0 {
                self.step_right()
                    .map_err(|_| Error::UnmatchedLoopStart)?;
                match self.opcodes[self.pointer] {
                    Opcode::LoopStart => depth += 1,
                    Opcode::LoopEnd => depth -= 1,
                    _ => {}
                }
            }
        }

        self.step_right()
    }

    /// Execute the `)` under the pointer.
    ///
    /// With `current_bit` set this only advances past the bracket. Otherwise
    /// the pointer scans left to the matching `(` and then advances to the
    /// opcode just after it. Either way one step is spent.
    pub fn loop_end(&mut self, current_bit: bool) -> Result<()> {
        self.expect_current(Opcode::LoopEnd)?;
        self.steps += 1;

        if !current_bit {
            let mut depth: usize = 1;
            while depth > 0 {
                self.step_left().map_err(|_| Error::UnmatchedLoopEnd)?;
                match self.opcodes[self.pointer] {
                    Opcode::LoopStart => depth -= 1,
                    Opcode::LoopEnd => depth += 1,
                    _ => {}
                }
            }
        }

        // After a scan we sit on a `(`, which always has its `)` to the right.
        self.step_right()
    }

    fn expect_current(&self, expected: Opcode) -> Result<()> {
        let found = self.current_opcode()?;
        if found != expected {
            return Err(Error::NotOnBracket {
                expected,
                found,
                pointer: self.pointer,
            });
        }
        Ok(())
    }

    fn step_right(&mut self) -> Result<()> {
        if self.pointer + 1 < self.len() {
            self.pointer += 1;
            Ok(())
        } else {
            Err(self.out_of_range())
        }
    }

    fn step_left(&mut self) -> Result<()> {
        if self.pointer > 0 {
            self.pointer -= 1;
            Ok(())
        } else {
            Err(self.out_of_range())
        }
    }

    fn out_of_range(&self) -> Error {
        Error::PointerRange {
            pointer: self.pointer,
            len: self.len(),
        }
    }
}

impl Index<usize> for Program {
    type Output = Opcode;

    fn index(&self, index: usize) -> &Opcode {
        &self.opcodes[index]
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.opcodes == other.opcodes
    }
}

impl Eq for Program {}

impl PartialEq<str> for Program {
    fn eq(&self, other: &str) -> bool {
        self.len() == other.chars().count()
            && self
                .opcodes
                .iter()
                .zip(other.chars())
                .all(|(op, c)| op.symbol() == c)
    }
}

impl PartialEq<&str> for Program {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Program {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl Hash for Program {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl TryFrom<Vec<Opcode>> for Program {
    type Error = Error;

    fn try_from(opcodes: Vec<Opcode>) -> Result<Self> {
        Program::new(opcodes)
    }
}

impl TryFrom<&[Opcode]> for Program {
    type Error = Error;

    fn try_from(opcodes: &[Opcode]) -> Result<Self> {
        Program::new(opcodes.to_vec())
    }
}

impl TryFrom<&str> for Program {
    type Error = Error;

    fn try_from(source: &str) -> Result<Self> {
        source.parse()
    }
}

impl FromStr for Program {
    type Err = Error;

    /// Parse canonical source text. Every character must be an opcode; no
    /// whitespace or comments are accepted here (see [`crate::source`]).
    fn from_str(s: &str) -> Result<Self> {
        let opcodes = s
            .chars()
            .map(Opcode::try_from)
            .collect::<Result<Vec<_>>>()?;
        Program::new(opcodes)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.opcodes {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}


#[cfg(test)]
pub(crate) mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random balanced opcode sequences: stray `)` become `*`, open loops are
    /// closed at the end.
    pub(crate) fn balanced_opcodes(max_len: usize) -> impl Strategy<Value = Vec<Opcode>> {
        prop::collection::vec(0usize..5, 0..max_len).prop_map(|choices| {
            let mut depth = 0usize;
            let mut ops = Vec::with_capacity(choices.len());
            for choice in choices {
                let op = match Opcode::ALL[choice] {
                    Opcode::LoopEnd if depth == 0 => Opcode::Toggle,
                    op => op,
                };
                match op {
                    Opcode::LoopStart => depth += 1,
                    Opcode::LoopEnd => depth -= 1,
                    _ => {}
                }
                ops.push(op);
            }
            ops.extend(std::iter::repeat_n(Opcode::LoopEnd, depth));
            ops
        })
    }

    proptest! {
        #[test]
        fn balanced_sequences_validate(ops in balanced_opcodes(64)) {
            prop_assert!(Program::new(ops).is_ok());
        }

        #[test]
        fn every_move_costs_one_step(ops in balanced_opcodes(32), moves in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut program = Program::new(ops).unwrap();
            for (i, right) in moves.iter().enumerate() {
                let _ = if *right { program.move_right(1) } else { program.move_left(1) };
                prop_assert_eq!(program.steps(), i + 1);
            }
        }

        #[test]
        fn false_bit_lands_past_matching_bracket(ops in balanced_opcodes(48)) {
            let program = Program::new(ops).unwrap();
            for (start, &op) in program.opcodes().iter().enumerate() {
                if op != Opcode::LoopStart {
                    continue;
                }
                let mut depth = 0usize;
                let mut close = start;
                for (i, &other) in program.opcodes().iter().enumerate().skip(start) {
                    match other {
                        Opcode::LoopStart => depth += 1,
                        Opcode::LoopEnd => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        close = i;
                        break;
                    }
                }

                let mut forward = program.clone();
                forward.reset();
                forward.move_right(start).unwrap();
                let result = forward.loop_start(false);
                if close + 1 < forward.len() {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(forward.pointer(), close + 1);
                } else {
                    prop_assert!(result.unwrap_err().is_pointer_range());
                    prop_assert_eq!(forward.pointer(), close);
                }

                let mut backward = program.clone();
                backward.reset();
                backward.move_right(close).unwrap();
                backward.loop_end(false).unwrap();
                prop_assert_eq!(backward.pointer(), start + 1);
            }
        }
    }
}
