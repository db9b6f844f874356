use std::fmt;

use crate::error::{Error, Result};

/// The five RBF instructions.
///
/// `Toggle` is its own structural pair; `TapeRight`/`TapeLeft` and
/// `LoopStart`/`LoopEnd` pair with each other. The pairing drives program
/// reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Flip the bit under the tape head.
    Toggle,
    /// Move the tape head one cell right.
    TapeRight,
    /// Move the tape head one cell left.
    TapeLeft,
    /// If the current bit is zero, jump past the matching `)`.
    LoopStart,
    /// If the current bit is zero, jump back to just after the matching `(`.
    LoopEnd,
}

const TOGGLE: char = '*';
const TAPE_RIGHT: char = '>';
const TAPE_LEFT: char = '<';
const LOOP_START: char = '(';
const LOOP_END: char = ')';

/// Structural pair of each opcode, indexed by discriminant.
const PAIRS: [Opcode; 5] = [
    Opcode::Toggle,
    Opcode::TapeLeft,
    Opcode::TapeRight,
    Opcode::LoopEnd,
    Opcode::LoopStart,
];

impl Opcode {
    pub const ALL: [Opcode; 5] = [
        Opcode::Toggle,
        Opcode::TapeRight,
        Opcode::TapeLeft,
        Opcode::LoopStart,
        Opcode::LoopEnd,
    ];

    /// Canonical one-character form.
    pub const fn symbol(self) -> char {
        match self {
            Opcode::Toggle => TOGGLE,
            Opcode::TapeRight => TAPE_RIGHT,
            Opcode::TapeLeft => TAPE_LEFT,
            Opcode::LoopStart => LOOP_START,
            Opcode::LoopEnd => LOOP_END,
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            TOGGLE => Some(Opcode::Toggle),
            TAPE_RIGHT => Some(Opcode::TapeRight),
            TAPE_LEFT => Some(Opcode::TapeLeft),
            LOOP_START => Some(Opcode::LoopStart),
            LOOP_END => Some(Opcode::LoopEnd),
            _ => None,
        }
    }

    /// The opcode that undoes this one when a program is reversed.
    pub fn pair(self) -> Self {
        PAIRS[self as usize]
    }
}

impl TryFrom<char> for Opcode {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        Opcode::from_symbol(c).ok_or(Error::InvalidOpcode(c))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
