//! Error types for parsing and running RBF programs.

use std::convert::Infallible;

use thiserror::Error;

use crate::opcode::Opcode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid program: '{0}' is not a valid opcode")]
    InvalidOpcode(char),

    #[error("invalid program: unmatched loop start")]
    UnmatchedLoopStart,

    #[error("invalid program: unmatched loop end")]
    UnmatchedLoopEnd,

    /// The program pointer tried to leave `[0, len)`. The engine treats this
    /// as the program running off its end.
    #[error("program pointer out of range at {pointer} (length {len})")]
    PointerRange { pointer: usize, len: usize },

    #[error("expected {expected} at program pointer {pointer}, found {found}")]
    NotOnBracket {
        expected: Opcode,
        found: Opcode,
        pointer: usize,
    },

    #[error("invalid tape: '{0}' is not a binary digit")]
    InvalidTapeBit(char),

    #[error("invalid tape: length must be positive")]
    EmptyTape,
}

/// Lets an already-built `Program` or `Tape` go wherever a raw form is
/// accepted.
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl Error {
    pub fn is_pointer_range(&self) -> bool {
        matches!(self, Error::PointerRange { .. })
    }

    pub fn is_invalid_program(&self) -> bool {
        matches!(
            self,
            Error::InvalidOpcode(_) | Error::UnmatchedLoopStart | Error::UnmatchedLoopEnd
        )
    }
}
