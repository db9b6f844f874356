//! Program reversal.
//!
//! Reversing reads the opcodes back to front and swaps each for its
//! structural pair. Running the reversed program on the tape a run left
//! behind (head included) undoes that run whenever the original only
//! permutes tape bits.

use crate::error::Result;
use crate::opcode::Opcode;
use crate::program::Program;

/// Reverse a raw opcode sequence. No bracket validation happens here.
pub fn reverse_opcodes(opcodes: &[Opcode]) -> Vec<Opcode> {
    opcodes.iter().rev().map(|op| op.pair()).collect()
}

/// Reverse a program. The result starts with a fresh pointer and step
/// counter.
pub fn reverse_program(program: &Program) -> Program {
    // Reversing a balanced sequence and swapping brackets keeps it balanced.
    Program::from_validated(reverse_opcodes(program.opcodes()))
}

/// Parse `source` and return the text of its reversal.
pub fn reverse_source(source: &str) -> Result<String> {
    let program: Program = source.parse()?;
    Ok(reverse_program(&program).to_string())
}
