use tracing::debug;

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::program::Program;
use crate::tape::Tape;

/// Step budget used when a caller has no better number.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The observer asked to stop before an instruction.
    Observer,
    /// The program pointer ran off the program.
    Completed,
    /// `max_steps` steps were spent.
    StepLimit,
}

/// Execute the instruction under the program pointer.
///
/// A [`crate::Error::PointerRange`] result means the program ran off its end.
pub fn step(program: &mut Program, tape: &mut Tape) -> Result<()> {
    let opcode = program.current_opcode()?;
    let bit = tape.bit();

    match opcode {
        Opcode::Toggle => {
            tape.toggle();
            program.move_right(1)
        }
        Opcode::TapeRight => {
            tape.move_right(1);
            program.move_right(1)
        }
        Opcode::TapeLeft => {
            tape.move_left(1);
            program.move_right(1)
        }
        Opcode::LoopStart => program.loop_start(bit),
        Opcode::LoopEnd => program.loop_end(bit),
    }
}

/// Run `program` on `tape` until it runs off its end or `program.steps()`
/// reaches `max_steps`.
///
/// Either argument may be given in raw form (source text or opcodes for the
/// program, a length or bit string for the tape); construction errors are
/// returned before anything runs. The step counter is not reset first, so a
/// program carried over from an earlier run keeps counting against the same
/// budget.
pub fn run<P, T>(program: P, tape: T, max_steps: usize) -> Result<(Program, Tape)>
where
    P: TryInto<Program>,
    T: TryInto<Tape>,
    Error: From<P::Error> + From<T::Error>,
{
    run_observed(program, tape, max_steps, |_, _| false)
}

/// [`run`] with a budget of [`DEFAULT_MAX_STEPS`].
pub fn run_default<P, T>(program: P, tape: T) -> Result<(Program, Tape)>
where
    P: TryInto<Program>,
    T: TryInto<Tape>,
    Error: From<P::Error> + From<T::Error>,
{
    run(program, tape, DEFAULT_MAX_STEPS)
}

/// Like [`run`], but calls `observer` before every instruction. Returning
/// `true` from the observer stops the run without executing that
/// instruction.
pub fn run_observed<P, T, F>(
    program: P,
    tape: T,
    max_steps: usize,
    mut observer: F,
) -> Result<(Program, Tape)>
where
    P: TryInto<Program>,
    T: TryInto<Tape>,
    Error: From<P::Error> + From<T::Error>,
    F: FnMut(&Program, &Tape) -> bool,
{
    let mut program: Program = program.try_into()?;
    let mut tape: Tape = tape.try_into()?;

    let halt = loop {
        if program.steps() >= max_steps {
            break Halt::StepLimit;
        }
        if observer(&program, &tape) {
            break Halt::Observer;
        }
        match step(&mut program, &mut tape) {
            Ok(()) => {}
            Err(e) if e.is_pointer_range() => break Halt::Completed,
            Err(e) => return Err(e),
        }
    };

    debug!(
        ?halt,
        steps = program.steps(),
        pointer = program.pointer(),
        head = tape.head(),
        "run halted"
    );
    Ok((program, tape))
}
