pub mod error;
pub mod opcode;
pub mod tape;
pub mod program;
pub mod reverse;
pub mod exec;
pub mod source;

pub use error::{Error, Result};
pub use exec::{run, run_default, run_observed};
pub use opcode::Opcode;
pub use program::Program;
pub use reverse::reverse_program;
pub use tape::Tape;
