use clap::{Parser, Subcommand};
use rbf::exec::run_observed;
use rbf::reverse::reverse_source;
use rbf::source::strip_comments;
use rbf::{Program, Tape};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rbf", about = "Reversible BitFuck interpreter")]
struct Cli {
    /// Log level filter, used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program and print the final tape.
    Run {
        /// Program source. `#` starts a comment; whitespace is ignored.
        source: String,

        /// Initial tape: a string of 0s and 1s, or a tape length.
        #[arg(short, long, default_value = "8")]
        tape: String,

        /// Maximum number of steps to run.
        #[arg(long, default_value_t = 10_000)]
        max_steps: usize,
    },
    /// Print the reversal of a program.
    Reverse {
        /// Program source. `#` starts a comment; whitespace is ignored.
        source: String,
    },
}

/// Parse a tape argument: all-binary text is a bit string, anything else a
/// length.
fn parse_tape(s: &str) -> Result<Tape, String> {
    if !s.is_empty() && s.chars().all(|c| c == '0' || c == '1') {
        debug!("using --tape as a bit string");
        return s.parse().map_err(|e: rbf::Error| e.to_string());
    }
    debug!("using --tape as a length");
    let len = s
        .parse::<usize>()
        .map_err(|e| format!("Invalid tape '{s}': {e}"))?;
    Tape::new(len).map_err(|e| e.to_string())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Run {
            source,
            tape,
            max_steps,
        } => run_command(&source, &tape, max_steps),
        Command::Reverse { source } => reverse_command(&source),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_command(source: &str, tape: &str, max_steps: usize) -> Result<(), String> {
    let program: Program = strip_comments(source)
        .parse()
        .map_err(|e: rbf::Error| e.to_string())?;
    let tape = parse_tape(tape)?;

    let (program, tape) = run_observed(program, tape, max_steps, |program, tape| {
        if let Ok(opcode) = program.current_opcode() {
            trace!(
                steps = program.steps(),
                %opcode,
                pointer = program.pointer(),
                head = tape.head(),
                %tape,
                "step"
            );
        }
        false
    })
    .map_err(|e| e.to_string())?;

    debug!(steps = program.steps(), "finished");
    println!("{tape}");
    Ok(())
}

fn reverse_command(source: &str) -> Result<(), String> {
    let reversed = reverse_source(&strip_comments(source)).map_err(|e| e.to_string())?;
    println!("{reversed}");
    Ok(())
}
