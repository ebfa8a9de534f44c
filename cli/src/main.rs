//! Driver binary: parses arguments, loads a program, and runs it to
//! completion or a fatal error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vm8_core::device::Keyboard;
use vm8_core::error::{ExitReason, LoadError, MachineError};
use vm8_core::loader;
use vm8_core::machine::Machine;

#[derive(Parser)]
#[command(name = "vm8", about = "Run an 8-bit machine-code program")]
struct Args {
    /// Path to a program file (one binary-literal instruction per line).
    input_file: PathBuf,

    /// Print a per-cycle trace line to stdout.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let bytes = match loader::load_program_file(&args.input_file) {
        Ok(bytes) => bytes,
        Err(err) => return report_load_error(&args.input_file, &err),
    };

    let machine = Machine::new();
    machine.load_program(&bytes);
    machine.spawn(Keyboard::from_stdin());

    match machine.run(args.debug) {
        Ok(ExitReason::Halted) => ExitCode::SUCCESS,
        Err(err) => report_machine_error(&err),
    }
}

fn report_load_error(path: &std::path::Path, err: &LoadError) -> ExitCode {
    eprintln!("{}: {err}", path.display());
    ExitCode::FAILURE
}

fn report_machine_error(err: &MachineError) -> ExitCode {
    eprintln!("fatal: {err}");
    ExitCode::FAILURE
}
