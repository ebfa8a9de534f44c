//! Fatal error types for the machine and the program loader.
//!
//! Hand-rolled `Display`/`Error` impls, matching the convention already
//! used for `RomLoadError`-style errors elsewhere in this codebase: no
//! `anyhow`/`thiserror`, just plain enums at the library boundary.

use std::fmt;

/// Why the control unit's `run` loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `HLT` executed normally.
    Halted,
}

/// A fatal condition raised by the control unit or ALU. The caller prints
/// a diagnostic, dumps a trace line, and exits with a nonzero status —
/// the core itself never calls `std::process::exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    /// `DIV`/`MOD` with a zero divisor register.
    DivisionByZero { opcode: u8 },
    /// Bit 5 of the opcode was set but no ALU operation matches it.
    UnknownAluOpcode { opcode: u8 },
    /// No non-ALU operation matches the fetched opcode.
    UnknownOpcode { opcode: u8 },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero { opcode } => {
                write!(f, "division by zero (opcode 0x{opcode:02X})")
            }
            Self::UnknownAluOpcode { opcode } => {
                write!(f, "unsupported ALU operation: 0x{opcode:02X}")
            }
            Self::UnknownOpcode { opcode } => {
                write!(f, "unknown instruction encountered: 0x{opcode:02X}")
            }
        }
    }
}

impl std::error::Error for MachineError {}

/// Errors encountered while parsing a program file into RAM bytes.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// A non-blank, non-comment line's first 8 characters aren't a valid
    /// binary literal.
    InvalidLine { line: usize, content: String },
    /// The program doesn't fit in the 256-byte address space.
    ProgramTooLarge { bytes: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidLine { line, content } => {
                write!(f, "line {line}: not a valid 8-bit binary literal: {content:?}")
            }
            Self::ProgramTooLarge { bytes } => {
                write!(f, "program has {bytes} instructions, but RAM holds only 256")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
