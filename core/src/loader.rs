//! Program file format: one instruction byte per line, as an 8-character
//! binary literal. Blank lines and `#`-comment lines are skipped; trailing
//! characters (including inline `# comment`) are ignored; there's no
//! end-of-file marker.

use std::io::BufRead;

use crate::error::LoadError;
use crate::machine::RAM_SIZE;

/// Parse a program's text source into the bytes that should be loaded
/// into RAM starting at address 0.
pub fn parse_program<R: BufRead>(reader: R) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let literal = trimmed.get(..8).ok_or_else(|| LoadError::InvalidLine {
            line: line_no + 1,
            content: trimmed.to_string(),
        })?;

        let byte = u8::from_str_radix(literal, 2).map_err(|_| LoadError::InvalidLine {
            line: line_no + 1,
            content: trimmed.to_string(),
        })?;

        bytes.push(byte);
    }

    if bytes.len() > RAM_SIZE {
        return Err(LoadError::ProgramTooLarge { bytes: bytes.len() });
    }

    Ok(bytes)
}

/// Parse and load a program file from disk.
pub fn load_program_file(path: &std::path::Path) -> Result<Vec<u8>, LoadError> {
    let file = std::fs::File::open(path)?;
    parse_program(std::io::BufReader::new(file))
}
