//! Per-cycle debug trace formatting (`-d` flag).

use crate::machine::MachineState;

/// Format one `TRACE: ...` line: PC, the three bytes at `ram[pc..pc+3]`,
/// and all eight registers, all as uppercase two-digit hex.
///
/// Example: `TRACE: 0A | 82 00 01 | 00 00 00 00 00 00 F4 00`
pub fn format_line(state: &MachineState) -> String {
    let pc = state.pc;
    let b0 = state.read(pc);
    let b1 = state.read(pc.wrapping_add(1));
    let b2 = state.read(pc.wrapping_add(2));

    let mut line = format!("TRACE: {pc:02X} | {b0:02X} {b1:02X} {b2:02X} |");
    for reg in state.reg {
        line.push_str(&format!(" {reg:02X}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fields_as_uppercase_hex() {
        let mut state = MachineState::new();
        state.pc = 0x0A;
        state.ram[0x0A] = 0x82;
        state.ram[0x0B] = 0x00;
        state.ram[0x0C] = 0x01;
        state.reg = [0, 0, 0, 0, 0, 0, 0xF4, 0];
        assert_eq!(
            format_line(&state),
            "TRACE: 0A | 82 00 01 | 00 00 00 00 00 00 F4 00"
        );
    }
}
