//! Non-ALU operations: data movement, stack, control flow, I/O, and the
//! interrupt return path.

use crate::error::{ExitReason, MachineError};
use crate::machine::{Flag, MachineState, IVT_BASE, IS};

/// Execute a non-ALU opcode. `operand_count` is passed through so `INT`
/// can replicate the normal PC advance itself (see the comment on `int`).
pub(super) fn execute(
    state: &mut MachineState,
    opcode: u8,
    a: u8,
    b: u8,
    operand_count: u8,
) -> Result<Option<ExitReason>, MachineError> {
    match opcode {
        0x00 => {} // NOP
        0x01 => return Ok(Some(ExitReason::Halted)), // HLT
        0x82 => ldi(state, a, b),
        0x83 => ld(state, a, b),
        0x84 => st(state, a, b),
        0x47 => prn(state, a),
        0x48 => pra(state, a),
        0x49 => prm(state, a, b),
        0x45 => push(state, a),
        0x46 => pop(state, a),
        0x50 => call(state, a),
        0x11 => ret(state),
        0x54 => jmp(state, a),
        0x55 => jeq(state, a),
        0x56 => jne(state, a),
        0x58 => jlt(state, a),
        0x57 => jgt(state, a),
        0x59 => jle(state, a),
        0x5A => jge(state, a),
        0x52 => int(state, a, operand_count),
        0x13 => iret(state),
        _ => return Err(MachineError::UnknownOpcode { opcode }),
    }
    Ok(None)
}

fn ldi(state: &mut MachineState, r: u8, immediate: u8) {
    state.reg[r as usize] = immediate;
}

fn ld(state: &mut MachineState, ra: u8, rb: u8) {
    let addr = state.reg[rb as usize];
    state.reg[ra as usize] = state.read(addr);
}

fn st(state: &mut MachineState, ra: u8, rb: u8) {
    let addr = state.reg[ra as usize];
    state.write(addr, state.reg[rb as usize]);
}

fn prn(state: &MachineState, r: u8) {
    println!("{}", state.reg[r as usize]);
}

fn pra(state: &MachineState, r: u8) {
    println!("{}", state.reg[r as usize] as char);
}

/// `PRM Ra,Rb`: print `ram[reg[Ra]..=reg[Rb]]` decoded as characters,
/// followed by a newline. When `reg[Ra] > reg[Rb]` the range is empty
/// (matching the reference implementation's `range(reg[ra], reg[rb]+1)`,
/// which yields nothing rather than wrapping around the address space),
/// so only a bare newline is printed.
///
/// The opcode's top two bits decode to operand count 1, so the control
/// unit only advances `pc` by 2 after this instruction even though two
/// register operands follow it in RAM. That mismatch is in the encoding
/// itself, not one of the documented corrections, so it's kept as-is:
/// the byte at `pc+2` is still read and used as `Rb` here, but the next
/// fetch starts from `pc+2`, reusing that same byte as the next opcode.
fn prm(state: &MachineState, ra: u8, rb: u8) {
    println!("{}", prm_range(state, ra, rb));
}

/// The decoded-character range `PRM` prints, factored out so it can be
/// exercised by a test without capturing stdout.
fn prm_range(state: &MachineState, ra: u8, rb: u8) -> String {
    let start = state.reg[ra as usize];
    let end = state.reg[rb as usize];
    let mut out = String::new();
    if start <= end {
        let mut addr = start;
        loop {
            out.push(state.read(addr) as char);
            if addr == end {
                break;
            }
            addr = addr.wrapping_add(1);
        }
    }
    out
}

fn push(state: &mut MachineState, r: u8) {
    let value = state.reg[r as usize];
    state.push_byte(value);
}

fn pop(state: &mut MachineState, r: u8) {
    state.reg[r as usize] = state.pop_byte();
}

fn call(state: &mut MachineState, r: u8) {
    let return_addr = state.pc.wrapping_add(2);
    state.push_byte(return_addr);
    state.pc = state.reg[r as usize];
}

fn ret(state: &mut MachineState) {
    state.pc = state.pop_byte();
}

fn jmp(state: &mut MachineState, r: u8) {
    state.pc = state.reg[r as usize];
}

fn jeq(state: &mut MachineState, r: u8) {
    branch_if(state, r, state.flag_set(Flag::Equal));
}

fn jne(state: &mut MachineState, r: u8) {
    branch_if(state, r, !state.flag_set(Flag::Equal));
}

fn jlt(state: &mut MachineState, r: u8) {
    branch_if(state, r, state.flag_set(Flag::Less));
}

fn jgt(state: &mut MachineState, r: u8) {
    branch_if(state, r, state.flag_set(Flag::Greater));
}

fn jle(state: &mut MachineState, r: u8) {
    branch_if(state, r, state.flag_set(Flag::Less) || state.flag_set(Flag::Equal));
}

fn jge(state: &mut MachineState, r: u8) {
    branch_if(state, r, state.flag_set(Flag::Greater) || state.flag_set(Flag::Equal));
}

fn branch_if(state: &mut MachineState, r: u8, taken: bool) {
    if taken {
        state.pc = state.reg[r as usize];
    } else {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// `INT Rn`: software-raise the interrupt bit named by the *value* held in
/// `Rn`, i.e. set bit `reg[Rn]` of the Interrupt Status register.
///
/// `reg[Rn]` is an arbitrary byte supplied by the emulated program, not
/// guaranteed to be under 8, so it's masked to 0..7 before use as a shift
/// amount — the same treatment `alu::shl`/`alu::shr` give a
/// register-controlled shift count, and for the same reason: an
/// unmasked `1 << bit` panics on overflow in a debug build for any
/// `bit >= 8`.
///
/// The original encoding marks this opcode as self-updating PC (so the
/// control unit skips its usual post-execute advance) even though `INT`'s
/// own semantics never touch `pc`. Left unhandled, that would spin on the
/// same `INT` instruction forever, so this replicates the advance the
/// control unit would otherwise have done.
fn int(state: &mut MachineState, r: u8, operand_count: u8) {
    let bit = state.reg[r as usize] & 0x07;
    state.reg[IS] |= 1 << bit;
    state.pc = state.pc.wrapping_add(1 + operand_count);
}

fn iret(state: &mut MachineState) {
    for i in (0..7).rev() {
        state.reg[i] = state.pop_byte();
    }
    state.fl = state.pop_byte();
    state.pc = state.pop_byte();
    state.interrupts_enabled = true;
}
