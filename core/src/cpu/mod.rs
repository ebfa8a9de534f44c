//! The control unit: fetch/decode/execute loop, stack and control-flow
//! operations, and the binding between the ALU, interrupt subsystem, and
//! timer.

mod alu;
mod interrupt;
mod ops;

use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::error::{ExitReason, MachineError};
use crate::machine::{Machine, MachineState};
use crate::trace;

/// Bit 5 of the opcode: dispatch to the ALU rather than the non-ALU table.
const ALU_FLAG: u8 = 0x20;
/// Bit 4 of the opcode: the operation assigns PC itself; the control unit
/// skips the post-execute PC advance.
const SELF_UPDATES_PC: u8 = 0x10;

/// Sleep between cycles, capping host CPU usage.
const CYCLE_SLEEP: Duration = Duration::from_millis(5);
/// The built-in timer raises interrupt bit 0 once this much wall-clock
/// time has elapsed since the last reset.
const TIMER_PERIOD: Duration = Duration::from_secs(1);

/// Drives one [`Machine`] through its fetch/decode/execute loop.
pub struct Cpu {
    machine: Machine,
    timer_last_reset: Instant,
}

impl Cpu {
    pub fn new(machine: Machine) -> Self {
        Self {
            machine,
            timer_last_reset: Instant::now(),
        }
    }

    /// Run until `HLT` or a fatal error. Each cycle takes the machine's
    /// lock for its full fetch/decode/execute, then releases it before
    /// sleeping, so the keyboard peripheral is never blocked for longer
    /// than a single instruction.
    pub fn run(&mut self, trace: bool) -> Result<ExitReason, MachineError> {
        loop {
            let mut state = self.machine.lock();

            if state.interrupts_enabled {
                interrupt::dispatch_pending(&mut state);
            }

            state.ir = state.read(state.pc);

            if trace {
                println!("{}", trace::format_line(&state));
            }

            match execute_one(&mut state) {
                Ok(Some(reason)) => return Ok(reason),
                Ok(None) => {}
                Err(err) => {
                    // A fatal error always dumps a trace line, even when
                    // `-d` wasn't passed, so the diagnostic is actionable.
                    if !trace {
                        eprintln!("{}", trace::format_line(&state));
                    }
                    return Err(err);
                }
            }

            drop(state);

            self.tick_timer();
            sleep(CYCLE_SLEEP);
        }
    }

    fn tick_timer(&mut self) {
        if self.timer_last_reset.elapsed() > TIMER_PERIOD {
            self.machine
                .lock()
                .raise_interrupt(crate::machine::TIMER_INTERRUPT_BIT);
            self.timer_last_reset = Instant::now();
        }
    }
}

/// Execute the instruction currently in `ir`, returning `Some(reason)`
/// only when execution should stop (`HLT`).
fn execute_one(state: &mut MachineState) -> Result<Option<ExitReason>, MachineError> {
    let opcode = state.ir;
    let operand_count = (opcode >> 6) & 0b11;
    let is_alu = opcode & ALU_FLAG != 0;
    let self_updates_pc = opcode & SELF_UPDATES_PC != 0;

    let operand_a = state.read(state.pc.wrapping_add(1));
    let operand_b = state.read(state.pc.wrapping_add(2));

    let reason = if is_alu {
        alu::execute(state, opcode, operand_a, operand_b)?;
        None
    } else {
        ops::execute(state, opcode, operand_a, operand_b, operand_count)?
    };

    if !self_updates_pc {
        state.pc = state.pc.wrapping_add(1 + operand_count);
    }

    Ok(reason)
}
