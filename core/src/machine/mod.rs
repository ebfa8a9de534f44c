//! Memory & registers, and the shared handle peripherals and the control
//! unit use to reach them concurrently.

mod stack;

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::cpu::Cpu;
use crate::device::Peripheral;
use crate::error::{ExitReason, MachineError};

/// Number of general-purpose registers.
pub const REG_COUNT: usize = 8;

/// Size of the address space in bytes.
pub const RAM_SIZE: usize = 256;

/// Interrupt Mask register index.
pub const IM: usize = 5;
/// Interrupt Status register index.
pub const IS: usize = 6;
/// Stack Pointer register index.
pub const SP: usize = 7;

/// Initial stack pointer value.
pub const SP_INIT: u8 = 0xF4;

/// First address of the eight-entry Interrupt Vector Table.
pub const IVT_BASE: u8 = 0xF8;

/// RAM mailbox the keyboard peripheral writes polled bytes into.
pub const KEYBOARD_MAILBOX: u8 = 0xF4;

/// Interrupt bit the keyboard peripheral raises.
pub const KEYBOARD_INTERRUPT_BIT: u8 = 1;

/// Interrupt bit the built-in one-second timer raises.
pub const TIMER_INTERRUPT_BIT: u8 = 0;

/// Bits of the flag register, set exclusively by `CMP`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    Equal = 0b001,
    Greater = 0b010,
    Less = 0b100,
}

/// The raw processor state: memory, registers, PC/IR/FL, and the
/// interrupt-enable latch. Mutated by the control unit on every cycle;
/// peripherals touch only `reg[IS]` and their designated RAM mailboxes,
/// always through the [`Machine`] handle's lock.
pub struct MachineState {
    pub pc: u8,
    pub ir: u8,
    pub fl: u8,
    pub ram: [u8; RAM_SIZE],
    pub reg: [u8; REG_COUNT],
    pub interrupts_enabled: bool,
}

impl MachineState {
    pub fn new() -> Self {
        let mut reg = [0u8; REG_COUNT];
        reg[SP] = SP_INIT;
        Self {
            pc: 0,
            ir: 0,
            fl: 0,
            ram: [0u8; RAM_SIZE],
            reg,
            interrupts_enabled: true,
        }
    }

    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.ram[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.ram[addr as usize] = value;
    }

    #[inline]
    pub fn im(&self) -> u8 {
        self.reg[IM]
    }

    #[inline]
    pub fn is(&self) -> u8 {
        self.reg[IS]
    }

    #[inline]
    pub fn sp(&self) -> u8 {
        self.reg[SP]
    }

    /// Set bit `bit` of the Interrupt Status register. Idempotent: raising
    /// an already-set bit does nothing further.
    pub fn raise_interrupt(&mut self, bit: u8) {
        self.reg[IS] |= 1 << bit;
    }

    /// Address of the IVT entry for interrupt bit `bit` (bits 0..8 map to
    /// `0xF8..=0xFF`).
    pub fn ivt_slot(bit: u8) -> u8 {
        IVT_BASE.wrapping_add(bit)
    }

    /// Exactly one of L/G/E, matching the mutual-exclusion invariant.
    pub fn flag_set(&self, flag: Flag) -> bool {
        self.fl & (flag as u8) != 0
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-shared handle to a [`MachineState`], plus the bits needed to
/// drive the fetch/decode/execute loop and spawn peripherals against it.
///
/// The whole state lives behind one short-held [`Mutex`]: the control unit
/// locks it for the duration of a single cycle, and peripherals lock it
/// only long enough to write their mailbox byte and raise their interrupt
/// bit. This is the conservative option the spec's own design notes call
/// out as acceptable, chosen over per-field atomics for simplicity.
#[derive(Clone)]
pub struct Machine {
    state: Arc<Mutex<MachineState>>,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MachineState::new())),
        }
    }

    /// Load a program into RAM starting at address 0, as produced by
    /// [`crate::loader::load_program`].
    pub fn load_program(&self, bytes: &[u8]) {
        let mut state = self.state.lock().unwrap();
        for (addr, &byte) in bytes.iter().enumerate() {
            state.ram[addr] = byte;
        }
    }

    /// Spawn a peripheral's polling loop on its own daemon-equivalent
    /// thread. The returned handle is typically dropped: the peripheral
    /// is torn down when the process exits on `HLT`, not joined.
    pub fn spawn<P: Peripheral + Send + 'static>(&self, peripheral: P) -> JoinHandle<()> {
        let machine = self.clone();
        thread::spawn(move || peripheral.run(machine))
    }

    /// Lock the shared state for one short critical section. Used by
    /// peripherals (mailbox write + interrupt raise) and by the control
    /// unit (one fetch/decode/execute cycle).
    pub fn lock(&self) -> std::sync::MutexGuard<'_, MachineState> {
        self.state.lock().unwrap()
    }

    /// Run the fetch/decode/execute loop until `HLT` or a fatal error.
    /// When `trace` is set, one `TRACE: ...` line is printed per cycle.
    pub fn run(&self, trace: bool) -> Result<ExitReason, MachineError> {
        let mut cpu = Cpu::new(self.clone());
        cpu.run(trace)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
