//! Core emulation engine: memory/registers, ALU, control unit, interrupt
//! subsystem, and the peripheral-to-CPU contract.

pub mod cpu;
pub mod device;
pub mod error;
pub mod loader;
pub mod machine;
pub mod trace;

pub mod prelude {
    pub use crate::cpu::Cpu;
    pub use crate::device::Peripheral;
    pub use crate::error::{ExitReason, LoadError, MachineError};
    pub use crate::machine::{Machine, MachineState};
}
