//! The peripheral-to-CPU contract: anything that writes RAM mailboxes and
//! raises interrupts concurrently with the control unit.

pub mod keyboard;

pub use keyboard::Keyboard;

use crate::machine::Machine;

/// An external input producer that runs on its own thread, writes
/// designated RAM mailboxes, and signals readiness via `raise_interrupt`.
///
/// Implementors hold only what they need to produce input (e.g. stdin);
/// the shared [`Machine`] handle is passed into `run` rather than stored,
/// since `Machine::spawn` is what owns the thread.
pub trait Peripheral {
    /// Enter the peripheral's polling loop. Returns only if the loop
    /// itself decides to stop; in practice the process exits from under
    /// it on `HLT`, so implementations that loop forever are expected.
    fn run(self, machine: Machine);
}
