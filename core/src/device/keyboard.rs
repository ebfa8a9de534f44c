//! The one concrete peripheral: a keyboard that polls stdin.
//!
//! Mirrors the reference implementation's `Keyboard` collaborator: a
//! daemon-equivalent thread reads one byte from standard input at a time,
//! stores it in the mailbox at `ram[0xF4]`, and raises interrupt bit 1.

use std::io::Read;
use std::thread::sleep;
use std::time::Duration;

use super::Peripheral;
use crate::machine::{Machine, KEYBOARD_INTERRUPT_BIT, KEYBOARD_MAILBOX};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Polls `stdin` for one byte at a time and forwards it to the CPU.
pub struct Keyboard<R> {
    input: R,
}

impl Keyboard<std::io::Stdin> {
    /// A keyboard reading from the process's standard input.
    pub fn from_stdin() -> Self {
        Self {
            input: std::io::stdin(),
        }
    }
}

impl<R> Keyboard<R> {
    /// A keyboard reading from an arbitrary byte source (used in tests to
    /// avoid depending on the process's real stdin).
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> Peripheral for Keyboard<R> {
    fn run(mut self, machine: Machine) {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(1) => {
                    let mut state = machine.lock();
                    state.write(KEYBOARD_MAILBOX, byte[0]);
                    state.raise_interrupt(KEYBOARD_INTERRUPT_BIT);
                }
                // EOF or a spurious short read: nothing available this
                // tick. Keep polling rather than treating it as fatal —
                // matches the original peripheral's `if char:` guard,
                // which silently skips empty reads from a closed stdin.
                Ok(_) | Err(_) => {}
            }
            sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_polled_byte_to_mailbox_and_raises_bit_1() {
        let machine = Machine::new();
        let keyboard = Keyboard::new(Cursor::new(vec![b'A']));
        let handle = machine.spawn(keyboard);

        // Give the peripheral thread time to poll once.
        sleep(Duration::from_millis(150));

        let state = machine.lock();
        assert_eq!(state.read(KEYBOARD_MAILBOX), b'A');
        assert_eq!(state.is() & (1 << KEYBOARD_INTERRUPT_BIT), 1 << KEYBOARD_INTERRUPT_BIT);
        drop(state);
        drop(handle); // daemon-equivalent: never joined
    }
}
